//! The per-scene pipeline orchestrator.
//!
//! For each scene: validate and default the input, run the generation
//! step(s) in order (text scenes get an image generated first, image scenes
//! go straight to animation), and fold the outcome into one result record.
//! A scene failure terminates that scene only; the loop always advances.

use std::sync::Arc;

use sreel_gen::{GenError, ImageGenerator, MediaPayload, VideoGenerator};
use sreel_models::{BatchResult, DataUri, NormalizedScene, RawScene, SceneResult};
use tracing::{info, warn};

/// Animation directive applied when the scene supplies no video prompt.
pub const DEFAULT_ANIMATION_PROMPT: &str = "Animate this image with subtle, cinematic movement.";

/// Sequential storyboard pipeline over injected generation providers.
#[derive(Clone)]
pub struct StoryboardPipeline {
    image_gen: Arc<dyn ImageGenerator>,
    video_gen: Arc<dyn VideoGenerator>,
}

impl StoryboardPipeline {
    pub fn new(image_gen: Arc<dyn ImageGenerator>, video_gen: Arc<dyn VideoGenerator>) -> Self {
        Self {
            image_gen,
            video_gen,
        }
    }

    /// Process a storyboard, strictly one scene at a time.
    ///
    /// The returned batch always has exactly one entry per input scene, in
    /// input order, whatever mix of successes and failures occurred.
    pub async fn run(&self, scenes: &[RawScene]) -> BatchResult {
        let total = scenes.len();
        info!("Starting storyboard processing with {} scenes", total);

        let mut batch = BatchResult::with_capacity(total);
        for (index, scene) in scenes.iter().enumerate() {
            let scene_number = (index + 1) as u32;
            info!("Processing scene {}/{}", scene_number, total);

            let prompt = scene.echo_prompt();
            match self.run_scene(scene).await {
                Ok(video_data) => {
                    batch.push(SceneResult::success(scene_number, prompt, video_data));
                }
                Err(message) => {
                    warn!("Scene {} failed: {}", scene_number, message);
                    batch.push(SceneResult::failure(scene_number, prompt, message));
                }
            }
        }

        info!("Storyboard processing finished");
        batch
    }

    /// Run one scene to its terminal state.
    async fn run_scene(&self, scene: &RawScene) -> Result<String, String> {
        let normalized = scene.normalized().map_err(|e| e.to_string())?;
        self.generate(normalized).await.map_err(annotate_error)
    }

    async fn generate(&self, scene: NormalizedScene) -> Result<String, GenError> {
        let (image, video_prompt) = match scene {
            NormalizedScene::Text {
                prompt,
                aspect_ratio,
            } => {
                let payload = self
                    .image_gen
                    .generate_image(&prompt, &aspect_ratio)
                    .await?
                    .into_media()?;
                let image = match payload {
                    MediaPayload::Bytes { data, mime_type } => DataUri { mime_type, data },
                    // A hosted-file reference cannot feed the animation
                    // step, which needs the image bytes.
                    MediaPayload::Uri { .. } => return Err(GenError::Malformed),
                };
                (image, DEFAULT_ANIMATION_PROMPT.to_string())
            }
            NormalizedScene::Image { image, prompt } => {
                let video_prompt = if prompt.trim().is_empty() {
                    DEFAULT_ANIMATION_PROMPT.to_string()
                } else {
                    prompt
                };
                (image, video_prompt)
            }
        };

        let payload = self
            .video_gen
            .generate_video(&image, &video_prompt)
            .await?
            .into_media()?;

        Ok(match payload {
            MediaPayload::Bytes { data, mime_type } => DataUri::encode(&mime_type, &data),
            // Already-hosted video: hand the reference through as-is.
            MediaPayload::Uri { uri, .. } => uri,
        })
    }
}

/// Surface the remote error verbatim, flagging quota and billing failures
/// so callers can tell them apart from content refusals.
fn annotate_error(err: GenError) -> String {
    let message = err.to_string();
    let lower = message.to_lowercase();
    if lower.contains("quota") || lower.contains("billing") {
        format!("quota/billing issue: {}", message)
    } else {
        message
    }
}
