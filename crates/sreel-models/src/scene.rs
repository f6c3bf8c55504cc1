//! Storyboard scene input model and validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_uri::DataUri;

/// Aspect ratio applied to text scenes when the client sends none.
pub const DEFAULT_ASPECT_RATIO: &str = "16:9";

/// Scene validation errors.
///
/// These surface as per-scene failures, never as request-level errors:
/// one malformed scene must not abort the rest of the storyboard.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SceneError {
    #[error("unknown scene type: {0:?}")]
    UnknownType(String),

    #[error("missing prompt")]
    MissingPrompt,

    #[error("missing image content")]
    MissingImageContent,

    #[error("malformed image payload: {0}")]
    MalformedImagePayload(String),
}

/// A raw scene record as received on the wire.
///
/// `type` is kept as a free-form string so an unrecognized value fails
/// validation for that scene instead of failing deserialization of the
/// whole request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScene {
    #[serde(rename = "type", default)]
    pub scene_type: Option<String>,

    #[serde(default)]
    pub prompt: Option<String>,

    /// Data-URI-encoded image, required for `type == "image"`.
    #[serde(default)]
    pub content: Option<String>,

    #[serde(rename = "aspectRatio", default)]
    pub aspect_ratio: Option<String>,
}

/// A validated, defaulted scene ready for the generation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedScene {
    /// Text prompt scene: image is generated first, then animated.
    Text { prompt: String, aspect_ratio: String },
    /// Uploaded-image scene: the image is animated directly.
    Image { image: DataUri, prompt: String },
}

impl RawScene {
    /// Validate and default this scene.
    ///
    /// Policy: a text scene with a missing or empty prompt fails validation
    /// rather than falling back to a generic prompt.
    pub fn normalized(&self) -> Result<NormalizedScene, SceneError> {
        match self.scene_type.as_deref() {
            Some("text") => {
                let prompt = match self.prompt.as_deref().map(str::trim) {
                    Some(p) if !p.is_empty() => p.to_string(),
                    _ => return Err(SceneError::MissingPrompt),
                };
                let aspect_ratio = match self.aspect_ratio.as_deref().map(str::trim) {
                    Some(r) if !r.is_empty() => r.to_string(),
                    _ => DEFAULT_ASPECT_RATIO.to_string(),
                };
                Ok(NormalizedScene::Text {
                    prompt,
                    aspect_ratio,
                })
            }
            Some("image") => {
                let content = match self.content.as_deref().map(str::trim) {
                    Some(c) if !c.is_empty() => c,
                    _ => return Err(SceneError::MissingImageContent),
                };
                let image = DataUri::parse(content)
                    .map_err(|e| SceneError::MalformedImagePayload(e.to_string()))?;
                Ok(NormalizedScene::Image {
                    image,
                    prompt: self.prompt.clone().unwrap_or_default(),
                })
            }
            Some(other) => Err(SceneError::UnknownType(other.to_string())),
            None => Err(SceneError::UnknownType(String::new())),
        }
    }

    /// The prompt to echo back in results, whatever the validation outcome.
    pub fn echo_prompt(&self) -> String {
        self.prompt.clone().unwrap_or_default()
    }
}
