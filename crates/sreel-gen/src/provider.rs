//! Provider traits the pipeline orchestrator depends on.
//!
//! Clients are injected behind these seams so the orchestrator never holds
//! concrete client state and tests can drive it with mocks.

use async_trait::async_trait;
use mockall::automock;
use sreel_models::DataUri;

use crate::error::GenResult;
use crate::outcome::{GenerationOutcome, PromptVariant};

/// Text-to-image generation.
#[automock]
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Generate an image for a prompt. The aspect ratio is conveyed as a
    /// natural-language directive, best effort only.
    async fn generate_image(&self, prompt: &str, aspect_ratio: &str)
        -> GenResult<GenerationOutcome>;
}

/// Image-to-video generation.
#[automock]
#[async_trait]
pub trait VideoGenerator: Send + Sync {
    /// Animate an image. Implementations that upload the image remotely
    /// must delete the remote file afterwards, on failure paths too.
    async fn generate_video(&self, image: &DataUri, prompt: &str)
        -> GenResult<GenerationOutcome>;
}

/// Free-text idea expansion into styled prompt variants.
#[automock]
#[async_trait]
pub trait IdeaExpander: Send + Sync {
    async fn expand_idea(&self, idea: &str) -> GenResult<Vec<PromptVariant>>;
}

/// URL-based generation for the batch-idea pipeline: prompts become hosted
/// image URLs, image URLs become hosted video URLs.
#[automock]
#[async_trait]
pub trait VariantGenerator: Send + Sync {
    async fn image_from_prompt(&self, prompt: &str) -> GenResult<String>;

    async fn video_from_image_url(&self, image_url: &str, prompt: &str) -> GenResult<String>;
}
