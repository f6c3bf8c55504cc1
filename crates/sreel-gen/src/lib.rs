//! Remote generation service clients for the StoryReel backend.
//!
//! This crate provides:
//! - A three-way classification of remote generation responses
//!   (success / refusal / malformed)
//! - The multimodal client used by the storyboard pipeline
//!   (text-to-image, image-to-video, idea expansion)
//! - The alternate URL-based provider used by the batch-idea pipeline
//! - Provider traits so the orchestrator never touches a concrete client

pub mod config;
pub mod error;
pub mod gemini;
pub mod minimax;
pub mod outcome;
pub mod provider;

pub use config::GenConfig;
pub use error::GenError;
pub use gemini::GeminiClient;
pub use minimax::MiniMaxClient;
pub use outcome::{GenerationOutcome, MediaPayload, PromptVariant, ResponsePart};
pub use provider::{
    IdeaExpander, ImageGenerator, MockIdeaExpander, MockImageGenerator, MockVariantGenerator,
    MockVideoGenerator, VariantGenerator, VideoGenerator,
};
