//! Pipeline services.

pub mod ideas;
pub mod storyboard;

pub use ideas::{IdeaError, IdeaPipeline, VariantResult};
pub use storyboard::StoryboardPipeline;
