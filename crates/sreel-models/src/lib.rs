//! Shared data models for the StoryReel backend.
//!
//! This crate provides Serde-serializable types for:
//! - Storyboard scenes and their validated forms
//! - Per-scene and batch generation results
//! - Data-URI parsing and encoding for inline media

pub mod data_uri;
pub mod result;
pub mod scene;

// Re-export common types
pub use data_uri::{DataUri, DataUriError};
pub use result::{BatchResult, SceneResult, SceneStatus};
pub use scene::{NormalizedScene, RawScene, SceneError, DEFAULT_ASPECT_RATIO};
