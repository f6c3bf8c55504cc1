//! Axum HTTP API server for storyboard-to-video generation.
//!
//! This crate provides:
//! - The per-scene pipeline orchestrator (normalize, generate, aggregate)
//! - The batch-idea fan-out pipeline
//! - HTTP handlers, routes and configuration

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use services::{IdeaPipeline, StoryboardPipeline};
pub use state::AppState;
