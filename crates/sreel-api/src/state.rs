//! Application state.

use std::sync::Arc;

use sreel_gen::{GeminiClient, GenConfig, IdeaExpander, ImageGenerator, MiniMaxClient, VariantGenerator, VideoGenerator};

use crate::config::ApiConfig;
use crate::services::{IdeaPipeline, StoryboardPipeline};

/// Shared application state.
///
/// Clients are constructed once here and injected into the pipelines
/// behind provider traits. Missing credentials still produce a working
/// state: the affected calls fail with a configuration error instead.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub storyboard: StoryboardPipeline,
    pub ideas: IdeaPipeline,
}

impl AppState {
    /// Create application state with the real generation clients.
    pub fn new(config: ApiConfig, gen_config: &GenConfig) -> Self {
        let gemini = Arc::new(GeminiClient::new(gen_config));
        let minimax = Arc::new(MiniMaxClient::new(gen_config));

        let storyboard = StoryboardPipeline::new(
            Arc::clone(&gemini) as Arc<dyn ImageGenerator>,
            Arc::clone(&gemini) as Arc<dyn VideoGenerator>,
        );
        let ideas = IdeaPipeline::new(
            gemini as Arc<dyn IdeaExpander>,
            minimax as Arc<dyn VariantGenerator>,
        );

        Self {
            config,
            storyboard,
            ideas,
        }
    }

    /// Create application state over arbitrary providers (tests).
    pub fn with_pipelines(
        config: ApiConfig,
        storyboard: StoryboardPipeline,
        ideas: IdeaPipeline,
    ) -> Self {
        Self {
            config,
            storyboard,
            ideas,
        }
    }
}
