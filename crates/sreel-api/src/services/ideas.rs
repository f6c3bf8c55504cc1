//! Batch-idea fan-out pipeline.
//!
//! Expands one free-text idea into styled prompt variants, then runs the
//! image and video steps per variant against the URL-based provider. A
//! failed variant is dropped from the results; only an unparseable
//! expansion or a fully empty result set fails the batch.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sreel_gen::{GenError, IdeaExpander, PromptVariant, VariantGenerator};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum IdeaError {
    /// The language model's expansion could not be parsed as prompts.
    #[error("{0}")]
    Expansion(GenError),

    /// Every variant failed its generation steps.
    #[error("no variant could be generated")]
    AllVariantsFailed,
}

/// One successfully generated variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResult {
    pub style: String,
    pub prompt: String,
    pub video_url: String,
}

/// Idea-to-videos pipeline over injected providers.
#[derive(Clone)]
pub struct IdeaPipeline {
    expander: Arc<dyn IdeaExpander>,
    generator: Arc<dyn VariantGenerator>,
}

impl IdeaPipeline {
    pub fn new(expander: Arc<dyn IdeaExpander>, generator: Arc<dyn VariantGenerator>) -> Self {
        Self {
            expander,
            generator,
        }
    }

    pub async fn run(&self, idea: &str) -> Result<Vec<VariantResult>, IdeaError> {
        let variants = self
            .expander
            .expand_idea(idea)
            .await
            .map_err(IdeaError::Expansion)?;
        info!("Idea expanded into {} variants", variants.len());

        let mut results = Vec::with_capacity(variants.len());
        for variant in variants {
            match self.run_variant(&variant).await {
                Ok(video_url) => results.push(VariantResult {
                    style: variant.style,
                    prompt: variant.prompt,
                    video_url,
                }),
                Err(e) => {
                    warn!("Variant {:?} dropped: {}", variant.style, e);
                }
            }
        }

        if results.is_empty() {
            return Err(IdeaError::AllVariantsFailed);
        }
        Ok(results)
    }

    async fn run_variant(&self, variant: &PromptVariant) -> Result<String, GenError> {
        let image_url = self.generator.image_from_prompt(&variant.prompt).await?;
        self.generator
            .video_from_image_url(&image_url, &variant.prompt)
            .await
    }
}
