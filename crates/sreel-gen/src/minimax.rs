//! Alternate URL-based generation provider (MiniMax-style API).
//!
//! Bearer-token HTTP services: text-to-image and image-to-video, both
//! returning hosted media URLs in `{data: [{url}]}` on success and a
//! `{base_resp: {status_msg}}` envelope on failure. Used by the batch-idea
//! pipeline, where results are passed around as URLs rather than bytes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::provider::VariantGenerator;

const IMAGE_MODEL: &str = "image-01";
const VIDEO_MODEL: &str = "video-01";

/// Alternate provider client.
pub struct MiniMaxClient {
    api_key: Option<String>,
    base_url: String,
    timeout_secs: u64,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ProviderResponse {
    #[serde(default)]
    data: Option<Vec<UrlEntry>>,
    #[serde(default)]
    base_resp: Option<BaseResp>,
}

#[derive(Debug, Deserialize)]
struct UrlEntry {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BaseResp {
    #[serde(default)]
    status_msg: Option<String>,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<&'a str>,
}

impl MiniMaxClient {
    pub fn new(config: &GenConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: config.minimax_api_key.clone(),
            base_url: config.minimax_base_url.clone(),
            timeout_secs: config.timeout_secs,
            client,
        }
    }

    fn api_key(&self) -> GenResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| GenError::Configuration("MINIMAX_API_KEY is not set".to_string()))
    }

    async fn post_generation(&self, endpoint: &str, request: GenerationRequest<'_>) -> GenResult<String> {
        let key = self.api_key()?;
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenError::from_reqwest(e, self.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::transport(Some(status.as_u16()), body));
        }

        let body: ProviderResponse = response
            .json()
            .await
            .map_err(|e| GenError::from_reqwest(e, self.timeout_secs))?;

        Self::extract_url(body)
    }

    /// The provider reports failure as a status message where media URLs
    /// would be; that text is a refusal, never auxiliary metadata.
    fn extract_url(body: ProviderResponse) -> GenResult<String> {
        if let Some(url) = body
            .data
            .and_then(|entries| entries.into_iter().next())
            .and_then(|entry| entry.url)
            .filter(|url| !url.is_empty())
        {
            return Ok(url);
        }

        match body.base_resp.and_then(|r| r.status_msg).filter(|m| !m.is_empty()) {
            Some(msg) => Err(GenError::Refusal(msg)),
            None => Err(GenError::Malformed),
        }
    }
}

#[async_trait]
impl VariantGenerator for MiniMaxClient {
    async fn image_from_prompt(&self, prompt: &str) -> GenResult<String> {
        info!("Generating variant image: {:?}", prompt);
        self.post_generation(
            "/v1/image_generation",
            GenerationRequest {
                model: IMAGE_MODEL,
                prompt,
                image_url: None,
            },
        )
        .await
    }

    async fn video_from_image_url(&self, image_url: &str, prompt: &str) -> GenResult<String> {
        info!("Generating variant video from {}", image_url);
        self.post_generation(
            "/v1/video_generation",
            GenerationRequest {
                model: VIDEO_MODEL,
                prompt,
                image_url: Some(image_url),
            },
        )
        .await
    }
}
