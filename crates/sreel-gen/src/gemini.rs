//! Multimodal generation client (Gemini-style API).
//!
//! Drives text-to-image, image-to-video and idea expansion against the
//! `generateContent` endpoint. Video generation uploads the source image to
//! the provider's file store first and always deletes it afterwards, on
//! failure paths included.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::multipart;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use sreel_models::DataUri;
use tracing::{info, warn};

use crate::config::GenConfig;
use crate::error::{GenError, GenResult};
use crate::outcome::{GenerationOutcome, PromptVariant, ResponsePart};
use crate::provider::{IdeaExpander, ImageGenerator, VideoGenerator};

/// Multimodal API client.
pub struct GeminiClient {
    config: GenConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_data: Option<FileData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData {
    file_uri: String,
    mime_type: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<RawPart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPart {
    text: Option<String>,
    inline_data: Option<InlineData>,
    file_data: Option<RawFileData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    /// Base64-encoded media bytes.
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFileData {
    file_uri: String,
    mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    /// Resource name, e.g. `files/abc-123`.
    name: String,
    uri: String,
    mime_type: String,
}

impl GeminiClient {
    pub fn new(config: &GenConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config: config.clone(),
            client,
        }
    }

    fn api_key(&self) -> GenResult<&str> {
        self.config
            .gemini_api_key
            .as_deref()
            .ok_or_else(|| GenError::Configuration("GEMINI_API_KEY is not set".to_string()))
    }

    /// Extract the first content unit of a response as an explicit variant.
    fn first_part(response: GenerateContentResponse) -> ResponsePart {
        let part = response
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next());

        let Some(part) = part else {
            return ResponsePart::Empty;
        };

        if let Some(inline) = part.inline_data {
            return match STANDARD.decode(&inline.data) {
                Ok(data) => ResponsePart::Media {
                    data,
                    mime_type: inline.mime_type,
                },
                Err(e) => {
                    warn!("Inline media payload is not valid base64: {}", e);
                    ResponsePart::Empty
                }
            };
        }

        if let Some(file) = part.file_data {
            return ResponsePart::FileRef {
                mime_type: file.mime_type.unwrap_or_else(|| "video/mp4".to_string()),
                uri: file.file_uri,
            };
        }

        match part.text {
            Some(text) if !text.trim().is_empty() => ResponsePart::Text(text),
            _ => ResponsePart::Empty,
        }
    }

    async fn generate_content(
        &self,
        model: &str,
        parts: Vec<RequestPart>,
        generation_config: Option<GenerationConfig>,
    ) -> GenResult<GenerateContentResponse> {
        let key = self.api_key()?;
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.config.gemini_base_url, model, key
        );

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config,
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenError::from_reqwest(e, self.config.timeout_secs))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::transport(Some(status.as_u16()), body));
        }

        response
            .json()
            .await
            .map_err(|e| GenError::from_reqwest(e, self.config.timeout_secs))
    }

    async fn upload_file(&self, data: &[u8], mime_type: &str) -> GenResult<UploadedFile> {
        let key = self.api_key()?;
        let url = format!(
            "{}/upload/v1beta/files?key={}",
            self.config.gemini_base_url, key
        );

        let metadata = serde_json::json!({ "file": { "displayName": "scene-image" } });
        let to_transport = |e: reqwest::Error| GenError::from_reqwest(e, self.config.timeout_secs);

        let form = multipart::Form::new()
            .part(
                "metadata",
                multipart::Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(to_transport)?,
            )
            .part(
                "file",
                multipart::Part::bytes(data.to_vec())
                    .mime_str(mime_type)
                    .map_err(to_transport)?,
            );

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(to_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenError::transport(Some(status.as_u16()), body));
        }

        let upload: UploadResponse = response.json().await.map_err(to_transport)?;
        info!("Uploaded scene image as {}", upload.file.name);
        Ok(upload.file)
    }

    /// Delete a remotely uploaded file. Failures are logged, never
    /// propagated: cleanup must not mask the generation result.
    async fn delete_file(&self, name: &str) {
        let Ok(key) = self.api_key() else { return };
        let url = format!("{}/v1beta/{}?key={}", self.config.gemini_base_url, name, key);

        match self.client.delete(&url).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Deleted remote file {}", name);
            }
            Ok(response) => {
                warn!(
                    "Failed to delete remote file {}: status {}",
                    name,
                    response.status()
                );
            }
            Err(e) => warn!("Failed to delete remote file {}: {}", name, e),
        }
    }
}

#[async_trait]
impl ImageGenerator for GeminiClient {
    async fn generate_image(
        &self,
        prompt: &str,
        aspect_ratio: &str,
    ) -> GenResult<GenerationOutcome> {
        info!(
            "Generating image with aspect ratio {}: {:?}",
            aspect_ratio, prompt
        );

        // The model has no structured aspect-ratio parameter; the ratio is a
        // natural-language directive and best effort only.
        let instruction = format!(
            "Generate a high-quality, photorealistic image with a {} aspect ratio of: {}",
            aspect_ratio, prompt
        );

        let response = self
            .generate_content(
                &self.config.media_model,
                vec![RequestPart {
                    text: Some(instruction),
                    file_data: None,
                }],
                None,
            )
            .await?;

        Ok(Self::first_part(response).classify())
    }
}

#[async_trait]
impl VideoGenerator for GeminiClient {
    async fn generate_video(&self, image: &DataUri, prompt: &str) -> GenResult<GenerationOutcome> {
        info!("Generating video with prompt: {:?}", prompt);

        let uploaded = self.upload_file(&image.data, &image.mime_type).await?;

        let result = self
            .generate_content(
                &self.config.media_model,
                vec![
                    RequestPart {
                        text: Some(prompt.to_string()),
                        file_data: None,
                    },
                    RequestPart {
                        text: None,
                        file_data: Some(FileData {
                            file_uri: uploaded.uri.clone(),
                            mime_type: uploaded.mime_type.clone(),
                        }),
                    },
                ],
                None,
            )
            .await;

        // Remote upload is scoped to this call: delete on success and failure.
        self.delete_file(&uploaded.name).await;

        Ok(Self::first_part(result?).classify())
    }
}

#[async_trait]
impl IdeaExpander for GeminiClient {
    async fn expand_idea(&self, idea: &str) -> GenResult<Vec<PromptVariant>> {
        info!("Expanding idea into prompt variants: {:?}", idea);

        let instruction = format!(
            r#"You are a creative director. Expand the following video idea into
between 2 and 4 diverse visual treatments.

IDEA: {}

IMPORTANT: You must strictly follow this output format.
Return ONLY a JSON array, each element an object with this schema:
[
  {{
    "style": "Style name",
    "prompt": "Detailed image generation prompt for this treatment"
  }}
]"#,
            idea
        );

        let response = self
            .generate_content(
                &self.config.text_model,
                vec![RequestPart {
                    text: Some(instruction),
                    file_data: None,
                }],
                Some(GenerationConfig {
                    response_mime_type: "application/json".to_string(),
                }),
            )
            .await?;

        let text = match Self::first_part(response) {
            ResponsePart::Text(text) => text,
            _ => {
                return Err(GenError::Expansion(
                    "expansion response carried no text".to_string(),
                ))
            }
        };

        // Parse JSON, handling markdown code blocks
        let text = text.trim();
        let text = text.strip_prefix("```json").unwrap_or(text);
        let text = text.strip_prefix("```").unwrap_or(text);
        let text = text.strip_suffix("```").unwrap_or(text);

        let variants: Vec<PromptVariant> = serde_json::from_str(text.trim())
            .map_err(|e| GenError::Expansion(format!("invalid variant JSON: {}", e)))?;

        if variants.is_empty() {
            return Err(GenError::Expansion("no prompt variants returned".to_string()));
        }

        Ok(variants)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> GenConfig {
        GenConfig {
            gemini_api_key: Some("test-key".to_string()),
            gemini_base_url: base_url.to_string(),
            timeout_secs: 5,
            ..GenConfig::default()
        }
    }

    fn inline_media_body(mime: &str, data: &[u8]) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{
                        "inlineData": { "mimeType": mime, "data": STANDARD.encode(data) }
                    }]
                }
            }]
        })
    }

    fn text_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": text }] } }]
        })
    }

    #[tokio::test]
    async fn test_generate_image_inline_media_is_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro-latest:generateContent"))
            .and(query_param("key", "test-key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(inline_media_body("image/png", b"png")),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let outcome = client.generate_image("a red cube", "1:1").await.unwrap();
        match outcome {
            GenerationOutcome::Success(crate::outcome::MediaPayload::Bytes { data, mime_type }) => {
                assert_eq!(mime_type, "image/png");
                assert_eq!(data, b"png");
            }
            other => panic!("expected inline media success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_generate_image_text_is_refusal() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_body("I cannot generate that image.")),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let outcome = client.generate_image("something", "16:9").await.unwrap();
        assert_eq!(
            outcome,
            GenerationOutcome::Refusal("I cannot generate that image.".to_string())
        );
    }

    #[tokio::test]
    async fn test_generate_image_empty_candidates_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let outcome = client.generate_image("something", "16:9").await.unwrap();
        assert_eq!(outcome, GenerationOutcome::MalformedResponse);
    }

    #[tokio::test]
    async fn test_generate_image_http_error_is_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let err = client.generate_image("something", "16:9").await.unwrap_err();
        assert_eq!(
            err,
            GenError::transport(Some(429), "quota exhausted".to_string())
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_remote_call() {
        let config = GenConfig {
            gemini_api_key: None,
            // Unroutable base URL: a request attempt would error differently.
            gemini_base_url: "http://127.0.0.1:1".to_string(),
            ..GenConfig::default()
        };
        let client = GeminiClient::new(&config);
        let err = client.generate_image("x", "16:9").await.unwrap_err();
        assert!(matches!(err, GenError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_generate_video_deletes_upload_on_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload/v1beta/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "file": {
                    "name": "files/abc-123",
                    "uri": "https://files.example/abc-123",
                    "mimeType": "image/jpeg"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro-latest:generateContent"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(inline_media_body("video/mp4", b"mp4")),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1beta/files/abc-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let image = DataUri {
            mime_type: "image/jpeg".to_string(),
            data: b"jpeg".to_vec(),
        };
        let outcome = client.generate_video(&image, "animate it").await.unwrap();
        assert!(matches!(outcome, GenerationOutcome::Success(_)));
    }

    #[tokio::test]
    async fn test_generate_video_deletes_upload_on_refusal() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/upload/v1beta/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "file": {
                    "name": "files/abc-123",
                    "uri": "https://files.example/abc-123",
                    "mimeType": "image/jpeg"
                }
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-1.5-pro-latest:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("declined")))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/v1beta/files/abc-123"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let image = DataUri {
            mime_type: "image/jpeg".to_string(),
            data: b"jpeg".to_vec(),
        };
        let outcome = client.generate_video(&image, "animate it").await.unwrap();
        assert_eq!(outcome, GenerationOutcome::Refusal("declined".to_string()));
    }

    #[tokio::test]
    async fn test_expand_idea_parses_fenced_json() {
        let server = MockServer::start().await;
        let fenced = "```json\n[{\"style\": \"Noir\", \"prompt\": \"a rainy street\"}, {\"style\": \"Anime\", \"prompt\": \"a bright street\"}]\n```";
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body(fenced)))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let variants = client.expand_idea("a street at night").await.unwrap();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].style, "Noir");
        assert_eq!(variants[1].prompt, "a bright street");
    }

    #[tokio::test]
    async fn test_expand_idea_unparseable_is_expansion_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_body("not json at all")))
            .mount(&server)
            .await;

        let client = GeminiClient::new(&test_config(&server.uri()));
        let err = client.expand_idea("an idea").await.unwrap_err();
        assert!(matches!(err, GenError::Expansion(_)));
    }
}
