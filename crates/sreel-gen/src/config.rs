//! Generation client configuration.

/// Default bound on one remote generation call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const MINIMAX_BASE_URL: &str = "https://api.minimax.io";

/// Configuration for the remote generation clients.
///
/// Built once at process start and injected into the clients; missing
/// credentials leave the fields `None` and every call on the affected
/// client fails with a configuration error instead of crashing startup.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Multimodal provider API key (`GEMINI_API_KEY`).
    pub gemini_api_key: Option<String>,
    /// Alternate provider bearer token (`MINIMAX_API_KEY`).
    pub minimax_api_key: Option<String>,
    /// Multimodal provider base URL, overridable for tests.
    pub gemini_base_url: String,
    /// Alternate provider base URL, overridable for tests.
    pub minimax_base_url: String,
    /// Model used for image and video generation.
    pub media_model: String,
    /// Model used for idea expansion.
    pub text_model: String,
    /// Per-call timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            minimax_api_key: None,
            gemini_base_url: GEMINI_BASE_URL.to_string(),
            minimax_base_url: MINIMAX_BASE_URL.to_string(),
            media_model: "gemini-1.5-pro-latest".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GenConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            minimax_api_key: std::env::var("MINIMAX_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            minimax_base_url: std::env::var("MINIMAX_BASE_URL").unwrap_or(defaults.minimax_base_url),
            media_model: std::env::var("MEDIA_MODEL").unwrap_or(defaults.media_model),
            text_model: std::env::var("TEXT_MODEL").unwrap_or(defaults.text_model),
            timeout_secs: std::env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        }
    }
}
