//! Batch-idea handlers.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::services::VariantResult;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IdeaRequest {
    #[serde(default)]
    pub idea: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IdeaResponse {
    pub results: Vec<VariantResult>,
}

/// `POST /create-multiple-videos`
///
/// Expands one idea into styled variants and generates a video per variant.
/// 400 when the idea is missing, 500 when no variant succeeds.
pub async fn create_multiple_videos(
    State(state): State<AppState>,
    Json(request): Json<IdeaRequest>,
) -> ApiResult<Json<IdeaResponse>> {
    let idea = request
        .idea
        .as_deref()
        .map(str::trim)
        .filter(|idea| !idea.is_empty())
        .ok_or_else(|| ApiError::bad_request("Invalid request. 'idea' field is required."))?;

    let results = state
        .ideas
        .run(idea)
        .await
        .map_err(|e| ApiError::internal(e.to_string()))?;

    Ok(Json(IdeaResponse { results }))
}
