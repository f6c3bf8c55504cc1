//! Storyboard generation handlers.

use axum::extract::State;
use axum::Json;
use serde_json::Value;
use sreel_models::{BatchResult, RawScene};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// `POST /generate-storyboard`
///
/// Runs the per-scene pipeline over the posted storyboard. Always answers
/// 200 with one result per scene; only a structurally invalid request
/// (missing or non-list `scenes`) is rejected outright.
pub async fn generate_storyboard(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<BatchResult>> {
    let scenes = parse_scenes(&body)?;
    let batch = state.storyboard.run(&scenes).await;
    Ok(Json(batch))
}

/// `POST /generate-from-script`
///
/// Alternate entry point with the identical contract, kept for clients of
/// the script editor flow.
pub async fn generate_from_script(
    state: State<AppState>,
    body: Json<Value>,
) -> ApiResult<Json<BatchResult>> {
    generate_storyboard(state, body).await
}

fn parse_scenes(body: &Value) -> Result<Vec<RawScene>, ApiError> {
    let scenes = body
        .get("scenes")
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::bad_request("Invalid request. 'scenes' field must be a list."))?;

    scenes
        .iter()
        .map(|scene| {
            serde_json::from_value(scene.clone())
                .map_err(|e| ApiError::bad_request(format!("invalid scene record: {}", e)))
        })
        .collect()
}
