//! Per-scene and batch generation results.

use serde::{Deserialize, Serialize};

/// Terminal status of one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneStatus {
    Success,
    Failed,
}

/// Outcome of one scene, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneResult {
    /// 1-based position of the scene in the input storyboard.
    pub scene_number: u32,

    pub status: SceneStatus,

    /// The input prompt, echoed back.
    pub prompt: String,

    /// `data:<mime>;base64,<payload>` video, present iff status is success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_data: Option<String>,

    /// Failure message, present iff status is failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SceneResult {
    pub fn success(scene_number: u32, prompt: impl Into<String>, video_data: String) -> Self {
        Self {
            scene_number,
            status: SceneStatus::Success,
            prompt: prompt.into(),
            video_data: Some(video_data),
            error: None,
        }
    }

    pub fn failure(scene_number: u32, prompt: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            scene_number,
            status: SceneStatus::Failed,
            prompt: prompt.into(),
            video_data: None,
            error: Some(error.into()),
        }
    }
}

/// Ordered batch outcome: one entry per input scene, same order, no drops.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<SceneResult>,
}

impl BatchResult {
    pub fn with_capacity(n: usize) -> Self {
        Self {
            results: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, result: SceneResult) {
        self.results.push(result);
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization_omits_error() {
        let result = SceneResult::success(1, "a red cube", "data:video/mp4;base64,AAAA".into());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["scene_number"], 1);
        assert_eq!(json["video_data"], "data:video/mp4;base64,AAAA");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_serialization_omits_video_data() {
        let result = SceneResult::failure(2, "a blue cube", "missing prompt");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["error"], "missing prompt");
        assert!(json.get("video_data").is_none());
    }

    #[test]
    fn test_batch_preserves_order() {
        let mut batch = BatchResult::with_capacity(2);
        batch.push(SceneResult::failure(1, "a", "refused"));
        batch.push(SceneResult::success(2, "b", "data:video/mp4;base64,AA==".into()));
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.results[0].scene_number, 1);
        assert_eq!(batch.results[0].status, SceneStatus::Failed);
        assert_eq!(batch.results[1].scene_number, 2);
        assert_eq!(batch.results[1].status, SceneStatus::Success);
    }
}
