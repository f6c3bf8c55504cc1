//! Three-way classification of remote generation responses.

use serde::{Deserialize, Serialize};

use crate::error::GenError;

/// One content unit from a remote generation response, as an explicit
/// tagged union rather than optional-field sniffing on the raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponsePart {
    /// Plain text where media was requested.
    Text(String),
    /// Inline binary media.
    Media { data: Vec<u8>, mime_type: String },
    /// A reference to remotely hosted media.
    FileRef { uri: String, mime_type: String },
    /// Nothing usable at all.
    Empty,
}

/// Media carried by a successful generation, either inline or by URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaPayload {
    Bytes { data: Vec<u8>, mime_type: String },
    Uri { uri: String, mime_type: String },
}

impl MediaPayload {
    pub fn mime_type(&self) -> &str {
        match self {
            MediaPayload::Bytes { mime_type, .. } => mime_type,
            MediaPayload::Uri { mime_type, .. } => mime_type,
        }
    }
}

/// How one remote generation call resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Success(MediaPayload),
    /// Text in place of media always means the provider declined,
    /// regardless of what the text says.
    Refusal(String),
    MalformedResponse,
}

impl ResponsePart {
    /// Exhaustive mapping into a generation outcome.
    pub fn classify(self) -> GenerationOutcome {
        match self {
            ResponsePart::Media { data, mime_type } => {
                GenerationOutcome::Success(MediaPayload::Bytes { data, mime_type })
            }
            ResponsePart::FileRef { uri, mime_type } => {
                GenerationOutcome::Success(MediaPayload::Uri { uri, mime_type })
            }
            ResponsePart::Text(text) => GenerationOutcome::Refusal(text),
            ResponsePart::Empty => GenerationOutcome::MalformedResponse,
        }
    }
}

impl GenerationOutcome {
    /// Collapse into the payload, turning refusal and malformed outcomes
    /// into the matching per-scene errors.
    pub fn into_media(self) -> Result<MediaPayload, GenError> {
        match self {
            GenerationOutcome::Success(payload) => Ok(payload),
            GenerationOutcome::Refusal(text) => Err(GenError::Refusal(text)),
            GenerationOutcome::MalformedResponse => Err(GenError::Malformed),
        }
    }
}

/// One styled prompt produced by idea expansion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptVariant {
    pub style: String,
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_classifies_as_success() {
        let outcome = ResponsePart::Media {
            data: vec![1, 2, 3],
            mime_type: "video/mp4".to_string(),
        }
        .classify();
        assert!(matches!(
            outcome,
            GenerationOutcome::Success(MediaPayload::Bytes { ref mime_type, .. })
                if mime_type == "video/mp4"
        ));
    }

    #[test]
    fn test_file_ref_classifies_as_success() {
        let outcome = ResponsePart::FileRef {
            uri: "https://example.com/v.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
        }
        .classify();
        assert!(matches!(outcome, GenerationOutcome::Success(MediaPayload::Uri { .. })));
    }

    #[test]
    fn test_text_always_classifies_as_refusal() {
        // Even friendly-sounding text means no media was produced.
        let outcome = ResponsePart::Text("here is a description instead".to_string()).classify();
        assert_eq!(
            outcome,
            GenerationOutcome::Refusal("here is a description instead".to_string())
        );
    }

    #[test]
    fn test_empty_classifies_as_malformed() {
        assert_eq!(
            ResponsePart::Empty.classify(),
            GenerationOutcome::MalformedResponse
        );
    }

    #[test]
    fn test_into_media_maps_refusal_to_error() {
        let err = GenerationOutcome::Refusal("no".to_string())
            .into_media()
            .unwrap_err();
        assert_eq!(err, GenError::Refusal("no".to_string()));
    }

    #[test]
    fn test_into_media_maps_malformed_to_error() {
        let err = GenerationOutcome::MalformedResponse.into_media().unwrap_err();
        assert_eq!(err, GenError::Malformed);
    }
}
