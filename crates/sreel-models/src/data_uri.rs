//! Data-URI parsing and encoding for inline media payloads.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Errors that can occur while parsing a data URI.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUriError {
    #[error("not a data URI (missing 'data:' prefix)")]
    MissingPrefix,

    #[error("data URI has no ';base64,' separator")]
    MissingSeparator,

    #[error("data URI payload is empty")]
    EmptyPayload,

    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Inline media decoded from a `data:<mime>;base64,<payload>` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Parse a `data:<mime>;base64,<payload>` string into its parts.
    pub fn parse(input: &str) -> Result<Self, DataUriError> {
        let rest = input
            .trim()
            .strip_prefix("data:")
            .ok_or(DataUriError::MissingPrefix)?;

        let (header, payload) = rest
            .split_once(";base64,")
            .ok_or(DataUriError::MissingSeparator)?;

        if payload.is_empty() {
            return Err(DataUriError::EmptyPayload);
        }

        let data = STANDARD
            .decode(payload)
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        let mime_type = if header.is_empty() {
            "application/octet-stream".to_string()
        } else {
            header.to_string()
        };

        Ok(Self { mime_type, data })
    }

    /// Encode raw bytes and a MIME type back into a data URI string.
    pub fn encode(mime_type: &str, data: &[u8]) -> String {
        format!("data:{};base64,{}", mime_type, STANDARD.encode(data))
    }

    /// Encode this value as a data URI string.
    pub fn to_uri(&self) -> String {
        Self::encode(&self.mime_type, &self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let uri = DataUri::encode("image/png", b"fake png bytes");
        let parsed = DataUri::parse(&uri).unwrap();
        assert_eq!(parsed.mime_type, "image/png");
        assert_eq!(parsed.data, b"fake png bytes");
        assert_eq!(parsed.to_uri(), uri);
    }

    #[test]
    fn test_parse_missing_prefix() {
        assert_eq!(
            DataUri::parse("image/png;base64,aGk="),
            Err(DataUriError::MissingPrefix)
        );
    }

    #[test]
    fn test_parse_missing_separator() {
        assert_eq!(
            DataUri::parse("data:image/png,rawdata"),
            Err(DataUriError::MissingSeparator)
        );
    }

    #[test]
    fn test_parse_empty_payload() {
        assert_eq!(
            DataUri::parse("data:image/png;base64,"),
            Err(DataUriError::EmptyPayload)
        );
    }

    #[test]
    fn test_parse_bad_base64() {
        assert!(matches!(
            DataUri::parse("data:image/png;base64,!!!not-base64!!!"),
            Err(DataUriError::InvalidBase64(_))
        ));
    }

    #[test]
    fn test_missing_mime_defaults_to_octet_stream() {
        let parsed = DataUri::parse("data:;base64,aGk=").unwrap();
        assert_eq!(parsed.mime_type, "application/octet-stream");
        assert_eq!(parsed.data, b"hi");
    }
}
