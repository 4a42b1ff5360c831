//! JSON envelopes returned by the inference endpoint.
//!
//! These are wire shapes: the key set of [`AudioBlob`] is fixed to exactly
//! `blob`, `content-type` and `label`, and [`ErrorEnvelope`] carries a single
//! `error` key. Adapters serialize them as-is.

use serde::{Deserialize, Serialize};

/// One entry of the success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioBlob {
    /// Base64 (standard alphabet, padded) encoded audio file.
    pub blob: String,
    /// MIME type of the decoded `blob`.
    #[serde(rename = "content-type")]
    pub content_type: String,
    /// Pipeline label for this output.
    pub label: String,
}

/// Failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_blob_has_exactly_three_keys() {
        let blob = AudioBlob {
            blob: "AAAA".to_string(),
            content_type: "audio/wav".to_string(),
            label: "enhanced".to_string(),
        };
        let value = serde_json::to_value(&blob).unwrap();
        let mut keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, vec!["blob", "content-type", "label"]);
    }

    #[test]
    fn test_error_envelope_is_compact() {
        let body = serde_json::to_vec(&ErrorEnvelope::new("Malformed soundfile")).unwrap();
        assert_eq!(body, br#"{"error":"Malformed soundfile"}"#);
    }
}
