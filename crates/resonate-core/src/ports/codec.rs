//! Audio codec ports.

use thiserror::Error;

use crate::domain::{EncodedAudio, Waveform};

/// Errors raised while decoding or encoding audio.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The payload is not decodable audio, or decodes to nothing.
    #[error("Malformed soundfile")]
    Malformed,

    /// Resampling to the requested rate failed.
    #[error("Resampling failed: {0}")]
    Resample(String),

    /// Writing the output container failed.
    #[error("Failed to encode audio: {0}")]
    Encode(String),
}

impl CodecError {
    /// Whether the error is the caller's fault (bad input bytes).
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed)
    }
}

/// Decodes an encoded audio file into mono samples at a target rate.
///
/// Implementations must downmix multi-channel input and resample to
/// `target_rate`. A payload that yields no samples is [`CodecError::Malformed`].
/// The payload is passed by value so request bodies reach the demuxer
/// without another copy.
pub trait AudioDecoder: Send + Sync {
    fn decode(&self, bytes: Vec<u8>, target_rate: u32) -> Result<Waveform, CodecError>;
}

/// Encodes mono samples into an audio file.
pub trait AudioEncoder: Send + Sync {
    /// MIME type of the bytes produced by [`AudioEncoder::encode`].
    fn content_type(&self) -> &'static str;

    fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<EncodedAudio, CodecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_is_exact() {
        assert_eq!(CodecError::Malformed.to_string(), "Malformed soundfile");
        assert!(CodecError::Malformed.is_malformed());
        assert!(!CodecError::Encode("disk full".into()).is_malformed());
    }
}
