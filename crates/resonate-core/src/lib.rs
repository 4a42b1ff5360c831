#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used types for convenience
pub use config::{ConfigError, InferenceConfig, MODEL_ID_ENV, TASK_ENV};
pub use domain::{
    ALLOWED_TASKS, AudioBlob, DEFAULT_SAMPLING_RATE, EncodedAudio, ErrorEnvelope, PipelineOutput,
    Task, TaskParseError, Waveform, is_allowed,
};
pub use ports::{
    AudioDecoder, AudioEncoder, AudioToAudioPipeline, CodecError, PipelineError, PipelineLoader,
};
pub use services::{AudioToAudioService, InferenceError, InferenceReport, PipelineRegistry};

// Used by unit tests only
#[cfg(test)]
use serde_json as _;
