#![doc = include_str!("../README.md")]
#![deny(unused_crate_dependencies)]

pub mod decode;
pub mod encode;
pub mod pipelines;
pub mod resample;

pub use decode::{DecodedAudio, SymphoniaDecoder};
pub use encode::{WAV_CONTENT_TYPE, WavEncoder};
pub use pipelines::{
    BandSplit, BuiltinPipelineLoader, CATALOG, CatalogEntry, Identity, NoiseGate,
    PIPELINE_SAMPLE_RATE, TESTABLE_MODELS, find_model,
};

// Used by integration tests only
#[cfg(test)]
use tempfile as _;
