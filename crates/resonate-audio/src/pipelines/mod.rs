//! Built-in audio-to-audio pipelines.
//!
//! These are signal-processing pipelines that need no weights, so every one of
//! them can be loaded in tests. All of them run at [`PIPELINE_SAMPLE_RATE`].

mod band_split;
mod catalog;
mod identity;
mod noise_gate;

pub use band_split::BandSplit;
pub use catalog::{BuiltinPipelineLoader, CATALOG, CatalogEntry, TESTABLE_MODELS, find_model};
pub use identity::Identity;
pub use noise_gate::NoiseGate;

use resonate_core::DEFAULT_SAMPLING_RATE;

/// Sampling rate of every built-in pipeline.
pub const PIPELINE_SAMPLE_RATE: u32 = DEFAULT_SAMPLING_RATE;
