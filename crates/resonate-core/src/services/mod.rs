//! Core services.
//!
//! Services orchestrate ports; they never name a concrete decoder, encoder or
//! model implementation.

mod inference;
mod registry;

pub use inference::{AudioToAudioService, InferenceError, InferenceReport};
pub use registry::PipelineRegistry;
