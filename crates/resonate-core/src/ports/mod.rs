//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core expects from adapters. They use
//! only domain types; container formats, DSP and model runtimes stay behind
//! them.
//!
//! All ports are synchronous. Callers in async contexts run them under
//! `spawn_blocking` because decoding and inference are CPU-bound.

pub mod codec;
pub mod pipeline;

pub use codec::{AudioDecoder, AudioEncoder, CodecError};
pub use pipeline::{AudioToAudioPipeline, PipelineError, PipelineLoader};
