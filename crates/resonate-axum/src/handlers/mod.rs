//! HTTP request handlers.
//!
//! Handlers are thin wrappers that delegate to `AudioToAudioService`.

pub mod pipeline;
pub mod status;
