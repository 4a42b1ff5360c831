//! Inference pipeline ports.
//!
//! An [`AudioToAudioPipeline`] is a loaded model: it takes one mono waveform
//! at its own sampling rate and returns one or more labelled waveforms. A
//! [`PipelineLoader`] constructs pipelines by `(model_id, task)`; the
//! `PipelineRegistry` service memoizes what it returns.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::{PipelineOutput, Task};

/// Errors raised while loading or running a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// No model with this id is known to the loader.
    #[error("Unknown model '{0}'")]
    UnknownModel(String),

    /// The model exists but cannot serve the requested task.
    #[error("Model '{model_id}' does not support task '{task}'")]
    UnsupportedTask { model_id: String, task: Task },

    /// The pipeline failed while processing input.
    #[error("Inference failed: {0}")]
    Inference(String),

    /// The pipeline returned output that breaks the response contract.
    #[error("Invalid pipeline output: {0}")]
    InvalidOutput(String),
}

impl PipelineError {
    /// Whether the error means the configured model cannot be served at all.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::UnknownModel(_) | Self::UnsupportedTask { .. })
    }
}

/// A loaded audio-to-audio model.
pub trait AudioToAudioPipeline: Send + Sync {
    /// Sampling rate the pipeline expects on input and produces on output.
    fn sampling_rate(&self) -> u32;

    /// Run one inference pass over `input`.
    fn run(&self, input: &[f32]) -> Result<PipelineOutput, PipelineError>;
}

/// Builds pipelines by model id and task.
#[cfg_attr(test, mockall::automock)]
pub trait PipelineLoader: Send + Sync {
    fn load(&self, model_id: &str, task: Task)
    -> Result<Arc<dyn AudioToAudioPipeline>, PipelineError>;
}

impl PipelineOutput {
    /// Check the output against the response contract.
    ///
    /// There must be at least one waveform, exactly one label per waveform,
    /// no empty waveform and a non-zero sampling rate.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.waveforms.is_empty() {
            return Err(PipelineError::InvalidOutput(
                "pipeline returned no audio".to_string(),
            ));
        }
        if self.waveforms.len() != self.labels.len() {
            return Err(PipelineError::InvalidOutput(format!(
                "{} waveforms but {} labels",
                self.waveforms.len(),
                self.labels.len()
            )));
        }
        if let Some(index) = self.waveforms.iter().position(Vec::is_empty) {
            return Err(PipelineError::InvalidOutput(format!(
                "waveform {index} is empty"
            )));
        }
        if self.sampling_rate == 0 {
            return Err(PipelineError::InvalidOutput(
                "sampling rate is zero".to_string(),
            ));
        }
        Ok(())
    }
}
