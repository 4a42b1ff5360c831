//! Audio-to-audio inference service.
//!
//! Takes the raw request payload, resolves the configured pipeline through the
//! [`PipelineRegistry`], decodes, runs, validates and encodes, and returns the
//! envelope items in pipeline order.

use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

use super::registry::PipelineRegistry;
use crate::config::InferenceConfig;
use crate::domain::{AudioBlob, PipelineOutput};
use crate::ports::{AudioDecoder, AudioEncoder, AudioToAudioPipeline, CodecError, PipelineError};

/// Errors from one inference request.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// A blocking worker panicked or was cancelled. Carries the stage name
    /// only; the panic payload is logged, never returned.
    #[error("Background {0} task failed")]
    TaskPanicked(&'static str),
}

impl InferenceError {
    /// The request payload could not be decoded.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Codec(CodecError::Malformed))
    }

    /// The configured model or task cannot be served.
    pub const fn is_unavailable(&self) -> bool {
        matches!(self, Self::Pipeline(e) if e.is_unavailable())
    }
}

/// Outcome of a successful request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceReport {
    /// Envelope items, one per pipeline output, in pipeline order.
    pub blobs: Vec<AudioBlob>,
    /// Wall time spent decoding, running and encoding.
    pub compute_time: Duration,
    /// Length of the decoded input.
    pub audio_length: Duration,
}

/// Serves the configured audio-to-audio model.
pub struct AudioToAudioService {
    config: InferenceConfig,
    registry: Arc<PipelineRegistry>,
    decoder: Arc<dyn AudioDecoder>,
    encoder: Arc<dyn AudioEncoder>,
}

impl AudioToAudioService {
    pub fn new(
        config: InferenceConfig,
        registry: Arc<PipelineRegistry>,
        decoder: Arc<dyn AudioDecoder>,
        encoder: Arc<dyn AudioEncoder>,
    ) -> Self {
        Self {
            config,
            registry,
            decoder,
            encoder,
        }
    }

    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<PipelineRegistry> {
        &self.registry
    }

    /// Load the configured pipeline without running it.
    pub async fn warm_up(&self) -> Result<(), InferenceError> {
        self.pipeline().await.map(|_| ())
    }

    /// Run the configured pipeline over an encoded audio payload.
    pub async fn process(&self, payload: Vec<u8>) -> Result<InferenceReport, InferenceError> {
        if payload.is_empty() {
            return Err(CodecError::Malformed.into());
        }

        let started = Instant::now();
        let pipeline = self.pipeline().await?;
        let sampling_rate = pipeline.sampling_rate();

        let decoder = Arc::clone(&self.decoder);
        let payload_len = payload.len();
        let waveform = tokio::task::spawn_blocking(move || decoder.decode(payload, sampling_rate))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    tracing::warn!(error = %e, bytes = payload_len, "Decoder panicked on payload");
                    InferenceError::Codec(CodecError::Malformed)
                } else {
                    join_failed("decode", &e)
                }
            })??;
        if waveform.is_empty() {
            return Err(CodecError::Malformed.into());
        }
        let audio_length = waveform.duration();
        tracing::debug!(
            bytes = payload_len,
            samples = waveform.len(),
            sample_rate = waveform.sample_rate,
            "Decoded request audio"
        );

        let encoder = Arc::clone(&self.encoder);
        let blobs = tokio::task::spawn_blocking(move || {
            let output = pipeline.run(&waveform.samples)?;
            output.validate()?;
            encode_outputs(encoder.as_ref(), &output)
        })
        .await
        .map_err(|e| join_failed("inference", &e))??;

        let compute_time = started.elapsed();
        tracing::debug!(
            outputs = blobs.len(),
            compute_ms = compute_time.as_millis(),
            "Inference complete"
        );

        Ok(InferenceReport {
            blobs,
            compute_time,
            audio_length,
        })
    }

    async fn pipeline(&self) -> Result<Arc<dyn AudioToAudioPipeline>, InferenceError> {
        let registry = Arc::clone(&self.registry);
        let model_id = self.config.model_id.clone();
        let task = self.config.task;
        let pipeline = tokio::task::spawn_blocking(move || registry.get(&model_id, task))
            .await
            .map_err(|e| join_failed("load", &e))??;
        Ok(pipeline)
    }
}

fn join_failed(stage: &'static str, err: &tokio::task::JoinError) -> InferenceError {
    tracing::error!(stage, error = %err, "Blocking task failed");
    InferenceError::TaskPanicked(stage)
}

fn encode_outputs(
    encoder: &dyn AudioEncoder,
    output: &PipelineOutput,
) -> Result<Vec<AudioBlob>, InferenceError> {
    output
        .iter()
        .map(|(label, samples)| {
            let encoded = encoder.encode(samples, output.sampling_rate)?;
            Ok(AudioBlob {
                blob: STANDARD.encode(&encoded.bytes),
                content_type: encoded.content_type,
                label: label.to_string(),
            })
        })
        .collect()
}
