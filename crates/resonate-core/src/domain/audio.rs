//! Audio value types shared by ports and services.

use std::time::Duration;

/// Sampling rate used by the built-in pipelines and by response validation.
pub const DEFAULT_SAMPLING_RATE: u32 = 16_000;

/// Mono PCM audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Waveform {
    /// Samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Samples per second.
    pub sample_rate: u32,
}

impl Waveform {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length. Zero when the sample rate is zero.
    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        #[allow(clippy::cast_precision_loss)]
        Duration::from_secs_f64(self.samples.len() as f64 / f64::from(self.sample_rate))
    }
}

/// Encoded audio bytes together with their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

/// Result of one pipeline pass.
///
/// `waveforms[i]` is labelled by `labels[i]`; all waveforms share
/// `sampling_rate`.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    pub waveforms: Vec<Vec<f32>>,
    pub sampling_rate: u32,
    pub labels: Vec<String>,
}

impl PipelineOutput {
    /// Output with a single labelled waveform.
    pub fn single(samples: Vec<f32>, sampling_rate: u32, label: impl Into<String>) -> Self {
        Self {
            waveforms: vec![samples],
            sampling_rate,
            labels: vec![label.into()],
        }
    }

    /// Iterate `(label, samples)` pairs in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.waveforms.iter().map(Vec::as_slice))
    }
}
