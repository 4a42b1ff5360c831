//! Two-band split used as a stand-in source separator.
//!
//! `low` is the input through a one-pole low-pass filter; `high` is the
//! residual, so `low + high` reconstructs the input exactly.

use std::f32::consts::PI;

use resonate_core::{AudioToAudioPipeline, PipelineError, PipelineOutput};

use super::PIPELINE_SAMPLE_RATE;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSplit {
    pub cutoff_hz: f32,
}

impl Default for BandSplit {
    fn default() -> Self {
        Self { cutoff_hz: 1_000.0 }
    }
}

impl BandSplit {
    fn alpha(&self) -> f32 {
        #[allow(clippy::cast_precision_loss)]
        let dt = 1.0 / PIPELINE_SAMPLE_RATE as f32;
        let rc = 1.0 / (2.0 * PI * self.cutoff_hz);
        dt / (rc + dt)
    }
}

impl AudioToAudioPipeline for BandSplit {
    fn sampling_rate(&self) -> u32 {
        PIPELINE_SAMPLE_RATE
    }

    fn run(&self, input: &[f32]) -> Result<PipelineOutput, PipelineError> {
        if self.cutoff_hz.is_nan() || self.cutoff_hz <= 0.0 {
            return Err(PipelineError::Inference(format!(
                "invalid cutoff {} Hz",
                self.cutoff_hz
            )));
        }
        let alpha = self.alpha();

        let mut state = 0.0f32;
        let low: Vec<f32> = input
            .iter()
            .map(|&x| {
                state += alpha * (x - state);
                state
            })
            .collect();
        let high = input.iter().zip(&low).map(|(x, l)| x - l).collect();

        Ok(PipelineOutput {
            waveforms: vec![low, high],
            sampling_rate: PIPELINE_SAMPLE_RATE,
            labels: vec!["low".to_string(), "high".to_string()],
        })
    }
}
