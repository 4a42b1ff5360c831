//! Frame-based noise gate used as a lightweight speech enhancer.
//!
//! The signal is cut into 20 ms frames. The noise floor is the 10th
//! percentile of frame RMS values, and frames below `floor * threshold_ratio`
//! are attenuated. The gain moves towards its per-frame target with separate
//! attack and release time constants so the gate does not click.

use resonate_core::{AudioToAudioPipeline, PipelineError, PipelineOutput};

use super::PIPELINE_SAMPLE_RATE;

const FRAME_MS: u32 = 20;
const FLOOR_PERCENTILE: f32 = 0.10;

/// Noise gate parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseGate {
    /// Frames louder than `noise floor * threshold_ratio` pass unchanged.
    pub threshold_ratio: f32,
    /// Gain applied to gated frames.
    pub attenuation: f32,
    pub attack_ms: f32,
    pub release_ms: f32,
}

impl Default for NoiseGate {
    fn default() -> Self {
        Self {
            threshold_ratio: 2.0,
            attenuation: 0.1,
            attack_ms: 5.0,
            release_ms: 50.0,
        }
    }
}

impl NoiseGate {
    fn frame_len() -> usize {
        (PIPELINE_SAMPLE_RATE * FRAME_MS / 1000) as usize
    }

    /// Per-frame gain targets for `input`.
    fn frame_targets(&self, input: &[f32]) -> Vec<f32> {
        let rms: Vec<f32> = input.chunks(Self::frame_len()).map(frame_rms).collect();
        let floor = percentile(&rms, FLOOR_PERCENTILE);
        let threshold = floor * self.threshold_ratio;
        tracing::trace!(floor, threshold, frames = rms.len(), "Noise gate levels");

        rms.iter()
            .map(|&level| {
                if level > threshold {
                    1.0
                } else {
                    self.attenuation
                }
            })
            .collect()
    }

    fn apply(&self, input: &[f32]) -> Vec<f32> {
        if input.is_empty() {
            return Vec::new();
        }
        let targets = self.frame_targets(input);
        let attack = smoothing_coefficient(self.attack_ms);
        let release = smoothing_coefficient(self.release_ms);
        let frame_len = Self::frame_len();

        let mut gain = targets.first().copied().unwrap_or(1.0);
        input
            .iter()
            .enumerate()
            .map(|(i, &sample)| {
                let target = targets[i / frame_len];
                let coeff = if target > gain { attack } else { release };
                gain += coeff * (target - gain);
                sample * gain
            })
            .collect()
    }
}

impl AudioToAudioPipeline for NoiseGate {
    fn sampling_rate(&self) -> u32 {
        PIPELINE_SAMPLE_RATE
    }

    fn run(&self, input: &[f32]) -> Result<PipelineOutput, PipelineError> {
        Ok(PipelineOutput::single(
            self.apply(input),
            PIPELINE_SAMPLE_RATE,
            "enhanced",
        ))
    }
}

fn frame_rms(frame: &[f32]) -> f32 {
    if frame.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean_sq = frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32;
    mean_sq.sqrt()
}

fn percentile(values: &[f32], fraction: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f32::total_cmp);
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    let index = ((sorted.len() - 1) as f32 * fraction).round() as usize;
    sorted[index.min(sorted.len() - 1)]
}

/// One-pole smoothing coefficient for a time constant in milliseconds.
fn smoothing_coefficient(time_ms: f32) -> f32 {
    if time_ms <= 0.0 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let samples = time_ms * PIPELINE_SAMPLE_RATE as f32 / 1000.0;
    1.0 - (-1.0 / samples).exp()
}
