use resonate_core::{AudioToAudioPipeline, PipelineError, PipelineOutput};

use super::PIPELINE_SAMPLE_RATE;

/// Returns its input unchanged under the label `audio`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl AudioToAudioPipeline for Identity {
    fn sampling_rate(&self) -> u32 {
        PIPELINE_SAMPLE_RATE
    }

    fn run(&self, input: &[f32]) -> Result<PipelineOutput, PipelineError> {
        Ok(PipelineOutput::single(
            input.to_vec(),
            PIPELINE_SAMPLE_RATE,
            "audio",
        ))
    }
}
