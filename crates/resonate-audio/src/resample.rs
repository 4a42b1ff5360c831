//! Channel downmix and sample-rate conversion.

use resonate_core::CodecError;
use rubato::{FftFixedIn, Resampler as _};

const CHUNK_SIZE: usize = 1024;

/// Average interleaved frames down to a single channel.
///
/// A trailing partial frame is dropped.
pub fn downmix_to_mono(samples: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }
    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / channels as f32;
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect()
}

/// Resample mono audio from one sample rate to another using FFT-based resampling.
///
/// Input is fed in fixed chunks; the last chunk is zero-padded and only the
/// proportional share of its output is kept.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, CodecError> {
    if samples.is_empty() || from_rate == to_rate {
        return Ok(samples.to_vec());
    }
    if from_rate == 0 || to_rate == 0 {
        return Err(CodecError::Resample(format!(
            "cannot resample {from_rate} Hz to {to_rate} Hz"
        )));
    }

    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        2, // sub-chunks
        1, // mono
    )
    .map_err(|e| CodecError::Resample(e.to_string()))?;

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let expected =
        (samples.len() as f64 * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize;
    let mut output = Vec::with_capacity(expected);

    let mut chunks = samples.chunks_exact(CHUNK_SIZE);
    for chunk in &mut chunks {
        let result = resampler
            .process(&[chunk], None)
            .map_err(|e| CodecError::Resample(e.to_string()))?;
        if let Some(channel) = result.first() {
            output.extend_from_slice(channel);
        }
    }

    let remaining = chunks.remainder();
    if !remaining.is_empty() {
        let mut padded = vec![0.0f32; CHUNK_SIZE];
        padded[..remaining.len()].copy_from_slice(remaining);

        let result = resampler
            .process(&[&padded], None)
            .map_err(|e| CodecError::Resample(e.to_string()))?;
        if let Some(channel) = result.first() {
            #[allow(
                clippy::cast_precision_loss,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss
            )]
            let output_len = (remaining.len() as f64 * f64::from(to_rate) / f64::from(from_rate))
                .ceil() as usize;
            let take = output_len.min(channel.len());
            output.extend_from_slice(&channel[..take]);
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downmix_averages_frames() {
        let stereo = [1.0, 0.0, 0.5, 0.5, -1.0, 1.0];
        assert_eq!(downmix_to_mono(&stereo, 2), vec![0.5, 0.5, 0.0]);
    }

    #[test]
    fn test_downmix_drops_partial_frame() {
        let stereo = [1.0, 1.0, 0.25];
        assert_eq!(downmix_to_mono(&stereo, 2), vec![1.0]);
    }

    #[test]
    fn test_downmix_mono_is_passthrough() {
        let mono = [0.1, 0.2];
        assert_eq!(downmix_to_mono(&mono, 1), mono.to_vec());
    }

    #[test]
    fn test_resample_same_rate_is_passthrough() {
        let input = vec![0.25; 300];
        assert_eq!(resample(&input, 16_000, 16_000).unwrap(), input);
    }

    #[test]
    fn test_resample_44100_to_16000_length() {
        let input = vec![0.0f32; 44_100];
        let output = resample(&input, 44_100, 16_000).unwrap();
        // Whole chunks plus the proportional tail: within one chunk of 16000.
        let expected = 16_000usize;
        assert!(output.len().abs_diff(expected) < CHUNK_SIZE, "got {}", output.len());
    }

    #[test]
    fn test_resample_48000_to_16000_short_input() {
        let input = vec![0.1f32; 500];
        let output = resample(&input, 48_000, 16_000).unwrap();
        assert!(!output.is_empty());
        assert!(output.len() <= 500);
    }

    #[test]
    fn test_resample_rejects_zero_rate() {
        let err = resample(&[0.0; 10], 0, 16_000).unwrap_err();
        assert!(matches!(err, CodecError::Resample(_)));
    }
}
