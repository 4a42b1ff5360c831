//! WAV output.

use std::io::Cursor;

use resonate_core::{AudioEncoder, CodecError, EncodedAudio};

/// MIME type of [`WavEncoder`] output.
pub const WAV_CONTENT_TYPE: &str = "audio/wav";

/// [`AudioEncoder`] producing 16-bit PCM mono WAV files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavEncoder;

impl WavEncoder {
    pub const fn new() -> Self {
        Self
    }
}

impl AudioEncoder for WavEncoder {
    fn content_type(&self) -> &'static str {
        WAV_CONTENT_TYPE
    }

    fn encode(&self, samples: &[f32], sample_rate: u32) -> Result<EncodedAudio, CodecError> {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut cursor = Cursor::new(Vec::with_capacity(44 + samples.len() * 2));
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).map_err(|e| CodecError::Encode(e.to_string()))?;
        for &sample in samples {
            writer
                .write_sample(to_i16(sample))
                .map_err(|e| CodecError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| CodecError::Encode(e.to_string()))?;

        Ok(EncodedAudio {
            bytes: cursor.into_inner(),
            content_type: WAV_CONTENT_TYPE.to_string(),
        })
    }
}

#[allow(clippy::cast_possible_truncation)]
fn to_i16(sample: f32) -> i16 {
    let clamped = if sample.is_finite() {
        sample.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    (clamped * f32::from(i16::MAX)).round() as i16
}
