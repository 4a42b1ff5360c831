//! Container-agnostic decoding through symphonia.
//!
//! The payload is probed by content (no file extension is available for
//! request bodies). The first track with a known codec is decoded; video
//! tracks in WebM/Matroska files are skipped this way. All channels are
//! averaged to mono and the result is resampled to the requested rate.

use std::io::{Cursor, ErrorKind};
use std::panic;

use resonate_core::{AudioDecoder, CodecError, Waveform};
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{CODEC_TYPE_NULL, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSourceStream, MediaSourceStreamOptions};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::resample::{downmix_to_mono, resample};

/// Mono PCM at the stream's native rate.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Channel count of the source track before downmixing.
    pub channels: usize,
}

/// [`AudioDecoder`] backed by symphonia's default codec and format registries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub const fn new() -> Self {
        Self
    }

    /// Decode to mono without resampling.
    ///
    /// Some demuxers assert on corrupt input instead of returning an error;
    /// such a panic is reported as [`CodecError::Malformed`].
    pub fn decode_native(&self, bytes: Vec<u8>) -> Result<DecodedAudio, CodecError> {
        let len = bytes.len();
        let decoded = panic::catch_unwind(move || read_first_audio_track(bytes))
            .map_err(|_| {
                tracing::debug!(bytes = len, "Demuxer panicked on payload");
                CodecError::Malformed
            })?
            .map_err(|e| {
                tracing::debug!(error = %e, bytes = len, "Payload is not decodable audio");
                CodecError::Malformed
            })?;
        if decoded.samples.is_empty() || decoded.sample_rate == 0 {
            tracing::debug!(bytes = len, "Payload decoded to no audio");
            return Err(CodecError::Malformed);
        }
        Ok(decoded)
    }
}

impl AudioDecoder for SymphoniaDecoder {
    fn decode(&self, bytes: Vec<u8>, target_rate: u32) -> Result<Waveform, CodecError> {
        let native = self.decode_native(bytes)?;
        tracing::debug!(
            channels = native.channels,
            sample_rate = native.sample_rate,
            samples = native.samples.len(),
            target_rate,
            "Decoded audio track"
        );
        let samples = resample(&native.samples, native.sample_rate, target_rate).map_err(|e| {
            tracing::debug!(error = %e, sample_rate = native.sample_rate, "Cannot resample payload");
            CodecError::Malformed
        })?;
        if samples.is_empty() {
            return Err(CodecError::Malformed);
        }
        Ok(Waveform::new(samples, target_rate))
    }
}

fn read_first_audio_track(bytes: Vec<u8>) -> Result<DecodedAudio, SymphoniaError> {
    let source = Cursor::new(bytes);
    let mss = MediaSourceStream::new(Box::new(source), MediaSourceStreamOptions::default());

    let probed = symphonia::default::get_probe().format(
        &Hint::new(),
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(SymphoniaError::Unsupported("no audio track"))?;
    let track_id = track.id;
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track.codec_params.channels.map_or(1, |c| c.count());
    let mut samples = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) if !samples.is_empty() => {
                tracing::debug!(error = %e, "Stopping at unreadable trailing data");
                break;
            }
            Err(e) => return Err(e),
        };
        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                tracing::debug!(reason, "Skipping corrupt packet");
                continue;
            }
            Err(e) => return Err(e),
        };
        if decoded.frames() == 0 {
            continue;
        }

        let spec = *decoded.spec();
        sample_rate = spec.rate;
        channels = spec.channels.count().max(1);

        let mut buffer = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        buffer.copy_interleaved_ref(decoded);
        samples.extend(downmix_to_mono(buffer.samples(), channels));
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}
