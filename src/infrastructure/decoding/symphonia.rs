//! In-process decoder using Symphonia
//!
//! Handles the formats Symphonia ships demuxers and codecs for (WAV, MP3,
//! AAC in MP4/M4A, FLAC, Vorbis). Opus recordings need the FFmpeg-backed
//! decoder instead; for those this backend reports `UnsupportedCodec`.

use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{DecodeError, PcmDecoder};
use crate::domain::audio::{AudioMimeType, PcmBuffer, RawRecording};

/// Symphonia-backed PCM decoder
#[derive(Debug, Clone, Copy, Default)]
pub struct SymphoniaDecoder;

impl SymphoniaDecoder {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PcmDecoder for SymphoniaDecoder {
    async fn decode(&self, recording: &RawRecording) -> Result<PcmBuffer, DecodeError> {
        if recording.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let data = recording.shared_data();
        let mime_type = recording.mime_type();

        tokio::task::spawn_blocking(move || decode_bytes(data, mime_type))
            .await
            .map_err(|e| DecodeError::Backend(format!("decoder task failed: {}", e)))?
    }
}

/// Decode a complete compressed stream into planar f32 PCM
pub fn decode_bytes(data: Arc<[u8]>, mime_type: AudioMimeType) -> Result<PcmBuffer, DecodeError> {
    if data.is_empty() {
        return Err(DecodeError::EmptyInput);
    }

    let mss = MediaSourceStream::new(Box::new(Cursor::new(data)), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(mime_type.extension());
    hint.mime_type(mime_type.as_str());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| DecodeError::Unrecognized(e.to_string()))?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::NoAudioTrack)?;
    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| match e {
            SymphoniaError::Unsupported(what) => DecodeError::UnsupportedCodec(what.to_string()),
            other => DecodeError::Backend(other.to_string()),
        })?;

    let mut channels: Vec<Vec<f32>> = Vec::new();
    let mut skipped_packets = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(DecodeError::Corrupt(e.to_string())),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(reason)) => {
                skipped_packets += 1;
                tracing::debug!(reason, "skipping undecodable packet");
                continue;
            }
            Err(e) => return Err(DecodeError::Corrupt(e.to_string())),
        };

        let spec = *decoded.spec();
        let channel_count = spec.channels.count();
        if channel_count == 0 || decoded.frames() == 0 {
            continue;
        }
        if channels.is_empty() {
            channels = vec![Vec::new(); channel_count];
        }
        sample_rate.get_or_insert(spec.rate);

        let mut interleaved = SampleBuffer::<f32>::new(decoded.capacity() as u64, spec);
        interleaved.copy_interleaved_ref(decoded);

        for frame in interleaved.samples().chunks(channel_count) {
            for (out, &sample) in channels.iter_mut().zip(frame) {
                out.push(sample);
            }
        }
    }

    if skipped_packets > 0 {
        tracing::warn!(skipped_packets, "some packets could not be decoded");
    }

    if channels.first().map_or(true, Vec::is_empty) {
        return Err(DecodeError::NoSamples);
    }

    let sample_rate = sample_rate
        .ok_or_else(|| DecodeError::Corrupt("stream does not declare a sample rate".to_string()))?;

    Ok(PcmBuffer::new(sample_rate, channels)?)
}
