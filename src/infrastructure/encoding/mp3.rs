//! MP3 encoder backed by LAME
//!
//! Settings:
//! - Mono input (channel 0 of the decoded recording)
//! - 128 kbps constant bitrate by default
//! - Source sample rate passed straight through to LAME
//!
//! Samples are fed in blocks of 1152 (two 576-sample granules, one MPEG-1
//! frame). The encoder keeps state between blocks, so blocks must be fed
//! in order.

use mp3lame_encoder::{max_required_buffer_size, Bitrate, Builder, FlushNoGap, MonoPcm, Quality};

use crate::application::ports::{EncodeError, Mp3Encoder};
use crate::domain::audio::{AudioMimeType, EncodedBlob, Int16Samples};

/// Samples handed to the encoder per call
pub const MP3_BLOCK_SIZE: usize = 1152;

/// Default constant bitrate
pub const DEFAULT_BITRATE_KBPS: u32 = 128;

/// Room LAME needs for the final flush
const FLUSH_BUFFER_LEN: usize = 7200;

/// Snap a requested bitrate down to the nearest LAME CBR step
fn bitrate_for(kbps: u32) -> Bitrate {
    match kbps {
        0..=15 => Bitrate::Kbps8,
        16..=23 => Bitrate::Kbps16,
        24..=31 => Bitrate::Kbps24,
        32..=39 => Bitrate::Kbps32,
        40..=47 => Bitrate::Kbps40,
        48..=63 => Bitrate::Kbps48,
        64..=79 => Bitrate::Kbps64,
        80..=95 => Bitrate::Kbps80,
        96..=111 => Bitrate::Kbps96,
        112..=127 => Bitrate::Kbps112,
        128..=159 => Bitrate::Kbps128,
        160..=191 => Bitrate::Kbps160,
        192..=223 => Bitrate::Kbps192,
        224..=255 => Bitrate::Kbps224,
        256..=319 => Bitrate::Kbps256,
        _ => Bitrate::Kbps320,
    }
}

/// Encode mono PCM samples to an MP3 byte stream
pub fn encode_to_mp3(
    samples: &[i16],
    sample_rate: u32,
    bitrate_kbps: u32,
) -> Result<Vec<u8>, EncodeError> {
    if samples.is_empty() {
        return Err(EncodeError::EmptyInput);
    }
    if sample_rate == 0 {
        return Err(EncodeError::EncoderInit(
            "sample rate must be greater than zero".to_string(),
        ));
    }

    let mut builder = Builder::new()
        .ok_or_else(|| EncodeError::EncoderInit("LAME could not allocate an encoder".to_string()))?;
    builder
        .set_num_channels(1)
        .map_err(|e| EncodeError::EncoderInit(format!("channels: {:?}", e)))?;
    builder
        .set_sample_rate(sample_rate)
        .map_err(|e| EncodeError::EncoderInit(format!("sample rate {}: {:?}", sample_rate, e)))?;
    builder
        .set_brate(bitrate_for(bitrate_kbps))
        .map_err(|e| EncodeError::EncoderInit(format!("bitrate {}: {:?}", bitrate_kbps, e)))?;
    builder
        .set_quality(Quality::Best)
        .map_err(|e| EncodeError::EncoderInit(format!("quality: {:?}", e)))?;

    let mut encoder = builder.build().map_err(|e| {
        EncodeError::EncoderInit(format!(
            "{} Hz mono at {} kbps: {:?}",
            sample_rate, bitrate_kbps, e
        ))
    })?;

    let mut chunks: Vec<Vec<u8>> = Vec::with_capacity(samples.len() / MP3_BLOCK_SIZE + 2);

    for block in samples.chunks(MP3_BLOCK_SIZE) {
        let mut frame_data = Vec::with_capacity(max_required_buffer_size(block.len()));
        encoder
            .encode_to_vec(MonoPcm(block), &mut frame_data)
            .map_err(|e| EncodeError::EncodeFailed(format!("{:?}", e)))?;
        if !frame_data.is_empty() {
            chunks.push(frame_data);
        }
    }

    let mut tail = Vec::with_capacity(FLUSH_BUFFER_LEN);
    encoder
        .flush_to_vec::<FlushNoGap>(&mut tail)
        .map_err(|e| EncodeError::EncodeFailed(format!("flush: {:?}", e)))?;
    if !tail.is_empty() {
        chunks.push(tail);
    }

    Ok(chunks.concat())
}

/// LAME-backed MP3 encoder adapter
#[derive(Debug, Clone, Copy)]
pub struct LameMp3Encoder {
    bitrate_kbps: u32,
}

impl LameMp3Encoder {
    /// Create an encoder at the default 128 kbps
    pub fn new() -> Self {
        Self {
            bitrate_kbps: DEFAULT_BITRATE_KBPS,
        }
    }

    pub fn bitrate_kbps(&self) -> u32 {
        self.bitrate_kbps
    }
}

impl Default for LameMp3Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Mp3Encoder for LameMp3Encoder {
    fn encode(&self, samples: &Int16Samples, sample_rate: u32) -> Result<EncodedBlob, EncodeError> {
        let data = encode_to_mp3(samples.as_slice(), sample_rate, self.bitrate_kbps)?;
        tracing::debug!(
            samples = samples.len(),
            sample_rate,
            bitrate_kbps = self.bitrate_kbps,
            bytes = data.len(),
            "encoded mp3"
        );
        Ok(EncodedBlob::new(data, AudioMimeType::Mp3))
    }
}
