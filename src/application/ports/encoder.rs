//! PCM encoder port interfaces

use thiserror::Error;

use crate::domain::audio::{EncodedBlob, Int16Samples, PcmBuffer};

/// Encoding errors
#[derive(Debug, Clone, Error)]
pub enum EncodeError {
    #[error("No samples to encode")]
    EmptyInput,

    #[error("Failed to create encoder: {0}")]
    EncoderInit(String),

    #[error("Encoding failed: {0}")]
    EncodeFailed(String),

    #[error("Failed to write container: {0}")]
    WriteFailed(String),
}

/// Port for MP3 encoding of mono 16-bit samples.
///
/// Encoding is CPU-bound and synchronous; callers that care about
/// responsiveness run it off the async executor.
pub trait Mp3Encoder: Send + Sync {
    /// Encode mono samples at `sample_rate` into a complete MP3 stream
    fn encode(&self, samples: &Int16Samples, sample_rate: u32) -> Result<EncodedBlob, EncodeError>;
}

/// Port for single-channel 16-bit WAV encoding
pub trait WavEncoder: Send + Sync {
    /// Wrap already-quantized samples in a WAV container
    fn encode_samples(
        &self,
        samples: &Int16Samples,
        sample_rate: u32,
    ) -> Result<EncodedBlob, EncodeError>;

    /// Quantize channel 0 of `pcm` and wrap it in a WAV container
    fn encode_pcm(&self, pcm: &PcmBuffer) -> Result<EncodedBlob, EncodeError> {
        self.encode_samples(&pcm.to_mono_i16(), pcm.sample_rate())
    }
}
