//! PCM decoding port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{PcmBuffer, RawRecording};
use crate::domain::error::InvalidPcmError;

/// Decoding errors
#[derive(Debug, Clone, Error)]
pub enum DecodeError {
    #[error("Recording is empty")]
    EmptyInput,

    #[error("Not a recognized audio stream: {0}")]
    Unrecognized(String),

    #[error("No audio track found")]
    NoAudioTrack,

    #[error("Unsupported codec: {0}")]
    UnsupportedCodec(String),

    #[error("Corrupt audio stream: {0}")]
    Corrupt(String),

    #[error("Audio stream contains no samples")]
    NoSamples,

    #[error("Decoded audio is invalid: {0}")]
    InvalidPcm(#[from] InvalidPcmError),

    #[error("Decoder backend failed: {0}")]
    Backend(String),
}

/// Port for turning a compressed recording into PCM
#[async_trait]
pub trait PcmDecoder: Send + Sync {
    /// Decode the whole recording.
    ///
    /// # Arguments
    /// * `recording` - The compressed recording; never modified
    ///
    /// # Returns
    /// PCM with one f32 sequence per channel, or an error if the bytes are
    /// not a parseable audio stream
    async fn decode(&self, recording: &RawRecording) -> Result<PcmBuffer, DecodeError>;
}

/// Blanket implementation for boxed decoder types
#[async_trait]
impl PcmDecoder for Box<dyn PcmDecoder> {
    async fn decode(&self, recording: &RawRecording) -> Result<PcmBuffer, DecodeError> {
        self.as_ref().decode(recording).await
    }
}
