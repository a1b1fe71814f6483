//! Container transcoding port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::{ContainerFormat, EncodedBlob, RawRecording};

/// Transcoding errors. Every variant names the format that was attempted.
#[derive(Debug, Clone, Error)]
pub enum TranscodeError {
    #[error("Transcoding engine failed to load for {format}: {message}")]
    EngineLoad {
        format: ContainerFormat,
        message: String,
    },

    #[error("Failed to stage input for {format}: {message}")]
    InputWrite {
        format: ContainerFormat,
        message: String,
    },

    #[error("Transcode to {format} failed: {message}")]
    RunFailed {
        format: ContainerFormat,
        message: String,
    },

    #[error("Failed to read {format} output: {message}")]
    OutputRead {
        format: ContainerFormat,
        message: String,
    },
}

impl TranscodeError {
    /// The target format this error was raised for
    pub fn format(&self) -> ContainerFormat {
        match self {
            Self::EngineLoad { format, .. }
            | Self::InputWrite { format, .. }
            | Self::RunFailed { format, .. }
            | Self::OutputRead { format, .. } => *format,
        }
    }
}

/// Port for re-encoding the original compressed bytes into another container
#[async_trait]
pub trait ContainerTranscoder: Send + Sync {
    /// Transcode a recording.
    ///
    /// # Arguments
    /// * `recording` - The original compressed recording (not decoded PCM)
    /// * `format` - Target container
    ///
    /// # Returns
    /// The complete encoded file, or an error naming `format`
    async fn transcode(
        &self,
        recording: &RawRecording,
        format: ContainerFormat,
    ) -> Result<EncodedBlob, TranscodeError>;
}
