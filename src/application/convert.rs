//! Convert recording use case (format dispatcher)

use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration as StdDuration, Instant};

use thiserror::Error;

use crate::domain::audio::{ContainerFormat, EncodedBlob, PcmBuffer, RawRecording, TargetFormat};
use crate::domain::error::UnsupportedFormatError;

use super::ports::{
    ContainerTranscoder, DecodeError, EncodeError, Mp3Encoder, PcmDecoder, TranscodeError,
    WavEncoder,
};

/// Pipeline stage, used to tag failures and report progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Decode,
    Encode,
    Transcode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Decode => "decode",
            Self::Encode => "encode",
            Self::Transcode => "transcode",
        };
        write!(f, "{}", name)
    }
}

/// Errors from the convert use case
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    UnsupportedFormat(#[from] UnsupportedFormatError),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Transcode failed: {0}")]
    Transcode(#[from] TranscodeError),

    #[error("The {stage} stage timed out after {timeout:?}")]
    TimedOut { stage: Stage, timeout: StdDuration },
}

impl ConvertError {
    /// The stage that failed, if the request got past validation
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::UnsupportedFormat(_) => None,
            Self::Decode(_) => Some(Stage::Decode),
            Self::Encode(_) => Some(Stage::Encode),
            Self::Transcode(_) => Some(Stage::Transcode),
            Self::TimedOut { stage, .. } => Some(*stage),
        }
    }
}

/// A single download request: the recording plus the requested format name
#[derive(Debug, Clone)]
pub struct EncodeRequest {
    pub recording: RawRecording,
    /// Requested format, validated by the use case
    pub target: String,
}

impl EncodeRequest {
    pub fn new(recording: RawRecording, target: impl Into<String>) -> Self {
        Self {
            recording,
            target: target.into(),
        }
    }

    /// Build a request for an already-validated format
    pub fn for_format(recording: RawRecording, format: TargetFormat) -> Self {
        Self::new(recording, format.as_str())
    }
}

/// Callbacks for progress updates
#[derive(Default)]
#[allow(clippy::type_complexity)]
pub struct ConvertCallbacks {
    /// Called when a stage starts
    pub on_stage_start: Option<Box<dyn Fn(Stage) + Send + Sync>>,
    /// Called when a stage finishes, with its wall-clock time
    pub on_stage_end: Option<Box<dyn Fn(Stage, StdDuration) + Send + Sync>>,
}

impl ConvertCallbacks {
    fn start(&self, stage: Stage) {
        if let Some(ref cb) = self.on_stage_start {
            cb(stage);
        }
    }

    fn end(&self, stage: Stage, started: Instant) {
        if let Some(ref cb) = self.on_stage_end {
            cb(stage, started.elapsed());
        }
    }
}

/// Format dispatcher: picks the decode/encode path or the container
/// transcoder for the requested format.
///
/// Holds no per-call state; one instance can serve concurrent requests.
/// Failures are never retried and never fall back to another format.
pub struct ConvertRecordingUseCase<D, M, W, T>
where
    D: PcmDecoder,
    M: Mp3Encoder + 'static,
    W: WavEncoder + 'static,
    T: ContainerTranscoder,
{
    decoder: D,
    mp3: Arc<M>,
    wav: Arc<W>,
    transcoder: T,
    timeout: Option<StdDuration>,
}

impl<D, M, W, T> ConvertRecordingUseCase<D, M, W, T>
where
    D: PcmDecoder,
    M: Mp3Encoder + 'static,
    W: WavEncoder + 'static,
    T: ContainerTranscoder,
{
    /// Create a new use case instance
    pub fn new(decoder: D, mp3: M, wav: W, transcoder: T) -> Self {
        Self {
            decoder,
            mp3: Arc::new(mp3),
            wav: Arc::new(wav),
            transcoder,
            timeout: None,
        }
    }

    /// Bound the decode and transcode stages
    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Convert a recording into the requested format.
    ///
    /// Dropping the returned future abandons the conversion; nothing partial
    /// is ever returned.
    pub async fn execute(
        &self,
        request: &EncodeRequest,
        callbacks: &ConvertCallbacks,
    ) -> Result<EncodedBlob, ConvertError> {
        let format: TargetFormat = request.target.parse()?;
        let recording = &request.recording;
        let started = Instant::now();

        tracing::debug!(
            %format,
            input_mime = %recording.mime_type(),
            input_bytes = recording.size_bytes(),
            "converting recording"
        );

        let blob = match format {
            TargetFormat::Mp3 => {
                let pcm = self.decode(recording, callbacks).await?;
                let mp3 = Arc::clone(&self.mp3);
                self.encode(callbacks, move || {
                    let samples = pcm.to_mono_i16();
                    mp3.encode(&samples, pcm.sample_rate())
                })
                .await?
            }
            TargetFormat::Wav => {
                let pcm = self.decode(recording, callbacks).await?;
                let wav = Arc::clone(&self.wav);
                self.encode(callbacks, move || wav.encode_pcm(&pcm)).await?
            }
            TargetFormat::M4a => {
                self.transcode(recording, ContainerFormat::M4a, callbacks)
                    .await?
            }
            TargetFormat::Caf => {
                self.transcode(recording, ContainerFormat::Caf, callbacks)
                    .await?
            }
        };

        tracing::info!(
            %format,
            output_bytes = blob.size_bytes(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "conversion complete"
        );

        Ok(blob)
    }

    async fn decode(
        &self,
        recording: &RawRecording,
        callbacks: &ConvertCallbacks,
    ) -> Result<PcmBuffer, ConvertError> {
        callbacks.start(Stage::Decode);
        let started = Instant::now();

        let pcm = self
            .bounded(Stage::Decode, async {
                self.decoder.decode(recording).await.map_err(ConvertError::from)
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "decode failed"))?;

        tracing::debug!(
            sample_rate = pcm.sample_rate(),
            channels = pcm.channel_count(),
            frames = pcm.frames(),
            "decoded recording"
        );
        callbacks.end(Stage::Decode, started);
        Ok(pcm)
    }

    /// Run a CPU-bound encoder on the blocking pool
    async fn encode<F>(
        &self,
        callbacks: &ConvertCallbacks,
        job: F,
    ) -> Result<EncodedBlob, ConvertError>
    where
        F: FnOnce() -> Result<EncodedBlob, EncodeError> + Send + 'static,
    {
        callbacks.start(Stage::Encode);
        let started = Instant::now();

        let blob = tokio::task::spawn_blocking(job)
            .await
            .map_err(|e| EncodeError::EncodeFailed(format!("encoder task aborted: {}", e)))?
            .inspect_err(|e| tracing::warn!(error = %e, "encode failed"))?;

        callbacks.end(Stage::Encode, started);
        Ok(blob)
    }

    async fn transcode(
        &self,
        recording: &RawRecording,
        format: ContainerFormat,
        callbacks: &ConvertCallbacks,
    ) -> Result<EncodedBlob, ConvertError> {
        callbacks.start(Stage::Transcode);
        let started = Instant::now();

        let blob = self
            .bounded(Stage::Transcode, async {
                self.transcoder
                    .transcode(recording, format)
                    .await
                    .map_err(ConvertError::from)
            })
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "transcode failed"))?;

        callbacks.end(Stage::Transcode, started);
        Ok(blob)
    }

    /// Apply the configured timeout to a suspension point
    async fn bounded<F, R>(&self, stage: Stage, fut: F) -> Result<R, ConvertError>
    where
        F: Future<Output = Result<R, ConvertError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| ConvertError::TimedOut {
                    stage,
                    timeout: limit,
                })?,
            None => fut.await,
        }
    }
}
