//! Decoder that renders through the FFmpeg engine
//!
//! Covers whatever FFmpeg can read, including Opus in WebM/Ogg. The
//! recording is rendered to a 32-bit float WAV in a scratch workspace,
//! then parsed with hound and split into planar channels.

use std::io::Cursor;

use async_trait::async_trait;
use hound::{SampleFormat, WavReader};

use crate::application::ports::{DecodeError, PcmDecoder};
use crate::domain::audio::{PcmBuffer, RawRecording};
use crate::infrastructure::transcoding::{EngineError, EngineHandle, Workspace};

const OUTPUT_FILE: &str = "output.wav";

fn render_args(input: &str) -> Vec<String> {
    [
        "-i",
        input,
        "-vn",
        "-map_metadata",
        "-1",
        "-c:a",
        "pcm_f32le",
        "-f",
        "wav",
        OUTPUT_FILE,
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Parse a float or integer PCM WAV into planar f32 channels
pub fn parse_wav(data: Vec<u8>) -> Result<PcmBuffer, DecodeError> {
    let mut reader =
        WavReader::new(Cursor::new(data)).map_err(|e| DecodeError::Corrupt(e.to_string()))?;
    let spec = reader.spec();
    let channel_count = spec.channels as usize;
    if channel_count == 0 {
        return Err(DecodeError::NoAudioTrack);
    }

    let frames = reader.len() as usize / channel_count;
    let mut channels = vec![Vec::with_capacity(frames); channel_count];

    match spec.sample_format {
        SampleFormat::Float => {
            for (i, sample) in reader.samples::<f32>().enumerate() {
                let sample = sample.map_err(|e| DecodeError::Corrupt(e.to_string()))?;
                channels[i % channel_count].push(sample);
            }
        }
        SampleFormat::Int => {
            let scale = 1.0 / (1u64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            for (i, sample) in reader.samples::<i32>().enumerate() {
                let sample = sample.map_err(|e| DecodeError::Corrupt(e.to_string()))?;
                channels[i % channel_count].push(sample as f32 * scale);
            }
        }
    }

    if channels[0].is_empty() {
        return Err(DecodeError::NoSamples);
    }

    Ok(PcmBuffer::new(spec.sample_rate, channels)?)
}

/// A failed render means FFmpeg could not read the input; anything else is
/// a fault in the engine itself
fn run_error(err: EngineError) -> DecodeError {
    match err {
        EngineError::RunFailed(reason) => DecodeError::Unrecognized(reason),
        other => DecodeError::Backend(other.to_string()),
    }
}

/// FFmpeg-backed PCM decoder
#[derive(Clone)]
pub struct FfmpegPcmDecoder {
    engine: EngineHandle,
}

impl FfmpegPcmDecoder {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl PcmDecoder for FfmpegPcmDecoder {
    async fn decode(&self, recording: &RawRecording) -> Result<PcmBuffer, DecodeError> {
        if recording.is_empty() {
            return Err(DecodeError::EmptyInput);
        }

        let engine = self
            .engine
            .engine()
            .await
            .map_err(|e| DecodeError::Backend(e.to_string()))?;

        let workspace = Workspace::new().map_err(|e| DecodeError::Backend(e.to_string()))?;
        let input = format!("input.{}", recording.mime_type().extension());
        workspace
            .write(&input, recording.data())
            .await
            .map_err(|e| DecodeError::Backend(e.to_string()))?;

        engine
            .run(workspace.path(), &render_args(&input))
            .await
            .map_err(run_error)?;

        let data = workspace
            .read(OUTPUT_FILE)
            .await
            .map_err(|e| DecodeError::Backend(e.to_string()))?;

        let pcm = tokio::task::spawn_blocking(move || parse_wav(data))
            .await
            .map_err(|e| DecodeError::Backend(format!("decoder task failed: {}", e)))??;

        tracing::debug!(
            sample_rate = pcm.sample_rate(),
            channels = pcm.channel_count(),
            frames = pcm.frames(),
            engine = engine.version(),
            "decoded via ffmpeg"
        );

        Ok(pcm)
    }
}
