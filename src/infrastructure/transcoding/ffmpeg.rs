//! Container transcoder backed by the FFmpeg engine
//!
//! Re-encodes the original compressed bytes (never decoded PCM) into M4A
//! (AAC, 128 kbps) or CAF (FFmpeg's default CAF codec). Output is 44.1 kHz
//! stereo.

use async_trait::async_trait;

use super::engine::EngineHandle;
use super::workspace::Workspace;
use crate::application::ports::{ContainerTranscoder, TranscodeError};
use crate::domain::audio::{AudioMimeType, ContainerFormat, EncodedBlob, RawRecording};

pub const OUTPUT_SAMPLE_RATE: u32 = 44_100;
pub const OUTPUT_CHANNELS: u32 = 2;
pub const AAC_BITRATE: &str = "128k";

/// Scratch file name for the staged input
pub fn input_file_name(mime_type: AudioMimeType) -> String {
    format!("input.{}", mime_type.extension())
}

/// Scratch file name for the engine's output
pub fn output_file_name(format: ContainerFormat) -> String {
    format!("output.{}", format.as_str())
}

/// Engine arguments for a single transcode, relative to the workspace
pub fn transcode_args(input: &str, format: ContainerFormat) -> Vec<String> {
    let mut args = vec![
        "-i".to_string(),
        input.to_string(),
        "-vn".to_string(),
        "-ar".to_string(),
        OUTPUT_SAMPLE_RATE.to_string(),
        "-ac".to_string(),
        OUTPUT_CHANNELS.to_string(),
    ];

    match format {
        ContainerFormat::M4a => args.extend([
            "-c:a".to_string(),
            "aac".to_string(),
            "-b:a".to_string(),
            AAC_BITRATE.to_string(),
        ]),
        ContainerFormat::Caf => args.extend(["-f".to_string(), "caf".to_string()]),
    }

    args.push(output_file_name(format));
    args
}

/// FFmpeg-backed container transcoder
#[derive(Clone)]
pub struct FfmpegTranscoder {
    engine: EngineHandle,
}

impl FfmpegTranscoder {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl ContainerTranscoder for FfmpegTranscoder {
    async fn transcode(
        &self,
        recording: &RawRecording,
        format: ContainerFormat,
    ) -> Result<EncodedBlob, TranscodeError> {
        let engine = self
            .engine
            .engine()
            .await
            .map_err(|e| TranscodeError::EngineLoad {
                format,
                message: e.to_string(),
            })?;

        let input_write = |e: std::io::Error| TranscodeError::InputWrite {
            format,
            message: e.to_string(),
        };

        let workspace = Workspace::new().map_err(input_write)?;
        let input = input_file_name(recording.mime_type());
        workspace
            .write(&input, recording.data())
            .await
            .map_err(input_write)?;

        let args = transcode_args(&input, format);
        engine
            .run(workspace.path(), &args)
            .await
            .map_err(|e| TranscodeError::RunFailed {
                format,
                message: e.to_string(),
            })?;

        let data = workspace
            .read(&output_file_name(format))
            .await
            .map_err(|e| TranscodeError::OutputRead {
                format,
                message: e.to_string(),
            })?;

        if data.is_empty() {
            return Err(TranscodeError::OutputRead {
                format,
                message: "engine produced an empty file".to_string(),
            });
        }

        tracing::debug!(
            %format,
            input = %input,
            bytes = data.len(),
            engine = engine.version(),
            "transcoded"
        );

        Ok(EncodedBlob::new(data, format.mime_type()))
    }
}
