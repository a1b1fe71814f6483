//! Main app runner for conversions

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::Local;

use crate::application::ports::ConfigStore;
use crate::application::{ConvertError, ConvertRecordingUseCase, EncodeRequest};
use crate::domain::audio::{recording_name, AudioMimeType, EncodedBlob, RawRecording, TargetFormat};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    create_decoder, EngineHandle, FfmpegTranscoder, HoundWavEncoder, LameMp3Encoder,
    XdgConfigStore,
};

use super::args::ConvertOptions;
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Environment variable overriding the FFmpeg binary
pub const FFMPEG_ENV: &str = "VOICE_EXPORT_FFMPEG";

/// Run a single conversion
pub async fn run_convert(options: ConvertOptions) -> ExitCode {
    let mut presenter = Presenter::new();

    // Reject unknown formats before touching the filesystem
    let format = match options.format.parse::<TargetFormat>() {
        Ok(format) => format,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let data = match tokio::fs::read(&options.input).await {
        Ok(data) => data,
        Err(e) => {
            presenter.error(&format!(
                "Failed to read {}: {}",
                options.input.display(),
                e
            ));
            return ExitCode::from(EXIT_ERROR);
        }
    };
    let recording = RawRecording::new(data, options.mime_type);

    tracing::debug!(
        input = %options.input.display(),
        mime = %recording.mime_type(),
        size = %recording.human_readable_size(),
        %format,
        decoder = %options.decoder,
        "starting conversion"
    );

    // Create adapters
    let engine = EngineHandle::new(options.ffmpeg_path.clone());
    let use_case = ConvertRecordingUseCase::new(
        create_decoder(options.decoder, engine.clone()),
        LameMp3Encoder::new(),
        HoundWavEncoder::new(),
        FfmpegTranscoder::new(engine),
    )
    .with_timeout(options.timeout.as_std());

    let request = EncodeRequest::new(recording, options.format.clone());

    presenter.start_spinner(&format!("Converting to {}...", format));
    let callbacks = presenter.stage_callbacks();
    let result = use_case.execute(&request, &callbacks).await;

    let blob = match result {
        Ok(blob) => blob,
        Err(e) => {
            presenter.spinner_fail("Conversion failed");
            presenter.error(&e.to_string());
            return ExitCode::from(exit_code_for(&e));
        }
    };

    let path = output_path(&options, &blob);
    if let Err(e) = write_output(&path, &blob).await {
        presenter.spinner_fail("Could not save file");
        presenter.error(&format!("Failed to write {}: {}", path.display(), e));
        return ExitCode::from(EXIT_ERROR);
    }

    presenter.spinner_success(&format!(
        "Saved {} ({})",
        blob.mime_type(),
        blob.human_readable_size()
    ));
    presenter.output(&path.to_string_lossy());

    ExitCode::from(EXIT_SUCCESS)
}

/// Map a pipeline failure to a process exit code
pub fn exit_code_for(error: &ConvertError) -> u8 {
    match error {
        ConvertError::UnsupportedFormat(_) => EXIT_USAGE_ERROR,
        _ => EXIT_ERROR,
    }
}

/// Print the supported target formats
pub fn print_formats(presenter: &Presenter) {
    for format in TargetFormat::ALL {
        presenter.format_row(format.as_str(), format.mime_type().as_str(), format.backend());
    }
}

/// Resolve the input MIME type from `--mime` or the input extension
pub fn resolve_mime(input: &Path, mime: Option<&str>) -> Result<AudioMimeType, String> {
    if let Some(mime) = mime {
        return mime.parse();
    }

    input
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(AudioMimeType::from_extension)
        .ok_or_else(|| {
            format!(
                "Cannot tell the audio type of {} from its extension. Pass --mime (e.g., --mime audio/webm)",
                input.display()
            )
        })
}

/// Where the converted file is written.
///
/// An explicit `-o` wins. Otherwise the file lands in the configured output
/// directory (or next to the input), named after the input stem with an
/// extension matching the blob's MIME type.
pub fn output_path(options: &ConvertOptions, blob: &EncodedBlob) -> PathBuf {
    if let Some(ref output) = options.output {
        return output.clone();
    }

    let dir = options
        .output_dir
        .clone()
        .or_else(|| {
            options
                .input
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let stem = options
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| recording_name(Local::now()));

    dir.join(blob.file_name(&stem))
}

async fn write_output(path: &Path, blob: &EncodedBlob) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, blob.data()).await
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    let env_config = AppConfig {
        ffmpeg_path: env::var(FFMPEG_ENV).ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
