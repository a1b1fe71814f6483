//! FFmpeg-backed container transcoding

mod engine;
mod ffmpeg;
mod workspace;

pub use engine::{shared_engine, EngineError, EngineHandle, FfmpegEngine, LazyEngine};
pub use ffmpeg::{transcode_args, FfmpegTranscoder, AAC_BITRATE, OUTPUT_CHANNELS, OUTPUT_SAMPLE_RATE};
pub use workspace::Workspace;
