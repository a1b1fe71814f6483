//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::audio::AudioMimeType;
use crate::domain::config::DecoderKind;
use crate::domain::Duration;

/// VoiceExport - convert voice recordings into downloadable audio files
#[derive(Parser, Debug)]
#[command(name = "voice-export")]
#[command(version)]
#[command(about = "Convert voice recordings into MP3, WAV, M4A or CAF files")]
#[command(long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Recording to convert
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Target format (mp3, wav, m4a, caf)
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<String>,

    /// Output file (default: <input stem>.<format extension>)
    #[arg(short = 'o', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// MIME type of the input (default: guessed from its extension)
    #[arg(long, value_name = "MIME")]
    pub mime: Option<String>,

    /// Decoder backend for mp3/wav targets (auto: FFmpeg for WebM/Ogg)
    #[arg(long, value_name = "BACKEND")]
    pub decoder: Option<DecoderArg>,

    /// Per-stage time limit (e.g., 30s, 5m)
    #[arg(short = 't', long, value_name = "TIME")]
    pub timeout: Option<String>,

    /// Print diagnostic logs to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List supported target formats
    Formats,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Decoder argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum DecoderArg {
    Auto,
    Symphonia,
    Ffmpeg,
}

impl From<DecoderArg> for DecoderKind {
    fn from(arg: DecoderArg) -> Self {
        match arg {
            DecoderArg::Auto => DecoderKind::Auto,
            DecoderArg::Symphonia => DecoderKind::Symphonia,
            DecoderArg::Ffmpeg => DecoderKind::Ffmpeg,
        }
    }
}

/// Resolved options for a single conversion
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Requested format name, validated by the dispatcher
    pub format: String,
    pub mime_type: AudioMimeType,
    pub decoder: DecoderKind,
    pub ffmpeg_path: PathBuf,
    pub timeout: Duration,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["format", "output_dir", "decoder", "ffmpeg_path", "timeout"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
