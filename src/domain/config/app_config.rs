//! Application configuration value object

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::audio::{AudioMimeType, TargetFormat};
use crate::domain::duration::Duration;

/// Backend used to turn compressed recordings into PCM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecoderKind {
    /// Pick per recording from its MIME type
    #[default]
    Auto,
    /// In-process Symphonia decoder
    Symphonia,
    /// FFmpeg rendering to float WAV
    Ffmpeg,
}

impl DecoderKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Symphonia => "symphonia",
            Self::Ffmpeg => "ffmpeg",
        }
    }

    /// The concrete backend for a recording of type `mime`.
    ///
    /// `Auto` sends WebM and Ogg (usually Opus, which Symphonia cannot
    /// decode) to FFmpeg and everything else to Symphonia. Explicit
    /// backends are returned unchanged.
    pub const fn resolve(self, mime: AudioMimeType) -> Self {
        match self {
            Self::Auto => match mime {
                AudioMimeType::Webm | AudioMimeType::Ogg => Self::Ffmpeg,
                _ => Self::Symphonia,
            },
            explicit => explicit,
        }
    }
}

impl fmt::Display for DecoderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DecoderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "symphonia" => Ok(Self::Symphonia),
            "ffmpeg" => Ok(Self::Ffmpeg),
            _ => Err(format!(
                "Invalid decoder: \"{}\". Valid decoders are: auto, symphonia, ffmpeg",
                s
            )),
        }
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub format: Option<String>,
    pub output_dir: Option<String>,
    pub decoder: Option<String>,
    pub ffmpeg_path: Option<String>,
    pub timeout: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            format: Some("mp3".to_string()),
            output_dir: None,
            decoder: Some("auto".to_string()),
            ffmpeg_path: None,
            timeout: Some(Duration::default_timeout().to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            format: other.format.or(self.format),
            output_dir: other.output_dir.or(self.output_dir),
            decoder: other.decoder.or(self.decoder),
            ffmpeg_path: other.ffmpeg_path.or(self.ffmpeg_path),
            timeout: other.timeout.or(self.timeout),
        }
    }

    /// Get the configured format, or mp3 if not set/invalid
    pub fn format_or_default(&self) -> TargetFormat {
        self.format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or(TargetFormat::Mp3)
    }

    /// Get the decoder backend, or `Auto` if not set/invalid
    pub fn decoder_or_default(&self) -> DecoderKind {
        self.decoder
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get the FFmpeg binary, or `ffmpeg` (resolved on PATH) if not set
    pub fn ffmpeg_path_or_default(&self) -> PathBuf {
        self.ffmpeg_path
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("ffmpeg"))
    }

    /// Get the output directory, if configured
    pub fn output_dir(&self) -> Option<PathBuf> {
        self.output_dir
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    }
}
