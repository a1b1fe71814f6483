//! Target output formats

use std::fmt;
use std::str::FromStr;

use super::AudioMimeType;
use crate::domain::error::UnsupportedFormatError;

/// Formats a recording can be exported to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Mp3,
    Wav,
    M4a,
    Caf,
}

impl TargetFormat {
    /// All supported formats, in display order
    pub const ALL: [TargetFormat; 4] = [Self::Mp3, Self::Wav, Self::M4a, Self::Caf];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::M4a => "m4a",
            Self::Caf => "caf",
        }
    }

    /// File extension of the produced file (always matches the MIME type)
    pub const fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// MIME type tagged on the produced blob
    pub const fn mime_type(&self) -> AudioMimeType {
        match self {
            Self::Mp3 => AudioMimeType::Mp3,
            Self::Wav => AudioMimeType::Wav,
            Self::M4a => AudioMimeType::M4a,
            Self::Caf => AudioMimeType::Caf,
        }
    }

    /// The container format if this target is served by the transcoding engine
    pub const fn container(&self) -> Option<ContainerFormat> {
        match self {
            Self::M4a => Some(ContainerFormat::M4a),
            Self::Caf => Some(ContainerFormat::Caf),
            Self::Mp3 | Self::Wav => None,
        }
    }

    /// Short description of the backend producing this format
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Mp3 => "LAME, 128 kbps CBR, mono",
            Self::Wav => "16-bit PCM, mono",
            Self::M4a => "FFmpeg, AAC 128 kbps, 44.1 kHz stereo",
            Self::Caf => "FFmpeg, 44.1 kHz stereo",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetFormat {
    type Err = UnsupportedFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mp3" => Ok(Self::Mp3),
            "wav" => Ok(Self::Wav),
            "m4a" => Ok(Self::M4a),
            "caf" => Ok(Self::Caf),
            _ => Err(UnsupportedFormatError {
                input: s.to_string(),
            }),
        }
    }
}

/// Formats produced by the external transcoding engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerFormat {
    M4a,
    Caf,
}

impl ContainerFormat {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::M4a => "m4a",
            Self::Caf => "caf",
        }
    }

    pub const fn mime_type(&self) -> AudioMimeType {
        match self {
            Self::M4a => AudioMimeType::M4a,
            Self::Caf => AudioMimeType::Caf,
        }
    }
}

impl fmt::Display for ContainerFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<ContainerFormat> for TargetFormat {
    fn from(format: ContainerFormat) -> Self {
        match format {
            ContainerFormat::M4a => TargetFormat::M4a,
            ContainerFormat::Caf => TargetFormat::Caf,
        }
    }
}
