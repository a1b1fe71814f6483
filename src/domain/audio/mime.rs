//! Audio MIME types for recordings and encoded outputs

use std::fmt;
use std::str::FromStr;

/// Audio MIME types understood by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioMimeType {
    Webm,
    Ogg,
    Wav,
    Mp3,
    Mpeg,
    Mp4,
    M4a,
    Caf,
    Flac,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Webm => "audio/webm",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Mp3 => "audio/mp3",
            Self::Mpeg => "audio/mpeg",
            Self::Mp4 => "audio/mp4",
            Self::M4a => "audio/m4a",
            Self::Caf => "audio/caf",
            Self::Flac => "audio/flac",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Webm => "webm",
            Self::Ogg => "ogg",
            Self::Wav => "wav",
            Self::Mp3 | Self::Mpeg => "mp3",
            Self::Mp4 => "mp4",
            Self::M4a => "m4a",
            Self::Caf => "caf",
            Self::Flac => "flac",
        }
    }

    /// Guess the MIME type from a file extension (case-insensitive)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "webm" | "weba" => Some(Self::Webm),
            "ogg" | "oga" | "opus" => Some(Self::Ogg),
            "wav" | "wave" => Some(Self::Wav),
            "mp3" => Some(Self::Mp3),
            "mp4" => Some(Self::Mp4),
            "m4a" => Some(Self::M4a),
            "caf" => Some(Self::Caf),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Default for AudioMimeType {
    /// Browsers record Opus-in-WebM unless told otherwise
    fn default() -> Self {
        Self::Webm
    }
}

impl FromStr for AudioMimeType {
    type Err = String;

    /// Parse a MIME string, ignoring parameters such as `;codecs=opus`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "audio/webm" | "video/webm" => Ok(Self::Webm),
            "audio/ogg" | "audio/opus" => Ok(Self::Ogg),
            "audio/wav" | "audio/wave" | "audio/x-wav" => Ok(Self::Wav),
            "audio/mp3" => Ok(Self::Mp3),
            "audio/mpeg" => Ok(Self::Mpeg),
            "audio/mp4" => Ok(Self::Mp4),
            "audio/m4a" | "audio/x-m4a" => Ok(Self::M4a),
            "audio/caf" | "audio/x-caf" => Ok(Self::Caf),
            "audio/flac" | "audio/x-flac" => Ok(Self::Flac),
            _ => Err(format!("Unknown audio MIME type: \"{}\"", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_type_as_str() {
        assert_eq!(AudioMimeType::Webm.as_str(), "audio/webm");
        assert_eq!(AudioMimeType::Mp3.as_str(), "audio/mp3");
        assert_eq!(AudioMimeType::Caf.as_str(), "audio/caf");
    }

    #[test]
    fn mime_type_extension() {
        assert_eq!(AudioMimeType::Mpeg.extension(), "mp3");
        assert_eq!(AudioMimeType::M4a.extension(), "m4a");
        assert_eq!(AudioMimeType::Wav.extension(), "wav");
    }

    #[test]
    fn parse_ignores_codec_parameters() {
        let mime: AudioMimeType = "audio/webm;codecs=opus".parse().unwrap();
        assert_eq!(mime, AudioMimeType::Webm);
    }

    #[test]
    fn parse_rejects_unknown() {
        assert!("text/plain".parse::<AudioMimeType>().is_err());
    }

    #[test]
    fn from_extension_is_case_insensitive() {
        assert_eq!(AudioMimeType::from_extension("WEBM"), Some(AudioMimeType::Webm));
        assert_eq!(AudioMimeType::from_extension("txt"), None);
    }

    #[test]
    fn default_mime_type_is_webm() {
        assert_eq!(AudioMimeType::default(), AudioMimeType::Webm);
    }
}
