//! Domain error types

use thiserror::Error;

/// Error when parsing a duration string
#[derive(Debug, Clone, Error)]
#[error("Invalid duration format: \"{input}\". Expected <number> followed by h, m or s (e.g., 30s, 5m, 1h30m)")]
pub struct DurationParseError {
    pub input: String,
}

/// Error when a requested output format is not one of the supported targets
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported format: \"{input}\". Supported formats are: mp3, wav, m4a, caf")]
pub struct UnsupportedFormatError {
    pub input: String,
}

/// Error when decoded audio violates the PCM buffer invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPcmError {
    #[error("Sample rate must be greater than zero")]
    ZeroSampleRate,

    #[error("PCM buffer has no channels")]
    NoChannels,

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    ChannelLengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
