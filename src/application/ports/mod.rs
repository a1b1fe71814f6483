//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod decoder;
pub mod encoder;
pub mod transcoder;

// Re-export common types
pub use config::ConfigStore;
pub use decoder::{DecodeError, PcmDecoder};
pub use encoder::{EncodeError, Mp3Encoder, WavEncoder};
pub use transcoder::{ContainerTranscoder, TranscodeError};
