//! Domain layer - Core conversion logic
//!
//! Contains value objects, the quantization rule, and domain errors.
//! This layer has no dependencies on external systems.

pub mod audio;
pub mod config;
pub mod duration;
pub mod error;

// Re-export common types
pub use audio::{
    AudioMimeType, ContainerFormat, EncodedBlob, Int16Samples, PcmBuffer, RawRecording,
    TargetFormat,
};
pub use config::{AppConfig, DecoderKind};
pub use duration::Duration;
pub use error::*;
