//! Application layer - Use cases and port interfaces
//!
//! Contains the conversion workflow and trait definitions
//! for decoders, encoders, the transcoding engine and config storage.

pub mod convert;
pub mod ports;

// Re-export use cases
pub use convert::{
    ConvertCallbacks, ConvertError, ConvertRecordingUseCase, EncodeRequest, Stage,
};
