//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces, integrating
//! with Symphonia, LAME, hound and the FFmpeg engine.

pub mod config;
pub mod decoding;
pub mod encoding;
pub mod transcoding;

// Re-export adapters
pub use config::XdgConfigStore;
pub use decoding::{create_decoder, AutoDecoder, FfmpegPcmDecoder, SymphoniaDecoder};
pub use encoding::{HoundWavEncoder, LameMp3Encoder};
pub use transcoding::{EngineHandle, FfmpegTranscoder};
