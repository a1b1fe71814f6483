//! VoiceExport - convert voice recordings into downloadable audio files
//!
//! This crate turns a compressed recording (typically Opus in WebM/Ogg) into
//! MP3 or WAV by decoding to PCM and re-encoding, or into M4A/CAF by handing
//! the original bytes to an FFmpeg engine that is loaded once per process.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Value objects (recordings, PCM buffers, formats), the
//!   quantization rule, config, and errors
//! - **Application**: The format dispatcher use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Symphonia, LAME, hound, FFmpeg, XDG config)
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
