//! Encoding infrastructure module
//!
//! In-process encoders for the PCM path: LAME for MP3, hound for WAV.

mod mp3;
mod wav;

pub use mp3::{encode_to_mp3, LameMp3Encoder, DEFAULT_BITRATE_KBPS, MP3_BLOCK_SIZE};
pub use wav::{encode_to_wav, HoundWavEncoder, BITS_PER_SAMPLE};
