//! PCM decoder adapters
//!
//! The backend is chosen up front, from configuration or, for `auto`, from
//! the recording's MIME type. A recording the chosen backend cannot read is
//! a decode error, never a silent retry on the other backend.

mod ffmpeg;
mod symphonia;

pub use self::ffmpeg::{parse_wav, FfmpegPcmDecoder};
pub use self::symphonia::{decode_bytes, SymphoniaDecoder};

use async_trait::async_trait;

use crate::application::ports::{DecodeError, PcmDecoder};
use crate::domain::audio::{PcmBuffer, RawRecording};
use crate::domain::config::DecoderKind;
use crate::infrastructure::transcoding::EngineHandle;

/// Routes each recording to the backend `DecoderKind::Auto` picks for its
/// MIME type
#[derive(Clone)]
pub struct AutoDecoder {
    symphonia: SymphoniaDecoder,
    ffmpeg: FfmpegPcmDecoder,
}

impl AutoDecoder {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            symphonia: SymphoniaDecoder::new(),
            ffmpeg: FfmpegPcmDecoder::new(engine),
        }
    }
}

#[async_trait]
impl PcmDecoder for AutoDecoder {
    async fn decode(&self, recording: &RawRecording) -> Result<PcmBuffer, DecodeError> {
        let backend = DecoderKind::Auto.resolve(recording.mime_type());
        tracing::debug!(mime = %recording.mime_type(), %backend, "picked decoder");

        match backend {
            DecoderKind::Ffmpeg => self.ffmpeg.decode(recording).await,
            _ => self.symphonia.decode(recording).await,
        }
    }
}

/// Create the decoder adapter for the configured backend
pub fn create_decoder(kind: DecoderKind, engine: EngineHandle) -> Box<dyn PcmDecoder> {
    match kind {
        DecoderKind::Auto => Box::new(AutoDecoder::new(engine)),
        DecoderKind::Symphonia => Box::new(SymphoniaDecoder::new()),
        DecoderKind::Ffmpeg => Box::new(FfmpegPcmDecoder::new(engine)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::AudioMimeType;
    use crate::domain::config::AppConfig;
    use crate::infrastructure::encoding::encode_to_wav;
    use crate::infrastructure::transcoding::{FfmpegEngine, LazyEngine};

    #[tokio::test]
    async fn boxed_symphonia_decoder_decodes() {
        let decoder = create_decoder(DecoderKind::Symphonia, EngineHandle::new("ffmpeg"));
        let wav = encode_to_wav(&[0, 100, -100], 8000).unwrap();

        let pcm = decoder
            .decode(&RawRecording::new(wav, AudioMimeType::Wav))
            .await
            .unwrap();
        assert_eq!(pcm.frames(), 3);
    }

    #[tokio::test]
    async fn default_config_decodes_wav_in_process() {
        static SLOT: LazyEngine<FfmpegEngine> = LazyEngine::new();
        let kind = AppConfig::defaults().decoder_or_default();
        let decoder = create_decoder(kind, EngineHandle::with_slot("/nonexistent/ffmpeg", &SLOT));
        let wav = encode_to_wav(&[0, 100, -100, 200], 8000).unwrap();

        let pcm = decoder
            .decode(&RawRecording::new(wav, AudioMimeType::Wav))
            .await
            .unwrap();
        assert_eq!(pcm.frames(), 4);
        // Symphonia handled it without touching FFmpeg
        assert_eq!(SLOT.load_attempts(), 0);
    }

    #[tokio::test]
    async fn default_config_sends_webm_and_ogg_to_ffmpeg() {
        static SLOT: LazyEngine<FfmpegEngine> = LazyEngine::new();
        let kind = AppConfig::defaults().decoder_or_default();
        let decoder = create_decoder(kind, EngineHandle::with_slot("/nonexistent/ffmpeg", &SLOT));

        for mime in [AudioMimeType::Webm, AudioMimeType::Ogg] {
            let rec = RawRecording::new(b"OggS".to_vec(), mime);
            let err = decoder.decode(&rec).await.unwrap_err();
            // Symphonia would report UnsupportedCodec or Unrecognized here
            assert!(matches!(err, DecodeError::Backend(_)), "{}: {:?}", mime, err);
        }
        assert_eq!(SLOT.load_attempts(), 2);
    }

    #[tokio::test]
    #[ignore = "requires ffmpeg with libopus on PATH"]
    async fn default_config_decodes_opus_in_webm() {
        let dir = tempfile::tempdir().unwrap();
        let webm = dir.path().join("memo.webm");
        let status = std::process::Command::new("ffmpeg")
            .args(["-hide_banner", "-loglevel", "error", "-f", "lavfi", "-i"])
            .arg("sine=frequency=440:duration=1:sample_rate=48000")
            .args(["-c:a", "libopus", "-b:a", "32k"])
            .arg(&webm)
            .status()
            .unwrap();
        assert!(status.success());

        let kind = AppConfig::defaults().decoder_or_default();
        let decoder = create_decoder(kind, EngineHandle::new("ffmpeg"));
        let rec = RawRecording::new(std::fs::read(&webm).unwrap(), AudioMimeType::Webm);

        let pcm = decoder.decode(&rec).await.unwrap();
        assert_eq!(pcm.sample_rate(), 48_000);
        assert!(pcm.frames() >= 45_000, "got {} frames", pcm.frames());
    }
}
