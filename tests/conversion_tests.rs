//! End-to-end conversion tests using synthetic WAV recordings

use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;

use voice_export::application::{ConvertCallbacks, ConvertRecordingUseCase, EncodeRequest};
use voice_export::domain::{AudioMimeType, RawRecording, TargetFormat};
use voice_export::infrastructure::{
    EngineHandle, FfmpegTranscoder, HoundWavEncoder, LameMp3Encoder, SymphoniaDecoder,
};

/// Stereo 16-bit WAV where the left channel is a ramp and the right is silent
fn stereo_fixture(sample_rate: u32, frames: usize) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for i in 0..frames {
            writer.write_sample(((i % 200) as i16 - 100) * 100).unwrap();
            writer.write_sample(0i16).unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

fn use_case() -> ConvertRecordingUseCase<SymphoniaDecoder, LameMp3Encoder, HoundWavEncoder, FfmpegTranscoder>
{
    ConvertRecordingUseCase::new(
        SymphoniaDecoder::new(),
        LameMp3Encoder::new(),
        HoundWavEncoder::new(),
        FfmpegTranscoder::new(EngineHandle::new("ffmpeg")),
    )
    .with_timeout(Duration::from_secs(60))
}

fn write_fixture(dir: &Path, name: &str, frames: usize) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, stereo_fixture(16_000, frames)).unwrap();
    path
}

#[tokio::test]
async fn wav_export_keeps_left_channel_only() {
    let recording = RawRecording::new(stereo_fixture(16_000, 400), AudioMimeType::Wav);
    let request = EncodeRequest::for_format(recording, TargetFormat::Wav);

    let blob = use_case()
        .execute(&request, &ConvertCallbacks::default())
        .await
        .unwrap();
    assert_eq!(blob.mime_type(), AudioMimeType::Wav);

    let mut reader = hound::WavReader::new(Cursor::new(blob.into_data())).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.spec().sample_rate, 16_000);
    assert_eq!(reader.spec().bits_per_sample, 16);

    let samples: Vec<i16> = reader.samples::<i16>().map(Result::unwrap).collect();
    assert_eq!(samples.len(), 400);
    assert_eq!(samples[0], -10_000);
    assert_eq!(samples[150], 5_000);
}

#[tokio::test]
async fn mp3_export_produces_frames() {
    let recording = RawRecording::new(stereo_fixture(16_000, 16_000), AudioMimeType::Wav);
    let request = EncodeRequest::new(recording, "MP3");

    let blob = use_case()
        .execute(&request, &ConvertCallbacks::default())
        .await
        .unwrap();

    assert_eq!(blob.mime_type(), AudioMimeType::Mp3);
    assert_eq!(blob.file_name("memo"), "memo.mp3");
    let data = blob.data();
    assert!(data.len() > 1000, "got {} bytes", data.len());
    assert_eq!(data[0], 0xFF);
    assert_eq!(data[1] & 0xE0, 0xE0);
}

#[tokio::test]
async fn mp3_export_is_deterministic() {
    let bytes = stereo_fixture(16_000, 8_000);
    let first = use_case()
        .execute(
            &EncodeRequest::new(RawRecording::new(bytes.clone(), AudioMimeType::Wav), "mp3"),
            &ConvertCallbacks::default(),
        )
        .await
        .unwrap();
    let second = use_case()
        .execute(
            &EncodeRequest::new(RawRecording::new(bytes, AudioMimeType::Wav), "mp3"),
            &ConvertCallbacks::default(),
        )
        .await
        .unwrap();

    assert_eq!(first.data(), second.data());
}

#[test]
fn cli_converts_wav_next_to_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "standup.wav", 1_600);
    let expected = dir.path().join("standup.mp3");

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .arg(&input)
        .args(["--format", "mp3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("standup.mp3"));

    let data = std::fs::read(&expected).unwrap();
    assert_eq!(data[0], 0xFF);
}

#[test]
fn cli_honors_explicit_output_and_config_format() {
    let dir = tempfile::tempdir().unwrap();
    let config_home = dir.path().join("config");
    let input = write_fixture(dir.path(), "memo.wav", 800);
    let output = dir.path().join("out").join("final.wav");

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "set", "format", "WAV"])
        .assert()
        .success();

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", &config_home)
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("final.wav"));

    let reader = hound::WavReader::open(&output).unwrap();
    assert_eq!(reader.spec().channels, 1);
    assert_eq!(reader.len(), 800);
}

#[test]
fn cli_output_dir_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_home = dir.path().join("config");
    let exports = dir.path().join("exports");
    let input = write_fixture(dir.path(), "memo.wav", 800);

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "set", "output_dir"])
        .arg(&exports)
        .assert()
        .success();

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", &config_home)
        .arg(&input)
        .args(["-f", "wav"])
        .assert()
        .success();

    assert!(exports.join("memo.wav").exists());
}

#[test]
#[ignore = "requires ffmpeg on PATH"]
fn cli_converts_to_m4a_with_ffmpeg() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "memo.wav", 16_000);

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .arg(&input)
        .args(["-f", "m4a"])
        .assert()
        .success()
        .stdout(predicate::str::ends_with("memo.m4a\n"));

    assert!(std::fs::metadata(dir.path().join("memo.m4a")).unwrap().len() > 0);
}

#[test]
#[ignore = "requires ffmpeg on PATH"]
fn cli_decodes_with_ffmpeg_backend() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_fixture(dir.path(), "memo.wav", 1_600);

    Command::cargo_bin("voice-export")
        .unwrap()
        .env("XDG_CONFIG_HOME", dir.path().join("config"))
        .arg(&input)
        .args(["-f", "wav", "--decoder", "ffmpeg", "-o"])
        .arg(dir.path().join("rendered.wav"))
        .assert()
        .success();

    let reader = hound::WavReader::open(dir.path().join("rendered.wav")).unwrap();
    assert_eq!(reader.len(), 1_600);
}
