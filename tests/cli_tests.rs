//! CLI integration tests

use std::process::Command;

fn voice_export_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_voice-export"));
    // Keep the developer's own config out of the way
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/voice-export-tests");
    cmd
}

#[test]
fn help_output() {
    let output = voice_export_bin()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("MP3, WAV, M4A or CAF"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--output"));
    assert!(stdout.contains("--mime"));
    assert!(stdout.contains("--decoder"));
    assert!(stdout.contains("--timeout"));
    assert!(stdout.contains("--verbose"));
}

#[test]
fn version_output() {
    let output = voice_export_bin()
        .arg("--version")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice-export"));
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn config_path_command() {
    let output = voice_export_bin()
        .args(["config", "path"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("voice-export"));
    assert!(stdout.contains("config.toml"));
}

#[test]
fn config_help() {
    let output = voice_export_bin()
        .args(["config", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("init"));
    assert!(stdout.contains("set"));
    assert!(stdout.contains("get"));
    assert!(stdout.contains("list"));
    assert!(stdout.contains("path"));
}

#[test]
fn config_list_without_file_shows_unset_keys() {
    let output = voice_export_bin()
        .args(["config", "list"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for key in ["format", "output_dir", "decoder", "ffmpeg_path", "timeout"] {
        assert!(stdout.contains(key), "missing {} in: {}", key, stdout);
    }
    assert!(stdout.contains("(not set)"));
}

#[test]
fn formats_lists_all_targets() {
    let output = voice_export_bin()
        .arg("formats")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("audio/mp3"));
    assert!(stdout.contains("audio/wav"));
    assert!(stdout.contains("audio/m4a"));
    assert!(stdout.contains("audio/caf"));
    assert!(!stdout.contains("ogg"));
}

#[test]
fn invalid_timeout_error() {
    let output = voice_export_bin()
        .args(["memo.webm", "--timeout", "invalid"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid timeout"),
        "Expected error about invalid timeout, got: {}",
        stderr
    );
}

#[test]
fn unknown_decoder_is_rejected_by_clap() {
    let output = voice_export_bin()
        .args(["memo.webm", "--decoder", "gstreamer"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
