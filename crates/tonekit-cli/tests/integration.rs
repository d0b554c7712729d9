//! Integration tests for tonekit-cli.
//!
//! Tests invoke the built binary and check the files it writes.

use std::process::Command;
use tempfile::TempDir;

/// Helper to get the path to the `tonekit` binary built by cargo.
fn tonekit_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tonekit"));
    // Keep the user's real settings file out of the tests.
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("tonekit-cli-tests"));
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Read the mono 16-bit samples of a WAV file written by the CLI.
fn read_samples(path: &std::path::Path) -> Vec<i16> {
    tonekit_io::read_wav(path)
        .expect("CLI output should be mono 16-bit PCM")
        .into_samples()
}

// ---------------------------------------------------------------------------
// `tonekit export`
// ---------------------------------------------------------------------------

#[test]
fn export_writes_reference_tone() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tone.wav");

    let output = tonekit_bin()
        .args(["export", "-o"])
        .arg(&out)
        .output()
        .expect("failed to run tonekit export");

    assert!(
        output.status.success(),
        "export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let samples = read_samples(&out);
    assert_eq!(samples.len(), 44_100);
    assert_eq!(samples[0], 0);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("44100 samples"), "got: {stdout}");
}

#[test]
fn export_applies_tone_options() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("square.wav");

    let status = tonekit_bin()
        .args([
            "export",
            "--waveform",
            "square",
            "--freq",
            "441",
            "--duration",
            "0.5",
            "--attack",
            "0",
            "--decay",
            "0",
            "--sustain",
            "1",
            "--release",
            "0",
            "--headroom",
            "0.5",
            "-o",
        ])
        .arg(&out)
        .status()
        .unwrap();
    assert!(status.success());

    let samples = read_samples(&out);
    assert_eq!(samples.len(), 22_050);
    assert!(samples.iter().all(|&s| s == 16_384 || s == -16_384));
}

#[test]
fn export_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("from-config.wav");
    let config = dir.path().join("settings.toml");
    std::fs::write(
        &config,
        format!(
            "[render]\nduration_secs = 0.1\n\n[output]\nexport_path = {:?}\n",
            out.display().to_string()
        ),
    )
    .unwrap();

    let status = tonekit_bin()
        .arg("--config")
        .arg(&config)
        .arg("export")
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(read_samples(&out).len(), 4_410);
}

#[test]
fn export_rejects_invalid_sustain() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("bad.wav");

    let output = tonekit_bin()
        .args(["export", "--sustain", "1.5", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("sustain"), "got: {stderr}");
    assert!(!out.exists(), "no file should be written on error");
}

#[test]
fn export_rejects_oversized_duration() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("huge.wav");

    let output = tonekit_bin()
        .args(["export", "--duration", "1e16", "-o"])
        .arg(&out)
        .output()
        .unwrap();

    // A clean error exit, not an abort from a failed allocation
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("duration"), "got: {stderr}");
    assert!(!out.exists());
}

#[test]
fn play_help_lists_timeout_grace() {
    let output = tonekit_bin().args(["play", "--help"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--timeout-grace"), "got: {stdout}");
    assert!(stdout.contains("--device"), "got: {stdout}");
}

#[test]
fn export_rejects_unknown_waveform() {
    let output = tonekit_bin()
        .args(["export", "--waveform", "triangle"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `tonekit info` and `tonekit config`
// ---------------------------------------------------------------------------

#[test]
fn info_reports_exported_header() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("tone.wav");
    assert!(
        tonekit_bin()
            .args(["export", "-o"])
            .arg(&out)
            .status()
            .unwrap()
            .success()
    );

    let output = tonekit_bin().arg("info").arg(&out).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("PCM 16-bit"), "got: {stdout}");
    assert!(stdout.contains("Channels:    1"), "got: {stdout}");
    assert!(stdout.contains("44100 Hz"), "got: {stdout}");
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("conf").join("settings.toml");

    let init = |force: bool| {
        let mut cmd = tonekit_bin();
        cmd.arg("--config").arg(&config).args(["config", "init"]);
        if force {
            cmd.arg("--force");
        }
        cmd.status().unwrap()
    };

    assert!(init(false).success());
    assert!(config.exists());
    assert!(!init(false).success(), "second init must refuse to overwrite");
    assert!(init(true).success());

    let output = tonekit_bin()
        .arg("--config")
        .arg(&config)
        .args(["config", "show"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[tone]"), "got: {stdout}");
    assert!(stdout.contains("waveform = \"sine\""), "got: {stdout}");
    assert!(stdout.contains("export_path = \"output.wav\""), "got: {stdout}");
}

#[test]
fn help_lists_commands() {
    let output = tonekit_bin().arg("--help").output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["play", "export", "info", "devices", "config"] {
        assert!(stdout.contains(command), "missing '{command}' in: {stdout}");
    }
}
