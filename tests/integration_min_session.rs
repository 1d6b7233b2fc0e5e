// Minimal integration test that drives the compiled binary through a PTY.
// This exercises the real event loop and crossterm input handling across
// the main boundaries without relying on internal modules.
//
// Notes:
// - Requires a TTY; uses expectrl which allocates a pseudo terminal.
// - Marked Unix-only and ignored by default to avoid CI/platform issues.
// - Run manually via: `cargo test --test integration_min_session -- --ignored`.

#![cfg(unix)]

use std::time::Duration;

use expectrl::{spawn, Eof};

#[test]
#[ignore]
fn landing_screen_opens_and_exits() -> Result<(), Box<dyn std::error::Error>> {
    let bin = assert_cmd::cargo::cargo_bin("tubequiz");
    // unroutable backend; nothing is requested before exit
    let cmd = format!(
        "{} --backend http://127.0.0.1:9 --link https://youtu.be/abc",
        bin.display()
    );

    let mut p = spawn(cmd)?;
    std::thread::sleep(Duration::from_millis(200));

    // open the start screen and back out again
    p.send("\t")?;
    p.send("\r")?;
    std::thread::sleep(Duration::from_millis(100));
    p.send("\x1b")?; // ESC: start -> landing
    std::thread::sleep(Duration::from_millis(100));

    // ESC on landing quits
    p.send("\x1b")?;

    p.expect(Eof)?;
    Ok(())
}

#[test]
#[cfg(target_os = "linux")]
fn write_config_saves_effective_settings() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempfile::tempdir()?;
    let config_home = home.path().join("config");

    assert_cmd::Command::cargo_bin("tubequiz")?
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["--write-config", "-n", "12", "-d", "hard"])
        .assert()
        .success();

    let path = config_home.join("tubequiz").join("config.json");
    let saved: serde_json::Value = serde_json::from_slice(&std::fs::read(path)?)?;
    assert_eq!(saved["question_count"], 12);
    assert_eq!(saved["difficulty"], "hard");
    Ok(())
}
