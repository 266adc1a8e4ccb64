use std::{fs, path::PathBuf, process::Command};

fn write_fixture(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("maze-runner-cli-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create fixture directory");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn scripted_run_prints_a_won_summary() {
    let map = write_fixture("corridor.txt", "0,0=1\n1,0=5\n2,0=2\nnot a record\n");
    let output = Command::new(env!("CARGO_BIN_EXE_maze-runner"))
        .arg(&map)
        .args(["--script", "R100", "--frame-millis", "10"])
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to launch maze-runner");

    assert!(output.status.success(), "maze-runner should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("state:    Won"), "{stdout}");
    assert!(stdout.contains("ticks:    24 (240 ms)"), "{stdout}");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("skipping map record"), "{stderr}");
}

#[test]
fn config_file_limits_the_run() {
    let map = write_fixture("open.txt", "0,0=1\n4,4=0\n");
    let config = write_fixture("short.toml", "[runner]\nmax_ticks = 3\n");
    let output = Command::new(env!("CARGO_BIN_EXE_maze-runner"))
        .arg(&map)
        .arg("--config")
        .arg(&config)
        .output()
        .expect("failed to launch maze-runner");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("state:    Running"), "{stdout}");
    assert!(stdout.contains("ticks:    3 (48 ms)"), "{stdout}");
}

#[test]
fn malformed_script_is_reported() {
    let map = write_fixture("tiny.txt", "0,0=1\n");
    let output = Command::new(env!("CARGO_BIN_EXE_maze-runner"))
        .arg(&map)
        .args(["--script", "Q5"])
        .output()
        .expect("failed to launch maze-runner");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown key `Q`"), "{stderr}");
}
