use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File, FileTimes};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn reaper() -> Command {
    let mut cmd = Command::cargo_bin("cache-reaper").unwrap();
    for var in [
        "REAPER_DIR",
        "REAPER_MAX_SIZE",
        "REAPER_INTERVAL",
        "REAPER_CONFIG",
        "REAPER_DRY_RUN",
        "REAPER_ALLOW_ANY_DIR",
        "REAPER_LOG_LEVEL",
        "REAPER_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Three 100-byte files accessed one, two and three hours ago, newest last.
fn populate(dir: &Path) {
    let now = SystemTime::now();
    for (name, hours) in [("old", 3), ("middle", 2), ("new", 1)] {
        let path = dir.join(name);
        fs::write(&path, vec![0u8; 100]).unwrap();
        let accessed = now - Duration::from_secs(hours * 3600);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_times(FileTimes::new().set_accessed(accessed))
            .unwrap();
    }
}

#[test]
fn test_once_evicts_oldest_file() {
    let cache = TempDir::new().unwrap();
    populate(cache.path());

    reaper()
        .arg("--dir")
        .arg(cache.path())
        .args(["--max-size", "250", "--once"])
        .assert()
        .success();

    assert!(!cache.path().join("old").exists());
    assert!(cache.path().join("middle").exists());
    assert!(cache.path().join("new").exists());
}

#[test]
fn test_once_under_budget_keeps_everything() {
    let cache = TempDir::new().unwrap();
    populate(cache.path());

    reaper()
        .arg("--dir")
        .arg(cache.path())
        .args(["--max-size", "1k", "--once"])
        .assert()
        .success();

    for name in ["old", "middle", "new"] {
        assert!(cache.path().join(name).exists());
    }
}

#[test]
fn test_dry_run_deletes_nothing() {
    let cache = TempDir::new().unwrap();
    populate(cache.path());

    reaper()
        .arg("--dir")
        .arg(cache.path())
        .args(["--max-size", "100", "--once", "--dry-run", "--log-format", "json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DRY RUN"));

    for name in ["old", "middle", "new"] {
        assert!(cache.path().join(name).exists());
    }
}

#[test]
fn test_config_file_is_honoured() {
    let cache = TempDir::new().unwrap();
    populate(cache.path());

    let config_dir = TempDir::new().unwrap();
    let config = config_dir.path().join("reaper.toml");
    fs::write(
        &config,
        format!(
            "dir = {:?}\nmax_size = \"250b\"\n",
            cache.path().display().to_string()
        ),
    )
    .unwrap();

    reaper()
        .arg("--config")
        .arg(&config)
        .arg("--once")
        .assert()
        .success();

    assert!(!cache.path().join("old").exists());
    assert!(cache.path().join("new").exists());
}

#[test]
fn test_environment_supplies_arguments() {
    let cache = TempDir::new().unwrap();
    populate(cache.path());

    reaper()
        .env("REAPER_DIR", cache.path())
        .env("REAPER_MAX_SIZE", "250")
        .arg("--once")
        .assert()
        .success();

    assert!(!cache.path().join("old").exists());
}

#[test]
fn test_invalid_size_fails() {
    let cache = TempDir::new().unwrap();

    reaper()
        .arg("--dir")
        .arg(cache.path())
        .args(["--max-size", "lots", "--once"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid size"));
}

#[test]
fn test_zero_interval_fails() {
    let cache = TempDir::new().unwrap();

    reaper()
        .arg("--dir")
        .arg(cache.path())
        .args(["--interval", "0s"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid interval"));
}

#[test]
fn test_missing_directory_fails() {
    let cache = TempDir::new().unwrap();

    reaper()
        .arg("--dir")
        .arg(cache.path().join("missing"))
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsafe cache directory"));
}

#[test]
fn test_no_directory_fails() {
    reaper()
        .arg("--once")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No cache directory"));
}

#[cfg(unix)]
#[test]
fn test_directory_outside_temp_is_refused() {
    reaper()
        .args(["--dir", "/", "--once", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--allow-any-dir"));
}
