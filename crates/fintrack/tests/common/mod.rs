use std::path::PathBuf;
use std::sync::Mutex;

use assert_cmd::Command;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Allocates a fresh data directory that survives until the run ends.
pub fn data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// A `fintrack_cli` invocation in script mode against `dir`.
pub fn cli(dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("fintrack_cli").expect("binary built");
    cmd.env("FINTRACK_CLI_SCRIPT", "1")
        .env("FINTRACK_DATA_DIR", dir);
    cmd
}
