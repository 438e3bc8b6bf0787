//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing remarkup fixtures to temporary directories
//! and running the compiled binary against them.

#![allow(dead_code)]

use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Base URL used by all integration tests.
pub const BASE_URL: &str = "http://test.phabricator";

/// Writes file into directory, creating parent directories as needed.
///
/// # Returns
///
/// Full path of the written file
///
/// # Errors
///
/// Returns error if directory creation or file write fails
pub fn write_file(dir: &Path, path: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(path);
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Creates temporary directory holding a single remarkup file.
///
/// # Errors
///
/// Returns error if the directory or file cannot be created
pub fn create_fixture(content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = write_file(dir.path(), "task.txt", content)?;
    Ok((dir, path))
}

/// Runs the remarkup binary with arguments, feeding `stdin` to it.
///
/// # Errors
///
/// Returns error if the process cannot be spawned or awaited
pub fn run_binary(args: &[&str], stdin: &str) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_remarkup"))
        .args(args)
        .env_remove("REMARKUP_BASE_URL")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    // The binary may exit before reading stdin, e.g. on invalid arguments.
    if let Some(mut input) = child.stdin.take()
        && let Err(err) = input.write_all(stdin.as_bytes())
        && err.kind() != std::io::ErrorKind::BrokenPipe
    {
        return Err(err.into());
    }

    Ok(child.wait_with_output()?)
}
