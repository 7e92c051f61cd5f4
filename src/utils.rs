//! Payload I/O helpers for the command layer
//!
//! The core engine is pure; reading payloads and writing results lives here.

use crate::core::error::{RemapResult, ResultExt};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Read a payload from a file, or from stdin when no path is given
pub fn read_payload(path: Option<&Path>) -> RemapResult<String> {
  match path {
    Some(p) => fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display())),
    None => {
      let mut buffer = String::new();
      std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
      Ok(buffer)
    }
  }
}

/// Replace a file's contents atomically.
///
/// Writes to a temp file in the target's directory, then persists over the
/// original, so a crash mid-write never leaves a half-transformed file.
pub fn write_atomic(path: &Path, contents: &str) -> RemapResult<()> {
  let dir = path.parent().unwrap_or_else(|| Path::new("."));

  let mut file = tempfile::NamedTempFile::new_in(dir)
    .with_context(|| format!("Failed to create temp file next to {}", path.display()))?;

  use std::io::Write;
  file
    .write_all(contents.as_bytes())
    .with_context(|| format!("Failed to write transformed contents for {}", path.display()))?;

  file
    .persist(path)
    .map_err(|e| e.error)
    .with_context(|| format!("Failed to replace {}", path.display()))?;

  Ok(())
}
