//! Program persistence
//!
//! Writes a finished program to the output directory in a single call.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory programs are written to unless told otherwise
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Write `gcode` to `dir/file_name`, creating `dir` if needed
pub fn write_program(dir: &Path, file_name: &str, gcode: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(file_name);
    fs::write(&path, gcode).with_context(|| format!("Failed to write {}", path.display()))?;

    info!("File written to {}", path.display());
    Ok(path)
}
