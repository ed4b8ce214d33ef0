//! Export artifacts on disk.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::{OutputError, Result};

/// File name prefix of generated exports.
pub const EXPORT_PREFIX: &str = "donnees_mappees_";

/// Export file name stamped with `now` in epoch milliseconds.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("{EXPORT_PREFIX}{}.csv", now.timestamp_millis())
}

/// Writes `contents` to `path`, creating missing parent directories.
pub fn write_csv(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote export");
    Ok(())
}

/// Writes `contents` into `dir` under a timestamped export name.
pub fn write_export(dir: &Path, contents: &str) -> Result<PathBuf> {
    let path = dir.join(export_file_name(Utc::now()));
    write_csv(&path, contents)?;
    Ok(path)
}
