//! Persistence of the feature table.

use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{PrepError, PrepResult};

/// Write `df` as comma-separated text with a header row.
///
/// The table goes to a sibling staging file first and is renamed over
/// `path` once complete, so a failed write leaves the previous output as
/// it was.
pub fn write_features(df: &mut DataFrame, path: &Path) -> PrepResult<()> {
    let staging = staging_path(path);
    let result = write_csv(df, &staging).and_then(|_| {
        fs::rename(&staging, path).map_err(|source| PrepError::Io {
            path: path.to_path_buf(),
            source,
        })
    });

    if result.is_err() && staging.exists() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_csv(df: &mut DataFrame, path: &Path) -> PrepResult<()> {
    let mut file = File::create(path).map_err(|source| PrepError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(df)?;
    debug!("wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
