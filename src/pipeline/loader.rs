//! Raw sales file reader.

use polars::prelude::*;
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{PrepError, PrepResult};
use crate::setting::SourceEncoding;

/// Read the comma-separated raw file at `path` into a DataFrame.
///
/// The header row is kept verbatim and column types are inferred over the
/// whole file. Nothing is renamed or validated here.
pub fn load_raw(path: &Path, encoding: SourceEncoding) -> PrepResult<DataFrame> {
    let bytes = fs::read(path).map_err(|e| PrepError::from_io(path, e))?;
    debug!("read {} bytes from {}", bytes.len(), path.display());

    let text = decode(path, bytes, encoding)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .into_reader_with_file_handle(Cursor::new(text.into_bytes()))
        .finish()?;

    info!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

fn decode(path: &Path, bytes: Vec<u8>, encoding: SourceEncoding) -> PrepResult<String> {
    match encoding {
        SourceEncoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        SourceEncoding::Utf8 => String::from_utf8(bytes).map_err(|e| PrepError::Decode {
            path: path.to_path_buf(),
            encoding: encoding.name(),
            detail: e.utf8_error().to_string(),
        }),
    }
}
