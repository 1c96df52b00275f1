//! Reading and writing record files.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::Value;
use crate::error::{Error, Result};

/// Writes a record tree to `path` as a single JSON document.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be created or written, and
/// [`Error::Json`] if encoding fails.
pub fn save_record(value: &Value, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| Error::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    tracing::debug!(path = %path.display(), "record written");
    Ok(())
}

/// Reads a record tree previously written by [`save_record`].
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `path` does not exist, [`Error::Io`] on
/// other filesystem failures, and [`Error::Json`] if the content is not a
/// record tree.
pub fn load_record(path: &Path) -> Result<Value> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::NotFound(path.to_path_buf())
        } else {
            Error::io(path, e)
        }
    })?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    Ok(value)
}
