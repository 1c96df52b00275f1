//! Nymeria `.npz` export loader.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::{Path, PathBuf};

use ndarray::{ArrayD, OwnedRepr};
use ndarray_npy::{NpzReader, ReadableElement};

use super::{BodyDataProvider, XsensData};
use crate::constants;
use crate::error::{Error, Result};

/// Provider backed by a Nymeria `xdata.npz` archive.
#[derive(Debug, Clone)]
pub struct NpzBodyProvider {
    data: XsensData,
    source: PathBuf,
    glb_path: Option<PathBuf>,
}

impl NpzBodyProvider {
    /// Archive the data was loaded from.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }
}

impl BodyDataProvider for NpzBodyProvider {
    fn xsens_data(&self) -> &XsensData {
        &self.data
    }

    fn glb_path(&self) -> Option<&Path> {
        self.glb_path.as_deref()
    }
}

/// Creates a provider from an archive path or a directory holding `xdata.npz`.
///
/// The GLB path is carried along for callers that want the skin mesh; this
/// crate does not parse it.
///
/// # Errors
///
/// Returns [`Error::ProviderLoad`] if no archive can be located and
/// [`Error::Npz`] if the archive cannot be read.
pub fn create_body_data_provider(data_path: &Path, glb_file: Option<&Path>) -> Result<NpzBodyProvider> {
    let source = resolve_archive(data_path)?;
    let file = File::open(&source).map_err(|e| Error::ProviderLoad {
        path: source.clone(),
        reason: e.to_string(),
    })?;
    let data = read_xsens_npz(BufReader::new(file))?;
    tracing::info!(
        source = %source.display(),
        keys = data.keys().len(),
        "loaded xsens archive"
    );

    let glb_path = glb_file.map(Path::to_path_buf);
    if let Some(glb) = &glb_path {
        if !glb.is_file() {
            tracing::warn!(glb = %glb.display(), "GLB file not found, skin unavailable");
        }
    }

    Ok(NpzBodyProvider {
        data,
        source,
        glb_path,
    })
}

/// Resolves `--data_dir` to the archive file it designates.
fn resolve_archive(path: &Path) -> Result<PathBuf> {
    if path.is_file() {
        return Ok(path.to_path_buf());
    }
    if path.is_dir() {
        let candidate = path.join(constants::DEFAULT_XDATA_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        return Err(Error::ProviderLoad {
            path: path.to_path_buf(),
            reason: format!("no {} in directory", constants::DEFAULT_XDATA_FILE_NAME),
        });
    }
    Err(Error::ProviderLoad {
        path: path.to_path_buf(),
        reason: "path not found".to_string(),
    })
}

/// Reads every numeric array of an `.npz` archive, widened to `f64`.
///
/// Entries with non-numeric dtypes are skipped.
///
/// # Errors
///
/// Returns [`Error::Npz`] if the archive itself is unreadable.
pub fn read_xsens_npz<R: Read + Seek>(reader: R) -> Result<XsensData> {
    let mut npz = NpzReader::new(reader)?;
    let mut data = XsensData::new();

    for name in npz.names()? {
        let key = name.strip_suffix(".npy").unwrap_or(&name).to_string();
        match read_widened(&mut npz, &name) {
            Some(array) => data.insert(key, array),
            None => tracing::debug!(entry = %name, "skipping non-numeric npz entry"),
        }
    }

    Ok(data)
}

#[allow(clippy::cast_precision_loss)]
fn read_widened<R: Read + Seek>(npz: &mut NpzReader<R>, name: &str) -> Option<ArrayD<f64>> {
    read_as(npz, name, |v: f64| v)
        .or_else(|| read_as::<_, f32>(npz, name, f64::from))
        .or_else(|| read_as(npz, name, |v: i64| v as f64))
        .or_else(|| read_as::<_, i32>(npz, name, f64::from))
        .or_else(|| read_as(npz, name, |v: u64| v as f64))
        .or_else(|| read_as::<_, u32>(npz, name, f64::from))
        .or_else(|| read_as::<_, i16>(npz, name, f64::from))
        .or_else(|| read_as::<_, u16>(npz, name, f64::from))
        .or_else(|| read_as::<_, i8>(npz, name, f64::from))
        .or_else(|| read_as::<_, u8>(npz, name, f64::from))
}

fn read_as<R, T>(npz: &mut NpzReader<R>, name: &str, widen: impl Fn(T) -> f64) -> Option<ArrayD<f64>>
where
    R: Read + Seek,
    T: ReadableElement + Copy,
{
    npz.by_name::<OwnedRepr<T>, _>(name)
        .ok()
        .map(|array: ArrayD<T>| array.mapv(widen))
}
