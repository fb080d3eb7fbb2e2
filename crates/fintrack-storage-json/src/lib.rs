//! Filesystem JSON backend for the Ledger Store's blob interface.
//!
//! Each collection key maps to `<dir>/<key>.json`. Writes go to a `.tmp`
//! sibling first and are renamed into place so a crash mid-write never
//! leaves a half-written collection behind.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use fintrack_core::{BlobStore, CoreError};

const BLOB_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// One-file-per-key JSON persistence rooted at a data directory.
#[derive(Debug, Clone)]
pub struct JsonBlobStore {
    dir: PathBuf,
}

impl JsonBlobStore {
    /// Creates the data directory if needed and roots the store there.
    pub fn open(dir: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", key, BLOB_EXTENSION))
    }
}

impl BlobStore for JsonBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let path = self.blob_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, blob: &str) -> Result<(), CoreError> {
        let path = self.blob_path(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = tmp_path(&path);
        write_atomic(&tmp, blob)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), CoreError> {
        let path = self.blob_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
