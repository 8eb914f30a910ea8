//! Answer database backed by a local JSON file.

use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::record::Record;

use super::{AnswerStore, StoreResult, decode, encode};

/// `database.json` on the local filesystem.
///
/// A missing file reads as an empty database; it is created on the first
/// write.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl AnswerStore for JsonFileStore {
    fn fetch_all(&self) -> StoreResult<Vec<Record>> {
        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.io_err(e)),
        };
        decode(&self.describe(), &data)
    }

    fn overwrite(&self, records: &[Record]) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            }
        }
        let json = encode(&self.describe(), records)?;
        std::fs::write(&self.path, json).map_err(|e| self.io_err(e))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
