//! Answer database backends.
//!
//! The database is a flat JSON array of [`Record`]s, read whole and written
//! whole. Three backends share the [`AnswerStore`] trait:
//!
//! - [`JsonFileStore`]: a local `database.json`
//! - [`HttpStore`]: a remote document read with GET and replaced with PUT
//! - [`MemStore`]: process-local, for tests and throwaway sessions
//!
//! Appending is read-modify-overwrite with no locking: two writers racing
//! can lose one update. There is a single interactive client, so that is
//! tolerated.

pub mod file;
pub mod http;
pub mod mem;

use std::path::Path;

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::record::Record;

pub use crate::error::StoreResult;
pub use file::JsonFileStore;
pub use http::HttpStore;
pub use mem::MemStore;

/// Read/overwrite access to the answer database.
pub trait AnswerStore: Send + Sync {
    /// Read every record, in store order.
    fn fetch_all(&self) -> StoreResult<Vec<Record>>;

    /// Replace the whole collection.
    fn overwrite(&self, records: &[Record]) -> StoreResult<()>;

    /// Short human-readable location, for logs.
    fn describe(&self) -> String;

    /// Append one record and persist the full collection.
    fn append_and_persist(&self, record: Record) -> StoreResult<()> {
        let mut records = self.fetch_all()?;
        records.push(record);
        self.overwrite(&records)?;
        tracing::info!(
            store = %self.describe(),
            total = records.len(),
            "appended record to answer database"
        );
        Ok(())
    }
}

/// Parse a database document.
pub(crate) fn decode(origin: &str, data: &str) -> StoreResult<Vec<Record>> {
    serde_json::from_str(data).map_err(|e| StoreError::Serialization {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

/// Serialize a database document.
pub(crate) fn encode(origin: &str, records: &[Record]) -> StoreResult<String> {
    serde_json::to_string_pretty(records).map_err(|e| StoreError::Serialization {
        origin: origin.to_string(),
        message: e.to_string(),
    })
}

/// Pick a backend from config: a URL wins, then an explicit path, then the
/// default file location.
pub fn open_store(
    config: &StoreConfig,
    default_path: &Path,
    timeout: Option<std::time::Duration>,
) -> Box<dyn AnswerStore> {
    if let Some(url) = &config.url {
        Box::new(HttpStore::new(url.clone(), timeout))
    } else {
        let path = config.path.as_deref().unwrap_or(default_path);
        Box::new(JsonFileStore::new(path))
    }
}
