//! In-memory answer database. All data is lost on process exit.

use std::sync::Mutex;

use crate::record::Record;

use super::{AnswerStore, StoreResult};

#[derive(Debug, Default)]
pub struct MemStore {
    records: Mutex<Vec<Record>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }
}

impl AnswerStore for MemStore {
    fn fetch_all(&self) -> StoreResult<Vec<Record>> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn overwrite(&self, records: &[Record]) -> StoreResult<()> {
        *self.records.lock().unwrap_or_else(|e| e.into_inner()) = records.to_vec();
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".into()
    }
}
