//! Answer database served as a remote JSON document.
//!
//! Reads are a GET of the whole document and writes are a PUT of the whole
//! document. There is no partial-append protocol.

use std::time::Duration;

use crate::error::StoreError;
use crate::record::Record;

use super::{AnswerStore, StoreResult, decode, encode};

pub struct HttpStore {
    url: String,
    agent: ureq::Agent,
}

impl HttpStore {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            url: url.into(),
            agent: builder.build(),
        }
    }

    fn http_err(&self, e: ureq::Error) -> StoreError {
        let message = match e {
            ureq::Error::Status(code, _) => format!("HTTP {code}"),
            ureq::Error::Transport(transport) => transport.to_string(),
        };
        StoreError::Http {
            url: self.url.clone(),
            message,
        }
    }
}

impl AnswerStore for HttpStore {
    fn fetch_all(&self) -> StoreResult<Vec<Record>> {
        let response = self
            .agent
            .get(&self.url)
            .call()
            .map_err(|e| self.http_err(e))?;
        let body = response.into_string().map_err(|e| StoreError::Http {
            url: self.url.clone(),
            message: format!("failed to read body: {e}"),
        })?;
        decode(&self.url, &body)
    }

    fn overwrite(&self, records: &[Record]) -> StoreResult<()> {
        let body = encode(&self.url, records)?;
        self.agent
            .put(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| self.http_err(e))?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

impl std::fmt::Debug for HttpStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStore").field("url", &self.url).finish()
    }
}
