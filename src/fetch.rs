//! Remote fetch capability.
//!
//! Adapters never talk to the network directly: they receive a
//! [`Fetcher`] so their parsing can be exercised against canned markup.
//! [`HttpFetcher`] is the real thing, built on `ureq`.

use std::sync::{Arc, Mutex};

use crate::config::HttpConfig;
use crate::error::{FetchError, FetchResult};

/// Maximum response body size (2 MB). Rendered encyclopedia pages are large.
const MAX_RESPONSE_SIZE: usize = 2 * 1024 * 1024;

/// Reject bodies over `limit` bytes. Never truncates.
fn check_size(url: &str, body: String, limit: usize) -> FetchResult<String> {
    if body.len() > limit {
        tracing::warn!(url, size = body.len(), limit, "response body too large");
        return Err(FetchError::Body {
            url: url.to_string(),
            message: format!("response is {} bytes, limit is {limit}", body.len()),
        });
    }
    Ok(body)
}

/// Fetch a URL and return its body as text.
pub trait Fetcher: Send + Sync {
    fn get_text(&self, url: &str) -> FetchResult<String>;
}

impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    fn get_text(&self, url: &str) -> FetchResult<String> {
        (**self).get_text(url)
    }
}

/// HTTP GET via a shared `ureq` agent.
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Self {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Self {
            agent: builder.build(),
            user_agent: config.user_agent.clone(),
        }
    }
}

impl Fetcher for HttpFetcher {
    fn get_text(&self, url: &str) -> FetchResult<String> {
        tracing::debug!(url, "GET");
        match self
            .agent
            .get(url)
            .set("User-Agent", &self.user_agent)
            .call()
        {
            Ok(response) => {
                let body = response.into_string().map_err(|e| FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                })?;
                check_size(url, body, MAX_RESPONSE_SIZE)
            }
            Err(ureq::Error::Status(code, _)) => Err(FetchError::Status {
                url: url.to_string(),
                code,
            }),
            Err(ureq::Error::Transport(transport)) => Err(FetchError::Transport {
                url: url.to_string(),
                message: transport.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Canned reply for a [`ScriptedFetcher`] route.
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
    Unreachable,
}

/// Offline fetcher answering from URL-prefix routes. Unrouted URLs are
/// unreachable. Every requested URL is recorded.
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    routes: Vec<(String, Reply)>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer URLs starting with `prefix`. Earlier routes take precedence.
    pub fn route(mut self, prefix: impl Into<String>, reply: Reply) -> Self {
        self.routes.push((prefix.into(), reply));
        self
    }

    pub fn body(self, prefix: impl Into<String>, body: impl Into<String>) -> Self {
        self.route(prefix, Reply::Body(body.into()))
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Fetcher for ScriptedFetcher {
    fn get_text(&self, url: &str) -> FetchResult<String> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        let reply = self
            .routes
            .iter()
            .find(|(prefix, _)| url.starts_with(prefix.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or(Reply::Unreachable);

        match reply {
            Reply::Body(body) => Ok(body),
            Reply::Status(code) => Err(FetchError::Status {
                url: url.to_string(),
                code,
            }),
            Reply::Unreachable => Err(FetchError::Transport {
                url: url.to_string(),
                message: "connection refused".into(),
            }),
        }
    }
}
