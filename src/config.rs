//! Assistant configuration, persisted as TOML.
//!
//! Every field has a serde default, so a missing or partial
//! `config.toml` still yields a working assistant pointed at the public
//! Portuguese-language sources.

use std::path::{Path, PathBuf};
use std::time::Duration;

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or saving the config file.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(resposta::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {path}: {message}")]
    #[diagnostic(
        code(resposta::config::parse),
        help("Check the TOML syntax, or regenerate it with `resposta config init`.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(resposta::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Where the answer database lives. `url` wins over `path` when both are set;
/// with neither, the XDG data directory is used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Per-request timeout. `0` disables it.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    "AssistenteVirtual/1.0".into()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Remote endpoints and the knobs of their parsers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Rendered HTML of the encyclopedia page carrying the president infobox.
    #[serde(default = "default_president_page")]
    pub president_page: String,
    /// Government portal scraped for `.president-name`.
    #[serde(default = "default_portal_page")]
    pub portal_page: String,
    /// Encyclopedia query API (MediaWiki `api.php`).
    #[serde(default = "default_summary_api")]
    pub summary_api: String,
    /// CORS relay that wraps a fetched page as `{"contents": "..."}`.
    #[serde(default = "default_search_relay")]
    pub search_relay: String,
    #[serde(default = "default_search_engine")]
    pub search_engine: String,
    /// Appended to every web search query.
    #[serde(default = "default_search_site_filter")]
    pub search_site_filter: String,
    /// Marker the web adapter looks for in the search results page.
    #[serde(default = "default_web_keyword")]
    pub web_keyword: String,
    #[serde(default = "default_web_snippet_chars")]
    pub web_snippet_chars: usize,
    #[serde(default = "default_summary_chars")]
    pub summary_chars: usize,
}

fn default_president_page() -> String {
    "https://pt.wikipedia.org/api/rest_v1/page/html/Presidente_do_Brasil".into()
}
fn default_portal_page() -> String {
    "https://www.gov.br/planalto/pt-br".into()
}
fn default_summary_api() -> String {
    "https://pt.wikipedia.org/w/api.php".into()
}
fn default_search_relay() -> String {
    "https://api.allorigins.win/get".into()
}
fn default_search_engine() -> String {
    "https://www.google.com/search".into()
}
fn default_search_site_filter() -> String {
    "site:.gov.br".into()
}
fn default_web_keyword() -> String {
    "Presidente do Brasil".into()
}
fn default_web_snippet_chars() -> usize {
    200
}
fn default_summary_chars() -> usize {
    250
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            president_page: default_president_page(),
            portal_page: default_portal_page(),
            summary_api: default_summary_api(),
            search_relay: default_search_relay(),
            search_engine: default_search_engine(),
            search_site_filter: default_search_site_filter(),
            web_keyword: default_web_keyword(),
            web_snippet_chars: default_web_snippet_chars(),
            summary_chars: default_summary_chars(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    24 * 60 * 60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl AssistantConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load from a TOML file, falling back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }
}
