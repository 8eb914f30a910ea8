//! Diagnostic error types for the resposta assistant.
//!
//! Store and network failures each get their own enum with miette
//! `#[diagnostic]` derives. None of these ever reach the person chatting:
//! the resolver turns them into fallback prose. They surface only through
//! the CLI's maintenance commands and in the logs.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the assistant.
#[derive(Debug, Error, Diagnostic)]
pub enum AssistError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] crate::config::ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Path(#[from] crate::paths::PathError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    #[diagnostic(
        code(resposta::store::io),
        help(
            "A filesystem operation on the answer database failed. Check that the \
             directory exists, has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed answer database {origin}: {message}")]
    #[diagnostic(
        code(resposta::store::serde),
        help(
            "The database must be a JSON array of objects with a \"pergunta\" \
             (string or list of strings) and a \"resposta\" string."
        )
    )]
    Serialization { origin: String, message: String },

    #[error("answer database at {url} unreachable: {message}")]
    #[diagnostic(
        code(resposta::store::http),
        help(
            "The remote database document could not be read or overwritten. \
             Check the URL and that the server accepts GET and PUT."
        )
    )]
    Http { url: String, message: String },
}

/// Convenience alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Fetch errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum FetchError {
    #[error("HTTP {code} from {url}")]
    #[diagnostic(
        code(resposta::fetch::status),
        help("The remote source answered with a non-success status.")
    )]
    Status { url: String, code: u16 },

    #[error("transport error fetching {url}: {message}")]
    #[diagnostic(
        code(resposta::fetch::transport),
        help("Check network connectivity and that the host is reachable.")
    )]
    Transport { url: String, message: String },

    #[error("failed to read body from {url}: {message}")]
    #[diagnostic(code(resposta::fetch::body))]
    Body { url: String, message: String },

    #[error("unexpected response from {url}: {message}")]
    #[diagnostic(
        code(resposta::fetch::parse),
        help("The remote source changed its response format.")
    )]
    Parse { url: String, message: String },

    #[error("no lookup provider for {provider}")]
    #[diagnostic(
        code(resposta::fetch::not_implemented),
        help("This question category has no remote source wired up yet.")
    )]
    NotImplemented { provider: String },
}

/// Convenience alias for remote lookups.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Convenience alias for assistant-level operations.
pub type AssistResult<T> = std::result::Result<T, AssistError>;
