// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # resposta
//!
//! A small Portuguese-language question-answering assistant. Questions are
//! answered from a local JSON database of taught answers, a table of
//! greetings, or a handful of public web sources, in that order.
//!
//! ## Architecture
//!
//! - **Answer store** (`store`): flat JSON array of records, read whole and overwritten whole
//! - **Intent classifier** (`classify`): keyword regexes with fixed precedence
//! - **Lookup adapters** (`adapters`): encyclopedia infobox/summary, web search relay
//! - **Resolver** (`resolver`): the fixed-priority pipeline, total over its input
//! - **Session cache** (`cache`): one day-long slot for the president lookup
//!
//! ## Library usage
//!
//! ```no_run
//! use resposta::config::AssistantConfig;
//! use resposta::fetch::HttpFetcher;
//! use resposta::resolver::Assistant;
//! use resposta::store::JsonFileStore;
//!
//! let config = AssistantConfig::default();
//! let fetcher = HttpFetcher::new(&config.http);
//! let assistant = Assistant::new(
//!     config,
//!     Box::new(JsonFileStore::new("database.json")),
//!     Box::new(fetcher),
//! );
//! println!("{}", assistant.resolve("quem é o atual presidente do brasil").into_answer().text);
//! ```

pub mod adapters;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod fetch;
pub mod paths;
pub mod record;
pub mod resolver;
pub mod session;
pub mod store;
