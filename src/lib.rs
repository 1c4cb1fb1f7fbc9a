//! Documentation index and resolution engine for docgen JSON payloads.
//!
//! A [`Doc`] is built from one published payload and answers exact path lookups
//! (`Guild.owner`, `Client#fetch()`), fuzzy searches, and renders elements as
//! [`Embed`] cards. [`DocsServer`] exposes the same over MCP.

// Module declarations
pub mod cache;
pub mod config;
pub mod doc;
pub mod error;
pub mod fetch;
pub mod format;
pub mod item;
pub mod logging;
pub mod raw;
pub mod search;
pub mod server;
pub mod state;
pub mod tools;

// Public re-exports
pub use cache::SourceCache;
pub use config::{Config, SiteConfig};
pub use doc::{Doc, LookupOptions, MAX_SEARCH_RESULTS, SourceOrigin};
pub use error::{Result, SourceError};
pub use fetch::{Fetch, HttpFetcher};
pub use format::{Embed, EmbedAuthor, EmbedField, TypeFormatter};
pub use item::{Access, Detail, DocElement, DocKind, ElementRef};
pub use raw::{RawDocs, RawElement};
pub use search::{FuzzyIndex, FuzzyOptions, SearchEntry};
pub use server::DocsServer;
pub use state::DocsState;
