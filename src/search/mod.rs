//! Fuzzy search over documentation elements.
//!
//! Each documentation tree carries a [`FuzzyIndex`] of `(id, name)` entries. Queries
//! are scored with a bounded edit-distance match and resolved back to elements by id.

pub(crate) mod index;
pub(crate) mod query;
pub(crate) mod scoring;

pub use index::{FuzzyIndex, SearchEntry};
pub use scoring::FuzzyOptions;

pub(crate) use query::{parse_query_path, split_entry_id};
