//! Formatting utilities for documentation display.

mod builders;
pub(crate) mod markup;
pub(crate) mod renderers;

pub use builders::TypeFormatter;
pub use markup::DESCRIPTION_LIMIT;
pub use renderers::{BLANK_FIELD_NAME, Embed, EmbedAuthor, EmbedField};

pub(crate) use builders::is_identifier;
