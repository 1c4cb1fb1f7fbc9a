//! Element lookup handler: exact path resolution with a fuzzy-search fallback.

use crate::doc::LookupOptions;
use crate::state::DocsState;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DocsRequest {
    /// Element path such as 'Guild', 'Guild.owner', 'Client#fetch()' or 'Client#e-ready'
    pub query: String,
    /// Configured source name or a raw docgen JSON URL (default: the configured default source)
    #[serde(default)]
    pub source: Option<String>,
    /// List private properties and methods too (default: false)
    #[serde(default)]
    pub include_private: bool,
    /// Re-download the source even when it is cached (default: false)
    #[serde(default)]
    pub force: bool,
}

/// Resolve `request.query` and render the result as markdown.
pub async fn handle_docs(state: &DocsState, request: DocsRequest) -> Result<String, String> {
    let doc = state
        .load(request.source.as_deref(), request.force)
        .await
        .map_err(|e| e.to_string())?;

    let options = LookupOptions {
        exclude_private: !request.include_private,
    };

    match doc.resolve_embed(&request.query, options) {
        Some(embed) => Ok(embed.to_markdown()),
        None => Ok(format!(
            "No documentation found for '{}' in {}/{} ({}).\n\n\
             Search tips:\n\
             • Use '.' or '#' between a class and its member, e.g. 'Guild.owner'\n\
             • Append '()' to match methods only, or prefix 'e-' to match events only\n\
             • Try the search tool for approximate matches",
            request.query,
            doc.project(),
            doc.repo(),
            doc.branch()
        )),
    }
}
