//! Fuzzy search handler.

use crate::doc::{LookupOptions, MAX_SEARCH_RESULTS};
use crate::state::DocsState;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query, matched approximately against element names and 'Parent#member' ids
    pub query: String,
    /// Configured source name or a raw docgen JSON URL (default: the configured default source)
    #[serde(default)]
    pub source: Option<String>,
    /// Include private elements in the results (default: false)
    #[serde(default)]
    pub include_private: bool,
    /// Maximum number of results to return (default and maximum: 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Run a fuzzy search and list the hits, best first.
pub async fn handle_search(state: &DocsState, request: SearchRequest) -> Result<String, String> {
    let doc = state
        .load(request.source.as_deref(), false)
        .await
        .map_err(|e| e.to_string())?;

    let options = LookupOptions {
        exclude_private: !request.include_private,
    };
    let limit = request
        .limit
        .unwrap_or(MAX_SEARCH_RESULTS)
        .clamp(1, MAX_SEARCH_RESULTS);

    let Some(results) = doc.search(&request.query, options) else {
        return Ok(format!(
            "No results found for '{}' in {}/{} ({}).",
            request.query,
            doc.project(),
            doc.repo(),
            doc.branch()
        ));
    };

    let mut output = format!("Search results for '{}':\n\n", request.query);
    for (i, element) in results.iter().take(limit).enumerate() {
        let _ = writeln!(output, "{}. {} ({})", i + 1, element.link(), element.kind());
    }
    Ok(output)
}
