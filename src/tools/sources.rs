//! Source listing handler.

use crate::state::DocsState;
use std::fmt::Write as _;

/// List configured sources, marking the default and the ones already loaded.
pub async fn handle_list_sources(state: &DocsState) -> String {
    let config = state.config();
    let mut output = format!("Documentation sources ({}):\n", config.sources.len());

    for (name, url) in &config.sources {
        let mut markers = Vec::new();
        if *name == config.default_source {
            markers.push("default");
        }
        if state.cache().contains(url).await {
            markers.push("loaded");
        }

        let _ = write!(output, "  • {name}: {url}");
        if !markers.is_empty() {
            let _ = write!(output, " ({})", markers.join(", "));
        }
        output.push('\n');
    }

    output.push_str("\nAny raw docgen JSON URL can also be passed as a source.\n");
    output
}
