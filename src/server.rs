//! MCP server exposing documentation lookups as tools.

use crate::config::Config;
use crate::state::DocsState;
use crate::tools::docs::{DocsRequest, handle_docs};
use crate::tools::search::{SearchRequest, handle_search};
use crate::tools::sources::handle_list_sources;
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server for docgen documentation queries.
#[derive(Clone)]
pub struct DocsServer {
    /// Shared state (configuration, tree cache, fetcher)
    state: Arc<DocsState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocsServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocsServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DocsServer {
    pub fn new(config: Config) -> Self {
        Self::with_state(Arc::new(DocsState::new(config)))
    }

    pub fn with_state(state: Arc<DocsState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    pub const fn state(&self) -> &Arc<DocsState> {
        &self.state
    }

    #[tool(
        description = "Look up a documented class, interface, typedef or member. Accepts paths like 'Guild', 'Guild.owner', 'Client#fetch()' or 'Client#e-ready'; member lookups continue through the member's type ('Guild.owner.username'). Falls back to a list of fuzzy search results when nothing matches exactly.",
        input_schema = inline_schema_for_type::<DocsRequest>()
    )]
    async fn docs(
        &self,
        Parameters(request): Parameters<DocsRequest>,
    ) -> std::result::Result<String, String> {
        handle_docs(&self.state, request).await
    }

    #[tool(
        description = "Fuzzy search documented elements by name or 'Parent#member' id. Tolerates typos and returns up to 10 ranked links, best match first.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "List the configured documentation sources, the default one, and which are already loaded."
    )]
    async fn list_sources(&self) -> std::result::Result<String, String> {
        Ok(handle_list_sources(&self.state).await)
    }
}

#[tool_handler]
impl ServerHandler for DocsServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docgen-index: documentation lookup for docgen-generated JavaScript library docs. \
                 Use docs for exact paths (e.g. 'Guild.owner'), search for approximate names, \
                 and list_sources to see which documentation versions are configured."
                    .to_string(),
            )
    }
}

/// Generate an inline JSON schema for MCP tools.
///
/// Sets `inline_subschemas` so clients see plain inline definitions instead of `$ref`s.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let schema = settings.into_generator().into_root_schema_for::<T>();
    match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => Arc::new(object),
        other => {
            tracing::error!("Schema for {} is not a JSON object: {:?}", std::any::type_name::<T>(), other);
            Arc::new(JsonObject::new())
        }
    }
}
