use docgen_index::{Config, DocsServer, logging};
use rmcp::{ServiceExt, transport::stdio};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the MCP protocol; logs go to stderr
    logging::init();

    let config = Config::load_or_default()?;
    tracing::info!(
        "Starting docgen-index MCP server ({} sources, default '{}')",
        config.sources.len(),
        config.default_source
    );

    let server = DocsServer::new(config);
    let service = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("Error serving MCP server: {:?}", e);
    })?;

    service.waiting().await?;

    Ok(())
}
