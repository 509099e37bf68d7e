//! Body Intelligence Engine
//!
//! An MCP server for calorie, weight and body-composition analysis.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use bodyintel::config::AnalysisConfig;
use bodyintel::mcp::BodyIntelligenceService;
use bodyintel::tools::status::print_startup_banner;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bodyintel=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let config = AnalysisConfig::from_env()?;

    // Print startup banner to stderr
    print_startup_banner(&config);
    eprintln!("Starting MCP server on stdio...");

    let service = BodyIntelligenceService::new(config);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
