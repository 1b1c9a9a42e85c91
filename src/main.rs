//! Shipxy MCP server over stdio

use shipxy_mcp::config::AppConfig;
use shipxy_mcp::errors::ShipxyError;
use shipxy_mcp::server::Server;
use shipxy_mcp::ShipxyClient;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), ShipxyError> {
    dotenvy::dotenv().ok();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::load()?;
    let client = ShipxyClient::from_config(&config)?;
    info!("Serving Shipxy tools against {}", client.base_url());

    let server = Server::new(client);
    let shutdown_signal = signal::ctrl_c();

    tokio::select! {
        result = server.run_stdio() => {
            if let Err(e) = &result {
                error!("Server stopped: {}", e);
            }
            result?;
        }
        _ = shutdown_signal => {
            info!("Received shutdown signal");
        }
    }

    Ok(())
}
