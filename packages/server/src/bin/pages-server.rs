//! Pagecraft HTTP Server Binary
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin pages-server
//! RUST_LOG=debug PORT=3002 cargo run --bin pages-server
//! ```
//!
//! # Environment Variables
//!
//! - `PORT`, `HOST`: listen address (default 127.0.0.1:3001)
//! - `DATABASE_PATH`: libsql database file
//! - `CORS_ORIGIN`: allowed browser origin (default http://localhost:3000)
//! - `PAGECRAFT_ENV`: `development` or `production` (default log filter)
//! - `RUST_LOG`: logging level (e.g., "info", "debug", "trace")

use anyhow::Context;
use pagecraft_server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(config.environment.default_log_filter())
            }),
        )
        .init();

    pagecraft_server::start_server(config).await
}
