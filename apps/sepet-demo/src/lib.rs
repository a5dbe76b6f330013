//! # Sepet Demo Library
//!
//! Wires the cart store to a line-oriented JSON interface.
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (optional path from the first CLI argument)
//! 3. Create the store over the demo catalog
//! 4. Read intents from stdin, one JSON object per line
//! 5. Write one JSON response per line to stdout
//!
//! ```text
//! stdin ──► handle_line() ──► CartStore ──► CommandResponse ──► stdout
//!                                 │
//!                                 └──► tracing ──► stderr
//! ```

pub mod commands;
pub mod error;

use std::path::PathBuf;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use sepet_core::Catalog;
use sepet_store::{CartStore, StoreConfig};

use crate::commands::handle_line;

/// Runs the demo until stdin closes.
pub async fn run(config_path: Option<PathBuf>) -> std::io::Result<()> {
    init_tracing();

    let config = StoreConfig::load_or_default(config_path);
    info!(
        latency_ms = config.order.latency_ms,
        shipping = ?config.shipping.options,
        "Starting Sepet demo"
    );

    let mut store = CartStore::new(Catalog::demo(), config);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(&mut store, line).await;
        let json = match serde_json::to_string(&response) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize response: {}", e);
                continue;
            }
        };

        stdout.write_all(json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("Input closed, shutting down");
    Ok(())
}

/// Logs go to stderr so stdout stays pure JSON.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sepet=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
