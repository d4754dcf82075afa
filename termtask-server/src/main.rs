//! `TermTask` demo API server -- in-memory task collection over HTTP.
//!
//! Serves the JSON contract the `termtask` client speaks. State lives in
//! memory only; restarting the server resets the list.
//!
//! # Usage
//!
//! ```bash
//! # Run on default address 0.0.0.0:8080
//! cargo run --bin termtask-server
//!
//! # Run on custom address with demonstration tasks
//! cargo run --bin termtask-server -- --bind 127.0.0.1:3000 --seed
//!
//! # Or via environment variable
//! TERMTASK_API_ADDR=127.0.0.1:3000 cargo run --bin termtask-server
//! ```

use std::sync::Arc;

use clap::Parser;
use termtask_server::config::{ServerCliArgs, ServerConfig};
use termtask_server::server::{self, ApiState, seed_tasks};
use termtask_server::store::TodoStore;

#[tokio::main]
async fn main() {
    let cli = ServerCliArgs::parse();

    // Load config from CLI args + config file + env vars + defaults.
    let config = match ServerConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    };

    // Initialize tracing with the resolved log level.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(addr = %config.bind_addr, seed = config.seed, "starting termtask api server");

    let store = if config.seed {
        TodoStore::with_tasks(seed_tasks())
    } else {
        TodoStore::new()
    };
    let state = Arc::new(ApiState::with_store(store));

    match server::start_server_with_state(&config.bind_addr, state).await {
        Ok((bound_addr, handle)) => {
            tracing::info!(addr = %bound_addr, "api server listening");
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "api server task failed");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to start api server");
            std::process::exit(1);
        }
    }
}
