//! HAYQ Bot - headless predictive signal assistant
//!
//! Runs the trading, news, alert-signal and chat tasks under one
//! supervisor until the process receives Ctrl+C.
//!
//! # Environment Variables
//! - `MODEL_PATH` - trained model artifact (default: saved_model/hayq_model.json)
//! - `TRADING_INTERVAL` / `NEWS_INTERVAL` / `SIGNALS_INTERVAL` - cadences in seconds
//! - `SELL_THRESHOLD` / `BUY_THRESHOLD` - decision boundaries
//! - `RPC_URL` / `CONTRACT_ADDRESS` - read-only chain queries
//! - `CHAT_BOT_TOKEN` / `DEFAULT_LANG` - chat interface

use anyhow::Result;
use hayqbot::application::system::{Application, SystemHandle};
use hayqbot::config::Config;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    info!("HAYQ Bot {} starting...", env!("CARGO_PKG_VERSION"));

    // Fatal on any config or construction error: non-zero exit before any
    // periodic task runs.
    let config = Config::from_env()?;
    info!(
        "Configuration loaded: trading every {:?}, news every {:?}, signals every {:?}",
        config.trading_interval, config.news_interval, config.signals_interval
    );

    let app = Application::build(config)?;

    // chat_tx is the integration point for a chat frontend; the headless
    // binary keeps it alive so sessions can be attached at runtime.
    let SystemHandle {
        supervisor,
        chat_tx: _chat_tx,
    } = app.start();
    let shutdown = supervisor.shutdown_handle();

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Received Ctrl+C signal. Cancelling periodic tasks...");
                shutdown.cancel_all();
            }
            Err(err) => {
                tracing::error!("Unable to listen for shutdown signal: {}", err);
            }
        }
    });

    info!("Bot running. Press Ctrl+C to shutdown.");

    // Blocks for the process lifetime; returns only after every task has
    // observed cancellation and stopped.
    supervisor.wait().await;

    info!("All tasks stopped. Goodbye!");
    Ok(())
}
