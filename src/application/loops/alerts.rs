use crate::application::scheduler::WorkUnit;
use crate::domain::ports::{ChainReader, NotificationSink};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Work unit of the alert-signal loop: snapshot on-chain supply and emit
/// an alert line. A chain query failure is a transient iteration failure.
pub struct AlertLoop {
    chain: Arc<dyn ChainReader>,
    sink: Arc<dyn NotificationSink>,
}

impl AlertLoop {
    pub fn new(chain: Arc<dyn ChainReader>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { chain, sink }
    }
}

#[async_trait]
impl WorkUnit for AlertLoop {
    async fn run_once(&mut self) -> Result<()> {
        let supply = self
            .chain
            .total_supply()
            .await
            .context("total supply query failed")?;

        let text = format!(
            "[{}] Alert: HAYQ total supply {} tokens",
            Utc::now().format("%H:%M:%S"),
            supply.normalize()
        );

        if let Err(e) = self.sink.send(&text).await {
            warn!("Alerts: notification send failed: {:#}", e);
        }
        Ok(())
    }
}
