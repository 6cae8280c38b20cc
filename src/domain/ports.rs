use crate::domain::errors::ChainError;
use crate::domain::features::FeatureVector;
use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

// Need async_trait for async functions in traits
#[async_trait]
pub trait MarketSnapshotSource: Send + Sync {
    /// Produce a fresh feature vector for the current market conditions.
    /// Called once per trading-loop iteration.
    async fn next(&self) -> Result<FeatureVector>;
}

#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Emit one human-readable message. Failures are logged by callers and
    /// never terminate the calling task.
    async fn send(&self, text: &str) -> Result<()>;
}

/// Read-only view of the token contract. No signing, no custody.
#[async_trait]
pub trait ChainReader: Send + Sync {
    async fn total_supply(&self) -> Result<Decimal, ChainError>;
    async fn balance_of(&self, address: &str) -> Result<Decimal, ChainError>;
}

/// Source of broadcastable headlines for the news loop.
pub trait NewsFeed: Send + Sync {
    fn next_headline(&self) -> String;
}
