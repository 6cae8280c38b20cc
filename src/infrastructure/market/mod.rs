use crate::domain::features::FeatureVector;
use crate::domain::ports::MarketSnapshotSource;
use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;

pub const DEFAULT_RANGE_LOW: f64 = 0.9;
pub const DEFAULT_RANGE_HIGH: f64 = 1.1;

/// Placeholder market feed: each field is an independent uniform draw.
///
/// Stands in for a live feed behind the same contract; swapping it out
/// must not touch the trading loop.
pub struct SyntheticMarketSource {
    arity: usize,
    low: f64,
    high: f64,
}

impl SyntheticMarketSource {
    /// Arity follows the loaded model, so the shape contract holds by
    /// construction in the default wiring.
    pub fn new(arity: usize) -> Self {
        Self::with_range(arity, DEFAULT_RANGE_LOW, DEFAULT_RANGE_HIGH)
    }

    pub fn with_range(arity: usize, low: f64, high: f64) -> Self {
        Self { arity, low, high }
    }
}

#[async_trait]
impl MarketSnapshotSource for SyntheticMarketSource {
    async fn next(&self) -> Result<FeatureVector> {
        let mut rng = rand::rng();
        let values = (0..self.arity)
            .map(|_| rng.random_range(self.low..self.high))
            .collect();
        Ok(FeatureVector::new(values))
    }
}
