use crate::application::ml::PriceForecaster;
use crate::application::scheduler::WorkUnit;
use crate::domain::ports::{MarketSnapshotSource, NotificationSink};
use crate::domain::signal::{DecisionThresholds, Signal};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Work unit of the trading loop: snapshot -> predict -> decide -> notify.
///
/// A failed prediction makes the whole iteration a transient failure: no
/// signal is emitted and the loop resumes on its normal schedule. A failed
/// notification send is logged but does not fail the iteration.
pub struct TradingLoop {
    source: Arc<dyn MarketSnapshotSource>,
    forecaster: Arc<dyn PriceForecaster>,
    thresholds: DecisionThresholds,
    sink: Arc<dyn NotificationSink>,
}

impl TradingLoop {
    pub fn new(
        source: Arc<dyn MarketSnapshotSource>,
        forecaster: Arc<dyn PriceForecaster>,
        thresholds: DecisionThresholds,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            source,
            forecaster,
            thresholds,
            sink,
        }
    }
}

#[async_trait]
impl WorkUnit for TradingLoop {
    async fn run_once(&mut self) -> Result<()> {
        let features = self.source.next().await.context("market snapshot failed")?;

        // Model inference is synchronous and potentially slow; run it off
        // the scheduling threads so siblings are never starved.
        let forecaster = self.forecaster.clone();
        let prediction = tokio::task::spawn_blocking(move || forecaster.predict(&features))
            .await
            .context("inference worker panicked")?
            .context("prediction failed")?;

        let signal = Signal::from_prediction(prediction, &self.thresholds);
        debug!(
            "Trading: prediction {:.4} -> {}",
            prediction, signal.action
        );

        if let Err(e) = self.sink.send(&signal.render()).await {
            warn!("Trading: notification send failed: {:#}", e);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::PredictionError;
    use crate::domain::features::FeatureVector;
    use std::sync::Mutex;

    struct FixedSource;

    #[async_trait]
    impl MarketSnapshotSource for FixedSource {
        async fn next(&self) -> Result<FeatureVector> {
            Ok(FeatureVector::new(vec![0.5, 2.0, 1.10]))
        }
    }

    struct FixedForecaster {
        value: f64,
    }

    impl PriceForecaster for FixedForecaster {
        fn predict(&self, _features: &FeatureVector) -> Result<f64, PredictionError> {
            Ok(self.value)
        }
        fn arity(&self) -> usize {
            3
        }
        fn name(&self) -> &str {
            "fixed"
        }
    }

    struct FailingForecaster;

    impl PriceForecaster for FailingForecaster {
        fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
            Err(PredictionError::FeatureShape {
                expected: 99,
                actual: features.arity(),
            })
        }
        fn arity(&self) -> usize {
            99
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Default)]
    struct CollectorSink {
        messages: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl NotificationSink for CollectorSink {
        async fn send(&self, text: &str) -> Result<()> {
            self.messages.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_high_prediction_emits_sell() {
        let sink = Arc::new(CollectorSink::default());
        let mut unit = TradingLoop::new(
            Arc::new(FixedSource),
            Arc::new(FixedForecaster { value: 1.10 }),
            DecisionThresholds::default(),
            sink.clone(),
        );

        unit.run_once().await.unwrap();

        let messages = sink.messages.lock().unwrap();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("SELL"));
    }

    #[tokio::test]
    async fn test_failed_prediction_emits_nothing() {
        let sink = Arc::new(CollectorSink::default());
        let mut unit = TradingLoop::new(
            Arc::new(FixedSource),
            Arc::new(FailingForecaster),
            DecisionThresholds::default(),
            sink.clone(),
        );

        assert!(unit.run_once().await.is_err());
        assert!(sink.messages.lock().unwrap().is_empty());
    }
}
