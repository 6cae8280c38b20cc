use crate::domain::errors::PredictionError;
use crate::domain::features::FeatureVector;

/// Interface for trained regression models.
pub trait PriceForecaster: Send + Sync {
    /// Forecast the next-period price ratio for one feature vector.
    /// Safe to call repeatedly and concurrently; the model is immutable
    /// after load.
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError>;

    /// Arity the model expects. Vectors of any other arity are rejected.
    fn arity(&self) -> usize;

    /// Get model name/type
    fn name(&self) -> &str;
}
