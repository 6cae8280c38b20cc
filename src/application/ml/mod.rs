mod forecaster;
mod smartcore_forecaster;

pub use forecaster::PriceForecaster;
pub use smartcore_forecaster::{ModelArtifact, SmartcoreForecaster};
