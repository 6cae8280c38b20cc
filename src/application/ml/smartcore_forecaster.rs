use super::forecaster::PriceForecaster;
use crate::domain::errors::{ModelError, PredictionError};
use crate::domain::features::FeatureVector;
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::RandomForestRegressor;
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;

/// On-disk model envelope produced by the offline training pipeline.
///
/// The feature name list fixes the arity and field order the model was
/// trained with; prediction rejects vectors that do not match it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub feature_names: Vec<String>,
    pub model: RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>,
}

pub struct SmartcoreForecaster {
    artifact: ModelArtifact,
    path: PathBuf,
}

impl SmartcoreForecaster {
    /// Load the trained artifact. Happens exactly once at process start;
    /// any failure here is fatal for the whole startup.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let file = File::open(path).map_err(|e| ModelError::Corrupt {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let artifact: ModelArtifact =
            serde_json::from_reader(BufReader::new(file)).map_err(|e| ModelError::Corrupt {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        if artifact.feature_names.is_empty() {
            return Err(ModelError::Corrupt {
                path: path.to_path_buf(),
                reason: "artifact declares no features".to_string(),
            });
        }

        info!(
            "Loaded prediction model from {:?} ({} features: {:?})",
            path,
            artifact.feature_names.len(),
            artifact.feature_names
        );

        Ok(Self {
            artifact,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn feature_names(&self) -> &[String] {
        &self.artifact.feature_names
    }
}

impl PriceForecaster for SmartcoreForecaster {
    fn predict(&self, features: &FeatureVector) -> Result<f64, PredictionError> {
        let expected = self.artifact.feature_names.len();
        if features.arity() != expected {
            return Err(PredictionError::FeatureShape {
                expected,
                actual: features.arity(),
            });
        }

        let input = match DenseMatrix::from_2d_vec(&vec![features.values().to_vec()]) {
            Ok(m) => m,
            Err(e) => {
                return Err(PredictionError::Inference {
                    reason: format!("matrix creation failed: {}", e),
                });
            }
        };

        let predictions =
            self.artifact
                .model
                .predict(&input)
                .map_err(|e| PredictionError::Inference {
                    reason: format!("prediction failed: {}", e),
                })?;

        let prediction = predictions
            .first()
            .copied()
            .ok_or_else(|| PredictionError::Inference {
                reason: "no prediction returned".to_string(),
            })?;

        if !prediction.is_finite() {
            return Err(PredictionError::Inference {
                reason: format!("non-finite prediction: {}", prediction),
            });
        }

        Ok(prediction)
    }

    fn arity(&self) -> usize {
        self.artifact.feature_names.len()
    }

    fn name(&self) -> &str {
        "SmartCore Random Forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_artifact_is_not_found() {
        let path = std::env::temp_dir().join("hayqbot-no-such-model.json");
        match SmartcoreForecaster::load(&path) {
            Err(ModelError::NotFound { path: p }) => assert_eq!(p, path),
            other => panic!("Expected NotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_load_garbage_artifact_is_corrupt() {
        let path = std::env::temp_dir().join("hayqbot-corrupt-model.json");
        std::fs::write(&path, b"definitely not a model").unwrap();
        match SmartcoreForecaster::load(&path) {
            Err(ModelError::Corrupt { .. }) => {}
            other => panic!("Expected Corrupt, got {:?}", other.err()),
        }
        let _ = std::fs::remove_file(&path);
    }
}
