use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the trained model artifact at startup.
///
/// These are fatal: the process must not start any periodic task without
/// a usable model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model artifact not found at {path}")]
    NotFound { path: PathBuf },

    #[error("Model artifact at {path} could not be deserialized: {reason}")]
    Corrupt { path: PathBuf, reason: String },
}

/// Errors raised by a single prediction call.
///
/// These are transient from the caller's point of view: the trading loop
/// skips the iteration and resumes on schedule.
#[derive(Debug, Error)]
pub enum PredictionError {
    #[error("Feature vector arity mismatch: model expects {expected}, got {actual}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("Inference failed: {reason}")]
    Inference { reason: String },
}

/// Errors raised by read-only blockchain queries.
#[derive(Debug, Error)]
pub enum ChainError {
    #[error("RPC transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed RPC response: {reason}")]
    MalformedResponse { reason: String },

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_error_formatting() {
        let err = ModelError::NotFound {
            path: PathBuf::from("/models/hayq.json"),
        };
        assert!(err.to_string().contains("/models/hayq.json"));
    }

    #[test]
    fn test_feature_shape_error_formatting() {
        let err = PredictionError::FeatureShape {
            expected: 3,
            actual: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains('3'));
        assert!(msg.contains("10"));
    }
}
