//! Configuration for the bot process.
//!
//! Everything is supplied through environment variables at startup (with a
//! `.env` preload in main). Invalid values are fatal: the process reports
//! the problem and exits before any periodic task runs.

use crate::domain::signal::DecisionThresholds;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

const DEFAULT_MODEL_PATH: &str = "saved_model/hayq_model.json";
const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

#[derive(Debug, Clone)]
pub struct Config {
    // Loop cadences
    pub trading_interval: Duration,
    pub news_interval: Duration,
    pub signals_interval: Duration,
    pub chat_poll_interval: Duration,

    // Prediction
    pub model_path: PathBuf,
    pub thresholds: DecisionThresholds,

    // Blockchain (read-only)
    pub rpc_url: Url,
    pub contract_address: String,

    // Chat
    pub chat_token: String,
    pub default_lang: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let trading_interval = interval_from_env("TRADING_INTERVAL", 10)?;
        let news_interval = interval_from_env("NEWS_INTERVAL", 30)?;
        let signals_interval = interval_from_env("SIGNALS_INTERVAL", 20)?;
        let chat_poll_interval = interval_from_env("CHAT_POLL_INTERVAL", 1)?;

        let model_path = PathBuf::from(
            env::var("MODEL_PATH").unwrap_or_else(|_| DEFAULT_MODEL_PATH.to_string()),
        );

        let sell = float_from_env("SELL_THRESHOLD", 1.05)?;
        let buy = float_from_env("BUY_THRESHOLD", 0.95)?;
        let thresholds = DecisionThresholds::new(sell, buy)
            .map_err(|e| anyhow::anyhow!("Invalid decision thresholds: {}", e))?;

        let rpc_url_raw = env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string());
        let rpc_url = Url::parse(&rpc_url_raw)
            .with_context(|| format!("Invalid RPC_URL: {}", rpc_url_raw))?;

        let contract_address = env::var("CONTRACT_ADDRESS").unwrap_or_default();

        // A deployment overrides this; the default keeps dev setups alive.
        let chat_token =
            env::var("CHAT_BOT_TOKEN").unwrap_or_else(|_| "dev-local-token".to_string());

        let default_lang = env::var("DEFAULT_LANG").unwrap_or_else(|_| "en".to_string());

        Ok(Self {
            trading_interval,
            news_interval,
            signals_interval,
            chat_poll_interval,
            model_path,
            thresholds,
            rpc_url,
            contract_address,
            chat_token,
            default_lang,
        })
    }
}

fn interval_from_env(key: &str, default_secs: u64) -> Result<Duration> {
    let secs = match env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("Invalid {}: {:?}", key, raw))?,
        Err(_) => default_secs,
    };
    if secs == 0 {
        anyhow::bail!("Invalid {}: interval must be at least 1 second", key);
    }
    Ok(Duration::from_secs(secs))
}

fn float_from_env(key: &str, default: f64) -> Result<f64> {
    match env::var(key) {
        Ok(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Invalid {}: {:?}", key, raw)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::signal::TradeAction;

    #[test]
    fn test_config_from_env_defaults() {
        let config = Config::from_env().expect("Should parse with defaults");
        assert_eq!(config.trading_interval, Duration::from_secs(10));
        assert_eq!(config.news_interval, Duration::from_secs(30));
        assert_eq!(config.signals_interval, Duration::from_secs(20));
        assert_eq!(config.thresholds.decide(1.0), TradeAction::Hold);
        assert_eq!(config.default_lang, "en");
    }

    #[test]
    fn test_zero_interval_rejected() {
        // Exercised through the helper to avoid mutating process env in tests.
        unsafe { env::set_var("TEST_ZERO_INTERVAL", "0") };
        assert!(interval_from_env("TEST_ZERO_INTERVAL", 10).is_err());
        unsafe { env::remove_var("TEST_ZERO_INTERVAL") };
    }

    #[test]
    fn test_garbage_interval_rejected() {
        unsafe { env::set_var("TEST_BAD_INTERVAL", "soon") };
        assert!(interval_from_env("TEST_BAD_INTERVAL", 10).is_err());
        unsafe { env::remove_var("TEST_BAD_INTERVAL") };
    }
}
