use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::application::loops::{AlertLoop, ChatCommand, ChatLoop, NewsLoop, TradingLoop};
use crate::application::ml::{PriceForecaster, SmartcoreForecaster};
use crate::application::scheduler::{PeriodicTask, TaskSupervisor};
use crate::config::Config;
use crate::domain::ports::{ChainReader, MarketSnapshotSource, NewsFeed, NotificationSink};
use crate::infrastructure::chain::JsonRpcChainReader;
use crate::infrastructure::chat::ChatInterface;
use crate::infrastructure::market::SyntheticMarketSource;
use crate::infrastructure::news::RotatingNewsFeed;
use crate::infrastructure::notify::LogNotificationSink;

pub const TRADING_TASK: &str = "trading";
pub const NEWS_TASK: &str = "news";
pub const SIGNALS_TASK: &str = "signals";
pub const CHAT_TASK: &str = "chat";

/// Control surface returned by [`Application::start`].
pub struct SystemHandle {
    pub supervisor: TaskSupervisor,
    pub chat_tx: mpsc::Sender<ChatCommand>,
}

/// Owns every collaborator and wires the periodic tasks together.
///
/// All construction happens in `build`; any failure there aborts startup
/// before a single task runs. No component is reachable through globals,
/// everything is passed into its loop explicitly.
pub struct Application {
    config: Config,
    forecaster: Arc<dyn PriceForecaster>,
    source: Arc<dyn MarketSnapshotSource>,
    chain: Arc<dyn ChainReader>,
    feed: Arc<dyn NewsFeed>,
    sink: Arc<dyn NotificationSink>,
    chat: ChatInterface,
}

impl std::fmt::Debug for Application {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Application").finish_non_exhaustive()
    }
}

impl Application {
    /// Fail-fast construction: a missing or corrupt model artifact, an
    /// unauthenticated chat interface or invalid config aborts the whole
    /// startup rather than running a degraded subset of tasks.
    pub fn build(config: Config) -> Result<Self> {
        info!("Building HAYQ bot (model: {:?})", config.model_path);

        let forecaster = SmartcoreForecaster::load(&config.model_path)
            .context("failed to load prediction model")?;

        // The synthetic source mirrors the model's arity exactly.
        let source = SyntheticMarketSource::new(forecaster.arity());

        let chat = ChatInterface::new(&config.chat_token, &config.default_lang)
            .map_err(|e| anyhow::anyhow!("failed to initialize chat interface: {}", e))?;

        let chain = JsonRpcChainReader::new(config.rpc_url.clone(), config.contract_address.clone());

        Ok(Self {
            config,
            forecaster: Arc::new(forecaster),
            source: Arc::new(source),
            chain: Arc::new(chain),
            feed: Arc::new(RotatingNewsFeed::new()),
            sink: Arc::new(LogNotificationSink::new()),
            chat,
        })
    }

    /// Replace the default outbound channel (tests, alternative frontends).
    pub fn with_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Spawn the four periodic tasks under the supervisor.
    pub fn start(self) -> SystemHandle {
        let (chat_tx, chat_rx) = mpsc::channel(64);

        let tasks = vec![
            PeriodicTask::new(
                TRADING_TASK,
                self.config.trading_interval,
                Box::new(TradingLoop::new(
                    self.source.clone(),
                    self.forecaster.clone(),
                    self.config.thresholds,
                    self.sink.clone(),
                )),
            ),
            PeriodicTask::new(
                NEWS_TASK,
                self.config.news_interval,
                Box::new(NewsLoop::new(self.feed.clone(), self.sink.clone())),
            ),
            PeriodicTask::new(
                SIGNALS_TASK,
                self.config.signals_interval,
                Box::new(AlertLoop::new(self.chain.clone(), self.sink.clone())),
            ),
            PeriodicTask::new(
                CHAT_TASK,
                self.config.chat_poll_interval,
                Box::new(ChatLoop::new(self.chat, chat_rx, self.sink.clone())),
            ),
        ];

        let supervisor = TaskSupervisor::start(tasks);
        info!("All periodic tasks running: {:?}", supervisor.task_names());

        SystemHandle {
            supervisor,
            chat_tx,
        }
    }
}
