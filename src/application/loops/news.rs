use crate::application::scheduler::WorkUnit;
use crate::domain::ports::{NewsFeed, NotificationSink};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::warn;

/// Work unit of the news loop: broadcast the next headline each tick.
pub struct NewsLoop {
    feed: Arc<dyn NewsFeed>,
    sink: Arc<dyn NotificationSink>,
}

impl NewsLoop {
    pub fn new(feed: Arc<dyn NewsFeed>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { feed, sink }
    }
}

#[async_trait]
impl WorkUnit for NewsLoop {
    async fn run_once(&mut self) -> Result<()> {
        let headline = self.feed.next_headline();
        let text = format!("[{}] News: {}", Utc::now().format("%H:%M:%S"), headline);

        if let Err(e) = self.sink.send(&text).await {
            warn!("News: broadcast send failed: {:#}", e);
        }
        Ok(())
    }
}
