use crate::application::scheduler::WorkUnit;
use crate::domain::ports::NotificationSink;
use crate::infrastructure::chat::ChatInterface;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::warn;

pub use crate::infrastructure::chat::ChatCommand;

/// Work unit of the chat task: drain the command inbox each tick and
/// reply through the sink.
///
/// Polling keeps the chat interface under the same supervision contract
/// as the other loops; a short interval makes it feel interactive.
pub struct ChatLoop {
    interface: ChatInterface,
    inbox: mpsc::Receiver<ChatCommand>,
    sink: Arc<dyn NotificationSink>,
}

impl ChatLoop {
    pub fn new(
        interface: ChatInterface,
        inbox: mpsc::Receiver<ChatCommand>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            interface,
            inbox,
            sink,
        }
    }
}

#[async_trait]
impl WorkUnit for ChatLoop {
    async fn run_once(&mut self) -> Result<()> {
        while let Ok(command) = self.inbox.try_recv() {
            let reply = self.interface.handle(&command);
            if let Err(e) = self.sink.send(&reply).await {
                warn!(
                    "Chat: reply to session {} failed: {:#}",
                    command.session_id, e
                );
            }
        }
        Ok(())
    }
}
