use crate::domain::ports::NotificationSink;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Mutex;
use tracing::info;

/// Default outbound channel: writes every message to the log stream.
///
/// Concurrent sends from multiple tasks interleave line-by-line; the
/// tracing backend owns the no-corruption guarantee.
pub struct LogNotificationSink;

impl LogNotificationSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for LogNotificationSink {
    async fn send(&self, text: &str) -> Result<()> {
        info!(target: "broadcast", "{}", text);
        Ok(())
    }
}

/// In-memory sink for tests and dry runs.
#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().expect("sink poisoned").clone()
    }
}

#[async_trait]
impl NotificationSink for MemorySink {
    async fn send(&self, text: &str) -> Result<()> {
        self.messages
            .lock()
            .expect("sink poisoned")
            .push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_preserves_order() {
        tokio_test::block_on(async {
            let sink = MemorySink::new();
            sink.send("one").await.unwrap();
            sink.send("two").await.unwrap();
            assert_eq!(sink.messages(), vec!["one", "two"]);
        });
    }
}
