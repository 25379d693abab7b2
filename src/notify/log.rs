use anyhow::Result;

use super::{AlertEvent, EventSink};

/// Writes the alert block through `tracing` (console and log file).
pub struct LogSink {
    link_base: String,
}

impl LogSink {
    /// `link_base` is prefixed to the topic's relative URL, e.g. `https://eksisozluk.com`.
    pub fn new(link_base: impl Into<String>) -> Self {
        Self {
            link_base: link_base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn absolute_url(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}{}", self.link_base, url)
        }
    }
}

#[async_trait::async_trait]
impl EventSink for LogSink {
    async fn record(&self, ev: &AlertEvent) -> Result<()> {
        tracing::warn!(target: "alert", "EARTHQUAKE DETECTED: {}", ev.headline());
        tracing::warn!(target: "alert", "   Title: {}", ev.topic.title);
        tracing::warn!(target: "alert", "   URL: {}", self.absolute_url(&ev.topic.url));
        tracing::warn!(target: "alert", "   Entry count: {}", ev.topic.entry_count);
        tracing::warn!(target: "alert", "   Confidence: {}", ev.earthquake.confidence);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
