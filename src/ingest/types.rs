// src/ingest/types.rs
use chrono::{DateTime, Utc};

use crate::error::SourceError;

/// One trending entry as scraped in a single poll.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct Topic {
    pub title: String,
    pub url: String,         // site-relative href, e.g. "/istanbul-depremi--123?a=popular"
    pub entry_count: String, // as displayed, "0" when absent
    pub observed_at: DateTime<Utc>,
}

impl Topic {
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            entry_count: "0".to_string(),
            observed_at: Utc::now(),
        }
    }

    pub fn with_entry_count(mut self, count: impl Into<String>) -> Self {
        self.entry_count = count.into();
        self
    }
}

#[async_trait::async_trait]
pub trait TopicSource: Send + Sync {
    /// Ordered topics currently on the page.
    async fn fetch(&self) -> Result<Vec<Topic>, SourceError>;
    fn name(&self) -> &'static str;
}
