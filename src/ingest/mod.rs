// src/ingest/mod.rs
pub mod gundem;
pub mod types;

use crate::error::SourceError;
use crate::ingest::types::{Topic, TopicSource};

/// Source that returns the same topics on every poll. Handy for demos and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    topics: Vec<Topic>,
}

impl StaticSource {
    pub fn new(topics: Vec<Topic>) -> Self {
        Self { topics }
    }
}

#[async_trait::async_trait]
impl TopicSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<Topic>, SourceError> {
        Ok(self.topics.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
