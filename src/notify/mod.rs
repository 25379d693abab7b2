//! Event sinks: where detected earthquakes go.
//!
//! Sinks are append-only. A failing sink is logged by the caller and never
//! retried, so one alert is sent at most once per sink.

pub mod discord;
pub mod jsonl;
pub mod log;

use std::sync::Mutex;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::detector::EarthquakeCandidate;
use crate::ingest::types::Topic;

/// What gets persisted/announced for one detection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AlertEvent {
    pub detected_at: DateTime<Utc>,
    pub topic: Topic,
    pub earthquake: EarthquakeCandidate,
}

impl AlertEvent {
    pub fn new(topic: &Topic, candidate: &EarthquakeCandidate) -> Self {
        Self {
            detected_at: Utc::now(),
            topic: topic.clone(),
            earthquake: candidate.clone(),
        }
    }

    /// One-line headline, e.g. `22 ekim 2025 - ISTANBUL`.
    pub fn headline(&self) -> String {
        let eq = &self.earthquake;
        format!(
            "{} {} {} - {}",
            eq.day,
            eq.month_name,
            eq.year,
            eq.province.to_uppercase()
        )
    }
}

#[async_trait::async_trait]
pub trait EventSink: Send + Sync {
    async fn record(&self, ev: &AlertEvent) -> Result<()>;
    fn name(&self) -> &'static str;
}

/// Fan-out to every configured sink. Each sink failure is logged on its own;
/// the mux reports an error if any sink failed.
#[derive(Default)]
pub struct SinkMux {
    sinks: Vec<Box<dyn EventSink>>,
}

impl SinkMux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn push(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait::async_trait]
impl EventSink for SinkMux {
    async fn record(&self, ev: &AlertEvent) -> Result<()> {
        let mut failed = Vec::new();
        for sink in &self.sinks {
            if let Err(e) = sink.record(ev).await {
                tracing::warn!(target: "notify", sink = sink.name(), error = %format!("{e:#}"), "sink failed");
                failed.push(sink.name());
            }
        }
        if failed.is_empty() {
            Ok(())
        } else {
            Err(anyhow::anyhow!("sinks failed: {}", failed.join(", ")))
        }
    }

    fn name(&self) -> &'static str {
        "mux"
    }
}

// --- Test helper ---
/// Keeps every recorded event in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Mutex<Vec<AlertEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<AlertEvent> {
        self.events.lock().expect("memory sink poisoned").clone()
    }
}

#[async_trait::async_trait]
impl EventSink for MemorySink {
    async fn record(&self, ev: &AlertEvent) -> Result<()> {
        self.events
            .lock()
            .expect("memory sink poisoned")
            .push(ev.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[async_trait::async_trait]
impl<T: EventSink + ?Sized> EventSink for std::sync::Arc<T> {
    async fn record(&self, ev: &AlertEvent) -> Result<()> {
        (**self).record(ev).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
