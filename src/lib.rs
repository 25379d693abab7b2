// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod config;
pub mod dedup;
pub mod detector;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod monitor;
pub mod normalize;

// Topic Source (trending page) and Event Sinks
pub mod ingest;
pub mod notify;

// ---- Re-exports for stable public API ----
pub use crate::dedup::{DedupStore, EventIdentity};
pub use crate::detector::{detect, Confidence, Detector, EarthquakeCandidate};
pub use crate::ingest::types::{Topic, TopicSource};
pub use crate::monitor::{CycleReport, Monitor, MonitorStats};
pub use crate::normalize::normalize;
pub use crate::notify::{AlertEvent, EventSink, SinkMux};
