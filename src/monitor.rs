//! # Monitor Loop
//! fetch → detect → dedup → sink, then sleep for the poll interval.
//!
//! Nothing inside a cycle can stop the loop: a failed or empty fetch counts as
//! "zero topics", a failed sink write is logged and not retried. The only way
//! out is the shutdown future passed to [`Monitor::run`]. It is polled from the
//! first fetch on; a cycle in flight finishes before the loop exits.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate, Utc};
use metrics::{counter, gauge};
use tracing::{debug, info, warn};

use crate::config::MonitorConfig;
use crate::dedup::DedupStore;
use crate::detector::Detector;
use crate::ingest::types::TopicSource;
use crate::notify::{AlertEvent, EventSink};

/// Running totals for the lifetime of one monitor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonitorStats {
    pub cycles: u64,
    /// Cycles whose fetch returned at least one topic.
    pub successful_cycles: u64,
    pub alerts: u64,
    pub duplicates: u64,
    pub sink_errors: u64,
}

/// Outcome of a single poll.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub topics: usize,
    pub candidates: usize,
    pub alerts: usize,
    pub duplicates: usize,
    pub sink_errors: usize,
    /// Set when the source failed; the cycle then saw zero topics.
    pub source_error: Option<String>,
    pub heartbeat: bool,
}

pub struct Monitor {
    source: Box<dyn TopicSource>,
    sink: Box<dyn EventSink>,
    store: Arc<DedupStore>,
    detector: Detector,
    poll_interval: Duration,
    heartbeat_every: u64,
    stats: MonitorStats,
}

impl Monitor {
    pub fn new(
        source: impl TopicSource + 'static,
        sink: impl EventSink + 'static,
        store: Arc<DedupStore>,
    ) -> Self {
        let defaults = MonitorConfig::default();
        Self {
            source: Box::new(source),
            sink: Box::new(sink),
            store,
            detector: Detector::new(defaults.tolerance_days),
            poll_interval: Duration::from_secs(defaults.poll_interval_secs),
            heartbeat_every: defaults.heartbeat_every,
            stats: MonitorStats::default(),
        }
    }

    pub fn from_config(
        cfg: &MonitorConfig,
        source: impl TopicSource + 'static,
        sink: impl EventSink + 'static,
        store: Arc<DedupStore>,
    ) -> Self {
        Self::new(source, sink, store)
            .with_detector(Detector::new(cfg.tolerance_days))
            .with_poll_interval(Duration::from_secs(cfg.poll_interval_secs))
            .with_heartbeat_every(cfg.heartbeat_every)
    }

    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detector = detector;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// `0` is treated as `1` (heartbeat every successful poll).
    pub fn with_heartbeat_every(mut self, n: u64) -> Self {
        self.heartbeat_every = n.max(1);
        self
    }

    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    pub fn store(&self) -> &Arc<DedupStore> {
        &self.store
    }

    /// One cycle against today's local date.
    pub async fn poll_once(&mut self) -> CycleReport {
        let today = Local::now().date_naive();
        self.poll_once_at(today).await
    }

    /// One cycle with an explicit "today" for the date window.
    pub async fn poll_once_at(&mut self, today: NaiveDate) -> CycleReport {
        self.stats.cycles += 1;
        counter!("quake_poll_cycles_total").increment(1);
        gauge!("quake_last_poll_ts").set(Utc::now().timestamp() as f64);

        let mut report = CycleReport::default();

        let topics = match self.source.fetch().await {
            Ok(topics) => topics,
            Err(e) => {
                warn!(target: "monitor", source = self.source.name(), kind = e.kind(), error = %e, "fetch failed, skipping cycle");
                counter!("quake_source_errors_total").increment(1);
                report.source_error = Some(e.to_string());
                return report;
            }
        };

        if topics.is_empty() {
            warn!(target: "monitor", source = self.source.name(), "no topics returned");
            return report;
        }

        report.topics = topics.len();
        self.stats.successful_cycles += 1;

        if self.stats.successful_cycles % self.heartbeat_every == 0 {
            report.heartbeat = true;
            info!(
                target: "monitor",
                "System healthy: {} checks completed, monitoring continues...",
                self.stats.cycles
            );
        }

        for topic in &topics {
            let Some(candidate) = self.detector.detect(&topic.title, today) else {
                continue;
            };
            report.candidates += 1;
            counter!("quake_candidates_total").increment(1);

            let id = candidate.identity();
            if !self.store.insert_if_new(id.clone()) {
                debug!(target: "monitor", event = %id, "already alerted");
                report.duplicates += 1;
                counter!("quake_duplicates_suppressed_total").increment(1);
                continue;
            }

            let ev = AlertEvent::new(topic, &candidate);
            report.alerts += 1;
            counter!("quake_alerts_total").increment(1);
            if let Err(e) = self.sink.record(&ev).await {
                warn!(target: "monitor", event = %id, error = %format!("{e:#}"), "recording alert failed");
                report.sink_errors += 1;
                counter!("quake_sink_errors_total").increment(1);
            }
        }

        self.stats.alerts += report.alerts as u64;
        self.stats.duplicates += report.duplicates as u64;
        self.stats.sink_errors += report.sink_errors as u64;
        report
    }

    /// Poll until `shutdown` resolves, then log the summary.
    ///
    /// `shutdown` is polled alongside every cycle, from the very first fetch on,
    /// but a cycle in flight always runs to completion; the loop then exits
    /// instead of sleeping. Otherwise the request is observed while sleeping,
    /// so the loop exits within one poll interval.
    pub async fn run<F>(mut self, shutdown: F) -> MonitorStats
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!(
            target: "monitor",
            source = self.source.name(),
            interval_secs = self.poll_interval.as_secs(),
            heartbeat_every = self.heartbeat_every,
            "monitor started"
        );

        loop {
            let (report, stop_requested) = {
                let cycle = self.poll_once();
                tokio::pin!(cycle);
                let finished = tokio::select! {
                    biased;
                    report = &mut cycle => Some(report),
                    _ = &mut shutdown => None,
                };
                match finished {
                    Some(report) => (report, false),
                    None => (cycle.await, true),
                }
            };
            debug!(target: "monitor", ?report, "cycle done");
            if stop_requested {
                break;
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }

        info!(
            target: "monitor",
            alerts = self.stats.alerts,
            "Monitoring stopped (completed {} checks)",
            self.stats.cycles
        );
        self.stats
    }
}
