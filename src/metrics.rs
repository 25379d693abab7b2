use std::net::SocketAddr;

use anyhow::{Context, Result};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("quake_poll_cycles_total", "Completed poll cycles.");
        describe_counter!(
            "quake_source_errors_total",
            "Poll cycles skipped because the topic source failed."
        );
        describe_counter!("quake_topics_seen_total", "Topics parsed from the page.");
        describe_counter!(
            "quake_candidates_total",
            "Topics that matched the earthquake pattern."
        );
        describe_counter!("quake_alerts_total", "Alerts emitted to the sinks.");
        describe_counter!(
            "quake_duplicates_suppressed_total",
            "Candidates dropped because the event was already alerted."
        );
        describe_counter!("quake_sink_errors_total", "Failed sink writes.");
        describe_histogram!("quake_fetch_ms", "Topic fetch + parse time in milliseconds.");
        describe_gauge!("quake_last_poll_ts", "Unix ts of the last poll.");
    });
}

/// Install the Prometheus recorder with its own HTTP listener on `addr`.
pub fn install_exporter(addr: &str) -> Result<()> {
    let addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("invalid metrics address {addr}"))?;
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .context("prometheus: install exporter")?;
    ensure_metrics_described();
    Ok(())
}
