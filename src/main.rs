//! quake-watch — Binary Entrypoint
//! Polls the Ekşi Sözlük trending page and alerts on live earthquake topics
//! until interrupted (Ctrl+C).

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::oneshot;
use tracing::{info, warn};

use quake_watch::config::MonitorConfig;
use quake_watch::ingest::gundem::GundemSource;
use quake_watch::notify::{discord::DiscordSink, jsonl::JsonlSink, log::LogSink};
use quake_watch::{logging, metrics, DedupStore, Monitor, SinkMux};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();

    let cfg = MonitorConfig::load_default()?;
    logging::init_tracing(cfg.log_path.as_deref())?;

    if let Some(addr) = cfg.metrics_addr.as_deref() {
        metrics::install_exporter(addr)?;
        info!(%addr, "prometheus exporter listening");
    } else {
        metrics::ensure_metrics_described();
    }

    let mut sinks = SinkMux::new()
        .with_sink(JsonlSink::new(cfg.events_path.clone()))
        .with_sink(LogSink::new(cfg.link_base.clone()));
    if let Some(hook) = cfg.discord_webhook.clone() {
        sinks.push(Box::new(DiscordSink::new(hook, cfg.link_base.clone())));
    }

    let source = GundemSource::from_config(&cfg)?;

    info!("{}", "=".repeat(50));
    info!("    Ekşi Sözlük Earthquake Detection System STARTED");
    info!("   Polling interval: {} seconds", cfg.poll_interval_secs);
    info!(
        "   Heartbeat interval: every {} fetches (~{} minutes)",
        cfg.heartbeat_every,
        cfg.heartbeat_every * cfg.poll_interval_secs / 60
    );
    info!("   Monitoring: {}", cfg.source_url);
    info!("   Sinks: {}", sinks.len());
    info!("{}", "=".repeat(50));

    let monitor = Monitor::from_config(&cfg, source, sinks, Arc::new(DedupStore::new()));

    // Install the SIGINT handler now so Ctrl+C during the first fetch is caught too.
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "ctrl_c handler failed; stopping");
        }
        let _ = stop_tx.send(());
    });
    let shutdown = async {
        let _ = stop_rx.await;
    };

    // `run` logs the stop summary.
    monitor.run(shutdown).await;
    Ok(())
}
