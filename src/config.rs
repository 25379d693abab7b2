// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG_PATH: &str = "QUAKE_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/monitor.toml";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Monitor settings. Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub source_url: String,
    /// Prefix for the site-relative topic links in alerts.
    pub link_base: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub poll_interval_secs: u64,
    /// Heartbeat log line every N successful polls.
    pub heartbeat_every: u64,
    pub tolerance_days: i64,
    pub events_path: PathBuf,
    pub log_path: Option<PathBuf>,
    pub discord_webhook: Option<String>,
    /// Prometheus exporter listen address, e.g. "127.0.0.1:9000".
    pub metrics_addr: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            source_url: "https://eksisozluk.com/basliklar/gundem".to_string(),
            link_base: "https://eksisozluk.com".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 20,
            poll_interval_secs: 30,
            heartbeat_every: 2,
            tolerance_days: 1,
            events_path: PathBuf::from("data/detected_events.jsonl"),
            log_path: Some(PathBuf::from("logs/gundem_monitor.log")),
            discord_webhook: None,
            metrics_addr: None,
        }
    }
}

impl MonitorConfig {
    /// Load from an explicit TOML file, then apply env overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading monitor config from {}", path.display()))?;
        let cfg: MonitorConfig = toml::from_str(&content)
            .with_context(|| format!("parsing monitor config {}", path.display()))?;
        Ok(cfg.with_env_overrides()?.sanitized())
    }

    /// Resolution order:
    /// 1) $QUAKE_CONFIG_PATH (must exist)
    /// 2) config/monitor.toml
    /// 3) built-in defaults
    ///
    /// Env overrides apply on top in every case.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default().with_env_overrides()?.sanitized())
    }

    fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(v) = env_parse("QUAKE_POLL_INTERVAL_SECS")? {
            self.poll_interval_secs = v;
        }
        if let Some(v) = env_parse("QUAKE_HEARTBEAT_EVERY")? {
            self.heartbeat_every = v;
        }
        if let Some(v) = env_parse("QUAKE_TOLERANCE_DAYS")? {
            self.tolerance_days = v;
        }
        if let Some(v) = env_string("QUAKE_SOURCE_URL") {
            self.source_url = v;
        }
        if let Some(v) = env_string("QUAKE_EVENTS_PATH") {
            self.events_path = PathBuf::from(v);
        }
        if let Some(v) = env_string("QUAKE_LOG_PATH") {
            // "-" disables the log file
            self.log_path = (v != "-").then(|| PathBuf::from(v));
        }
        if let Some(v) = env_string("DISCORD_WEBHOOK_URL") {
            self.discord_webhook = Some(v);
        }
        if let Some(v) = env_string("QUAKE_METRICS_ADDR") {
            self.metrics_addr = Some(v);
        }
        Ok(self)
    }

    fn sanitized(mut self) -> Self {
        self.poll_interval_secs = self.poll_interval_secs.max(1);
        self.heartbeat_every = self.heartbeat_every.max(1);
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.tolerance_days = self.tolerance_days.max(0);
        self
    }
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_string(key) {
        None => Ok(None),
        Some(v) => v
            .parse()
            .map(Some)
            .map_err(|e| anyhow!("invalid {key}={v}: {e}")),
    }
}
