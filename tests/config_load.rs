// tests/config_load.rs
use quake_watch::config::{MonitorConfig, ENV_CONFIG_PATH};
use std::path::PathBuf;
use std::{env, fs};

const OVERRIDES: &[&str] = &[
    "QUAKE_POLL_INTERVAL_SECS",
    "QUAKE_HEARTBEAT_EVERY",
    "QUAKE_TOLERANCE_DAYS",
    "QUAKE_SOURCE_URL",
    "QUAKE_EVENTS_PATH",
    "QUAKE_LOG_PATH",
    "DISCORD_WEBHOOK_URL",
    "QUAKE_METRICS_ADDR",
];

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    for key in OVERRIDES {
        env::remove_var(key);
    }
}

#[serial_test::serial]
#[test]
fn toml_file_then_env_overrides() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("monitor.toml");
    fs::write(
        &p,
        r#"
poll_interval_secs = 5
heartbeat_every = 10
events_path = "out/events.jsonl"
discord_webhook = "https://discord.test/hook"
"#,
    )
    .unwrap();

    let cfg = MonitorConfig::load_from(&p).unwrap();
    assert_eq!(cfg.poll_interval_secs, 5);
    assert_eq!(cfg.heartbeat_every, 10);
    assert_eq!(cfg.events_path, PathBuf::from("out/events.jsonl"));
    assert_eq!(cfg.discord_webhook.as_deref(), Some("https://discord.test/hook"));
    assert_eq!(cfg.tolerance_days, 1);

    env::set_var("QUAKE_HEARTBEAT_EVERY", "7");
    env::set_var("QUAKE_LOG_PATH", "-");
    let cfg = MonitorConfig::load_from(&p).unwrap();
    assert_eq!(cfg.heartbeat_every, 7);
    assert_eq!(cfg.log_path, None);
    clear_env();
}

#[serial_test::serial]
#[test]
fn default_uses_env_then_fallbacks() {
    clear_env();
    // Isolate CWD so the repo's own config/ is not picked up
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    // 1) Nothing on disk → defaults
    let cfg = MonitorConfig::load_default().unwrap();
    assert_eq!(cfg, MonitorConfig::default());

    // 2) ./config/monitor.toml fallback
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join("config/monitor.toml"),
        "poll_interval_secs = 60",
    )
    .unwrap();
    assert_eq!(MonitorConfig::load_default().unwrap().poll_interval_secs, 60);

    // 3) env path wins
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "poll_interval_secs = 15").unwrap();
    env::set_var(ENV_CONFIG_PATH, p_env.display().to_string());
    assert_eq!(MonitorConfig::load_default().unwrap().poll_interval_secs, 15);

    // 4) env path pointing nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
    assert!(MonitorConfig::load_default().is_err());

    clear_env();
    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn zero_values_are_clamped_on_load() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("monitor.toml");
    fs::write(&p, "poll_interval_secs = 0\nheartbeat_every = 0\ntolerance_days = -2").unwrap();
    let cfg = MonitorConfig::load_from(&p).unwrap();
    assert_eq!(cfg.poll_interval_secs, 1);
    assert_eq!(cfg.heartbeat_every, 1);
    assert_eq!(cfg.tolerance_days, 0);
}
