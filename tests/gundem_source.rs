// tests/gundem_source.rs
use std::sync::Arc;

use chrono::NaiveDate;
use quake_watch::ingest::gundem::GundemSource;
use quake_watch::notify::MemorySink;
use quake_watch::{DedupStore, Monitor, TopicSource};

const FIXTURE: &str = include_str!("fixtures/gundem.html");

#[tokio::test]
async fn fixture_page_yields_ordered_topics() {
    let source = GundemSource::from_fixture(FIXTURE);
    let topics = source.fetch().await.expect("fixture parses");

    assert_eq!(topics.len(), 5, "sponsored row without a link is skipped");
    assert_eq!(topics[0].title, "22 ekim 2025 istanbul depremi");
    assert_eq!(topics[0].entry_count, "318");
    assert_eq!(
        topics[0].url,
        "/22-ekim-2025-istanbul-depremi--7712345?a=popular"
    );
    assert_eq!(topics[1].title, "gram altın");
    assert_eq!(topics[4].title, "22 Ekim 2025 İstanbul deprem");
    assert_eq!(topics[4].entry_count, "0");
    assert!(topics.iter().all(|t| t.url.starts_with('/')));
}

#[tokio::test]
async fn fixture_page_through_monitor_alerts_once() {
    let sink = Arc::new(MemorySink::new());
    let mut monitor = Monitor::new(
        GundemSource::from_fixture(FIXTURE),
        Arc::clone(&sink),
        Arc::new(DedupStore::new()),
    );

    let today = NaiveDate::from_ymd_opt(2025, 10, 22).unwrap();
    let report = monitor.poll_once_at(today).await;

    assert_eq!(report.topics, 5);
    assert_eq!(report.candidates, 2);
    assert_eq!(report.alerts, 1);
    assert_eq!(report.duplicates, 1);

    let recorded = sink.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].headline(), "22 ekim 2025 - ISTANBUL");
}

#[tokio::test]
async fn maintenance_page_is_a_source_error() {
    let source = GundemSource::from_fixture("<html><body><p>bakım çalışması</p></body></html>");
    let err = source.fetch().await.unwrap_err();
    assert_eq!(err.kind(), "malformed");
}
