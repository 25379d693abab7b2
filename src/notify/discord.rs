use super::{AlertEvent, EventSink};
use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Clone)]
pub struct DiscordSink {
    webhook: String,
    link_base: String,
    client: Client,
    timeout: Duration,
    max_attempts: u8,
}

impl DiscordSink {
    /// Single attempt by default: a failed alert is logged, not re-sent.
    pub fn new(webhook: String, link_base: impl Into<String>) -> Self {
        Self {
            webhook,
            link_base: link_base.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            timeout: Duration::from_secs(5),
            max_attempts: 1,
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    pub fn with_attempts(mut self, attempts: u8) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    fn payload(&self, ev: &AlertEvent) -> DiscordWebhookPayload {
        let title = format!("Earthquake: {}", ev.headline());
        let description = format!(
            "**Title:** {}\n**Link:** {}{}\n**Entries:** {}\n**Confidence:** {}\n**Detected (UTC):** {}",
            ev.topic.title,
            self.link_base,
            ev.topic.url,
            ev.topic.entry_count,
            ev.earthquake.confidence,
            ev.detected_at.to_rfc3339()
        );
        DiscordWebhookPayload::embed(&title, &description)
    }
}

#[async_trait::async_trait]
impl EventSink for DiscordSink {
    async fn record(&self, ev: &AlertEvent) -> Result<()> {
        let payload = self.payload(ev);

        let mut attempt: u8 = 0;
        loop {
            attempt += 1;
            let res = self
                .client
                .post(&self.webhook)
                .timeout(self.timeout)
                .json(&payload)
                .send()
                .await;

            let err = match res {
                Ok(rsp) => match rsp.error_for_status_ref() {
                    Ok(_) => return Ok(()),
                    Err(e) => anyhow!("Discord webhook HTTP error: {e}"),
                },
                Err(e) => anyhow!("Discord webhook request failed: {e}"),
            };

            if attempt >= self.max_attempts {
                return Err(err);
            }
            tokio::time::sleep(Duration::from_millis(500u64 << (attempt - 1))).await;
        }
    }

    fn name(&self) -> &'static str {
        "discord"
    }
}

#[derive(Serialize)]
struct DiscordEmbed {
    title: String,
    description: String,
}

#[derive(Serialize)]
struct DiscordWebhookPayload {
    content: Option<String>,
    embeds: Vec<DiscordEmbed>,
}

impl DiscordWebhookPayload {
    fn embed(title: &str, description: &str) -> Self {
        Self {
            content: None,
            embeds: vec![DiscordEmbed {
                title: title.to_string(),
                description: description.to_string(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{Confidence, EarthquakeCandidate};
    use crate::ingest::types::Topic;

    #[test]
    fn payload_carries_headline_and_link() {
        let sink = DiscordSink::new("http://127.0.0.1:9/hook".into(), "https://eksisozluk.com");
        let ev = AlertEvent::new(
            &Topic::new("22 ekim 2025 van depremi", "/van--1").with_entry_count("12"),
            &EarthquakeCandidate {
                day: 22,
                month: 10,
                month_name: "ekim".into(),
                year: 2025,
                province: "van".into(),
                has_keyword: true,
                confidence: Confidence::High,
            },
        );
        let body = serde_json::to_value(sink.payload(&ev)).unwrap();
        assert_eq!(body["embeds"][0]["title"], "Earthquake: 22 ekim 2025 - VAN");
        let desc = body["embeds"][0]["description"].as_str().unwrap();
        assert!(desc.contains("https://eksisozluk.com/van--1"));
        assert!(desc.contains("**Confidence:** high"));
    }

    #[tokio::test]
    async fn unreachable_webhook_is_an_error_not_a_panic() {
        let sink = DiscordSink::new("http://127.0.0.1:9/hook".into(), "").with_timeout(1);
        let ev = AlertEvent::new(
            &Topic::new("t", "/t"),
            &EarthquakeCandidate {
                day: 1,
                month: 1,
                month_name: "ocak".into(),
                year: 2025,
                province: "van".into(),
                has_keyword: false,
                confidence: Confidence::Medium,
            },
        );
        assert!(sink.record(&ev).await.is_err());
    }
}
