// src/ingest/gundem.rs
//! Trending ("gündem") page of Ekşi Sözlük as a `TopicSource`.
//!
//! Markup shape:
//! ```html
//! <ul class="topic-list">
//!   <li><a href="/istanbul-depremi--123?a=popular">22 ekim 2025 istanbul depremi <small>45</small></a></li>
//! </ul>
//! ```
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use metrics::{counter, histogram};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::MonitorConfig;
use crate::error::SourceError;
use crate::ingest::types::{Topic, TopicSource};

static SEL_TOPIC_LIST: Lazy<Selector> =
    Lazy::new(|| Selector::parse("ul.topic-list").expect("topic-list selector"));
static SEL_ITEM: Lazy<Selector> = Lazy::new(|| Selector::parse("li").expect("item selector"));
static SEL_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("link selector"));
static RE_WS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex"));

pub struct GundemSource {
    mode: Mode,
}

enum Mode {
    // Owned copy so tests can pass any &str.
    Fixture(String),
    Http { url: String, client: reqwest::Client },
}

impl GundemSource {
    pub fn from_fixture(html: &str) -> Self {
        Self {
            mode: Mode::Fixture(html.to_string()),
        }
    }

    /// HTTP mode with the configured URL, user agent and request timeout.
    pub fn from_config(cfg: &MonitorConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .user_agent(&cfg.user_agent)
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .build()?;
        Ok(Self {
            mode: Mode::Http {
                url: cfg.source_url.clone(),
                client,
            },
        })
    }

    async fn load_html(&self) -> Result<String, SourceError> {
        match &self.mode {
            Mode::Fixture(s) => Ok(s.clone()),
            Mode::Http { url, client } => {
                let resp = client.get(url).send().await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(SourceError::Status {
                        status,
                        url: url.clone(),
                    });
                }
                Ok(resp.text().await?)
            }
        }
    }
}

#[async_trait]
impl TopicSource for GundemSource {
    async fn fetch(&self) -> Result<Vec<Topic>, SourceError> {
        let t0 = Instant::now();
        let html = self.load_html().await?;
        let topics = parse_topics(&html, Utc::now())?;

        let ms = t0.elapsed().as_secs_f64() * 1_000.0;
        histogram!("quake_fetch_ms").record(ms);
        counter!("quake_topics_seen_total").increment(topics.len() as u64);

        Ok(topics)
    }

    fn name(&self) -> &'static str {
        "gundem"
    }
}

/// Extract topics from the trending page markup.
///
/// Each `<li>` yields at most one topic, taken from its first `<a>`; rows whose
/// first link has no `href` are skipped. The `<small>` counter inside the link
/// becomes `entry_count` and is left out of the title. A page without
/// `ul.topic-list` is malformed.
pub fn parse_topics(html: &str, observed_at: DateTime<Utc>) -> Result<Vec<Topic>, SourceError> {
    let doc = Html::parse_document(html);
    let list = doc
        .select(&SEL_TOPIC_LIST)
        .next()
        .ok_or_else(|| SourceError::malformed("could not find topic-list"))?;

    let topics = list
        .select(&SEL_ITEM)
        .filter_map(|li| {
            // only the row's first link is the topic; later ones are author/extra links
            let a = li.select(&SEL_LINK).next()?;
            let href = a.value().attr("href")?.trim();
            if href.is_empty() {
                return None;
            }
            let (title, entry_count) = split_link_text(a);
            Some(Topic {
                title,
                url: href.to_string(),
                entry_count: entry_count.unwrap_or_else(|| "0".to_string()),
                observed_at,
            })
        })
        .collect();

    Ok(topics)
}

fn split_link_text(a: ElementRef<'_>) -> (String, Option<String>) {
    let mut parts: Vec<&str> = Vec::new();
    let mut entry_count = None;

    for child in a.children() {
        if let Some(text) = child.value().as_text() {
            let s: &str = text;
            parts.push(s);
        } else if let Some(el) = ElementRef::wrap(child) {
            if el.value().name() == "small" {
                entry_count = Some(collapse_ws(&el.text().collect::<String>()));
            } else {
                parts.extend(el.text());
            }
        }
    }

    (collapse_ws(&parts.concat()), entry_count)
}

fn collapse_ws(s: &str) -> String {
    RE_WS.replace_all(s, " ").trim().to_string()
}
