//! # Earthquake Detector
//! Pure, testable extraction of `(day, month, year, province)` from a trending
//! topic title such as `"6 şubat 2025 kahramanmaraş depremi"`.
//!
//! Steps run in a fixed order and stop at the first one that fails:
//! day → month → year → date window → province → keyword confidence.
//! A title that fails any step is simply not an earthquake topic (`None`).
//!
//! The day is the leftmost bare 1–31 token anywhere in the title, even when that
//! number belongs to something else. Month and province lookups are ordered
//! linear scans; the first lexicon entry that matches wins.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dedup::EventIdentity;
use crate::normalize::normalize;

/// Default accepted distance between the title's date and today, in days.
pub const DEFAULT_TOLERANCE_DAYS: i64 = 1;

/// Month spellings, Turkish first then the ASCII-folded variant.
/// Order is part of the contract when two spellings co-occur.
pub const MONTHS: &[(&str, u32)] = &[
    ("ocak", 1),
    ("şubat", 2),
    ("subat", 2),
    ("mart", 3),
    ("nisan", 4),
    ("mayıs", 5),
    ("mayis", 5),
    ("haziran", 6),
    ("temmuz", 7),
    ("ağustos", 8),
    ("agustos", 8),
    ("eylül", 9),
    ("eylul", 9),
    ("ekim", 10),
    ("kasım", 11),
    ("kasim", 11),
    ("aralık", 12),
    ("aralik", 12),
];

/// "earthquake" and its event form ("the ... earthquake").
pub const EARTHQUAKE_KEYWORDS: &[&str] = &["deprem", "depremi"];

/// A first-level administrative region: canonical (Turkish) name plus extra
/// spellings that folding alone cannot derive.
#[derive(Debug, Clone, Copy)]
pub struct Province {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

const fn p(name: &'static str) -> Province {
    Province { name, aliases: &[] }
}

/// The 81 provinces, in official order. ASCII-folded spellings are covered by
/// matching the folded title against the folded name.
pub const PROVINCES: &[Province] = &[
    p("adana"),
    p("adıyaman"),
    Province {
        name: "afyonkarahisar",
        aliases: &["afyon"],
    },
    p("ağrı"),
    p("aksaray"),
    p("amasya"),
    p("ankara"),
    p("antalya"),
    p("ardahan"),
    p("artvin"),
    p("aydın"),
    p("balıkesir"),
    p("bartın"),
    p("batman"),
    p("bayburt"),
    p("bilecik"),
    p("bingöl"),
    p("bitlis"),
    p("bolu"),
    p("burdur"),
    p("bursa"),
    p("çanakkale"),
    p("çankırı"),
    p("çorum"),
    p("denizli"),
    p("diyarbakır"),
    p("düzce"),
    p("edirne"),
    p("elazığ"),
    p("erzincan"),
    p("erzurum"),
    p("eskişehir"),
    p("gaziantep"),
    p("giresun"),
    p("gümüşhane"),
    p("hakkâri"),
    p("hatay"),
    p("ığdır"),
    p("isparta"),
    p("istanbul"),
    p("izmir"),
    p("kahramanmaraş"),
    p("karabük"),
    p("karaman"),
    p("kars"),
    p("kastamonu"),
    p("kayseri"),
    p("kilis"),
    p("kırıkkale"),
    p("kırklareli"),
    p("kırşehir"),
    p("kocaeli"),
    p("konya"),
    p("kütahya"),
    p("malatya"),
    p("manisa"),
    p("mardin"),
    p("mersin"),
    p("muğla"),
    p("muş"),
    p("nevşehir"),
    p("niğde"),
    p("ordu"),
    p("osmaniye"),
    p("rize"),
    p("sakarya"),
    p("samsun"),
    p("siirt"),
    p("sinop"),
    p("sivas"),
    p("şanlıurfa"),
    p("şırnak"),
    p("tekirdağ"),
    p("tokat"),
    p("trabzon"),
    p("tunceli"),
    p("uşak"),
    p("van"),
    p("yalova"),
    p("yozgat"),
    p("zonguldak"),
];

static RE_DAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([1-9]|[12][0-9]|3[01])\b").expect("day regex"));
static RE_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(20[0-9]{2})\b").expect("year regex"));

/// Whole-word matchers for one spelling: raw lowercase and folded.
struct SpellingPattern {
    raw: Regex,
    folded: Regex,
}

impl SpellingPattern {
    fn new(spelling: &str) -> Self {
        let word = |s: &str| {
            Regex::new(&format!(r"\b{}\b", regex::escape(s))).expect("escaped province regex")
        };
        Self {
            raw: word(&spelling.to_lowercase()),
            folded: word(&normalize(spelling)),
        }
    }

    fn is_match(&self, title_lower: &str, title_folded: &str) -> bool {
        self.raw.is_match(title_lower) || self.folded.is_match(title_folded)
    }
}

static PROVINCE_PATTERNS: Lazy<Vec<(&'static str, Vec<SpellingPattern>)>> = Lazy::new(|| {
    PROVINCES
        .iter()
        .map(|prov| {
            let spellings = std::iter::once(prov.name)
                .chain(prov.aliases.iter().copied())
                .map(SpellingPattern::new)
                .collect();
            (prov.name, spellings)
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Date + province + an earthquake keyword.
    High,
    /// Date + province only.
    Medium,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Confidence::High => f.write_str("high"),
            Confidence::Medium => f.write_str("medium"),
        }
    }
}

/// Structured result of a successful detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarthquakeCandidate {
    pub day: u32,
    pub month: u32,
    /// Month spelling as it matched in the title's lexicon scan.
    pub month_name: String,
    pub year: i32,
    /// Canonical province name.
    pub province: String,
    pub has_keyword: bool,
    pub confidence: Confidence,
}

impl EarthquakeCandidate {
    pub fn identity(&self) -> EventIdentity {
        EventIdentity {
            day: self.day,
            month: self.month,
            year: self.year,
            province: self.province.clone(),
        }
    }
}

/// Detector with a configurable date window.
#[derive(Debug, Clone, Copy)]
pub struct Detector {
    tolerance_days: i64,
}

impl Default for Detector {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_DAYS)
    }
}

impl Detector {
    /// Negative tolerances are treated as 0 (same day only).
    pub fn new(tolerance_days: i64) -> Self {
        Self {
            tolerance_days: tolerance_days.max(0),
        }
    }

    pub fn tolerance_days(&self) -> i64 {
        self.tolerance_days
    }

    /// Returns `None` for every title that is not a live earthquake topic.
    pub fn detect(&self, title: &str, today: NaiveDate) -> Option<EarthquakeCandidate> {
        let title_lower = title.to_lowercase();

        let day = extract_day(title)?;
        let (month_name, month) = extract_month(&title_lower)?;
        let year = extract_year(title)?;

        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        if !is_within_window(date, today, self.tolerance_days) {
            return None;
        }

        let title_folded = normalize(title);
        let province = find_province(&title_lower, &title_folded)?;

        let has_keyword = EARTHQUAKE_KEYWORDS
            .iter()
            .any(|kw| title_lower.contains(kw));

        Some(EarthquakeCandidate {
            day,
            month,
            month_name: month_name.to_string(),
            year,
            province: province.to_string(),
            has_keyword,
            confidence: if has_keyword {
                Confidence::High
            } else {
                Confidence::Medium
            },
        })
    }
}

/// Detect with the default ±1 day window.
pub fn detect(title: &str, today: NaiveDate) -> Option<EarthquakeCandidate> {
    Detector::default().detect(title, today)
}

/// Leftmost bare integer in 1..=31.
pub fn extract_day(title: &str) -> Option<u32> {
    RE_DAY
        .captures(title)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// First lexicon entry that occurs as a substring of the lowercased title.
pub fn extract_month(title_lower: &str) -> Option<(&'static str, u32)> {
    MONTHS
        .iter()
        .find(|(name, _)| title_lower.contains(name))
        .copied()
}

/// Leftmost 20xx token.
pub fn extract_year(title: &str) -> Option<i32> {
    RE_YEAR
        .captures(title)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// `|date - today| <= tolerance_days`, inclusive.
pub fn is_within_window(date: NaiveDate, today: NaiveDate, tolerance_days: i64) -> bool {
    (date - today).num_days().abs() <= tolerance_days
}

/// First province (in list order) whose name appears as a whole word in either
/// the lowercased or the folded title.
pub fn find_province(title_lower: &str, title_folded: &str) -> Option<&'static str> {
    PROVINCE_PATTERNS
        .iter()
        .find(|(_, spellings)| spellings.iter().any(|s| s.is_match(title_lower, title_folded)))
        .map(|(name, _)| *name)
}
