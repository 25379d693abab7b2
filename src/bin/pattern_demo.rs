//! Runs the detector over sample titles dated around today and prints the verdicts.

use chrono::{Duration, Local};
use quake_watch::detect;

const MONTHS: [&str; 12] = [
    "ocak", "şubat", "mart", "nisan", "mayıs", "haziran", "temmuz", "ağustos", "eylül", "ekim",
    "kasım", "aralık",
];

fn turkish_date(d: chrono::NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {} {}", d.day(), MONTHS[d.month0() as usize], d.year())
}

fn main() {
    let today = Local::now().date_naive();
    let yesterday = today - Duration::days(1);
    let tomorrow = today + Duration::days(1);
    println!("Current date: {today} (testing with ±1 day tolerance)\n");

    let titles = [
        format!("{} istanbul depremi", turkish_date(today)),
        format!("{} mardin depremi", turkish_date(yesterday)),
        format!("{} ankara sarsıntısı", turkish_date(tomorrow)),
        "6 şubat 2023 kahramanmaraş depremi".to_string(),
        "15 mart 2024 van sarsıntısı".to_string(),
        "1 ocak 2023 hatay".to_string(),
        "gram altın".to_string(),
        format!("{} mattia ahmet minguzzi davası", turkish_date(yesterday)),
        format!("{} istanbul deprem", turkish_date(today)),
        format!("{} İstanbul depremi Erdoğan açıklaması", turkish_date(today)),
    ];

    println!("Testing earthquake pattern matcher:");
    println!("{}", "-".repeat(80));
    for title in &titles {
        match detect(title, today) {
            Some(m) => {
                println!("✓ MATCH: {title}");
                println!("  → {} {} {} - {}", m.day, m.month_name, m.year, m.province);
                println!("  → Confidence: {}", m.confidence);
            }
            None => println!("✗ NO MATCH: {title}"),
        }
        println!();
    }
}
