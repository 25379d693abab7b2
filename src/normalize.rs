//! Turkish locale folding.
//!
//! Province names show up both with Turkish letters ("kahramanmaraş") and
//! ASCII-folded ("kahramanmaras"). Folding both sides through `normalize`
//! lets a single lexicon match either spelling.

/// One-to-one character table applied after lowercasing. Uppercase Turkish
/// letters need no entries: `to_lowercase` maps them onto the rows below.
const FOLD_TABLE: &[(char, char)] = &[
    ('ı', 'i'),
    ('ğ', 'g'),
    ('ü', 'u'),
    ('ş', 's'),
    ('ö', 'o'),
    ('ç', 'c'),
    ('â', 'a'),
    ('î', 'i'),
    ('û', 'u'),
];

/// Combining dot above. `"İ".to_lowercase()` yields `"i\u{307}"`; the mark is dropped.
const COMBINING_DOT_ABOVE: char = '\u{307}';

fn fold_char(c: char) -> char {
    FOLD_TABLE
        .iter()
        .find_map(|&(from, to)| (from == c).then_some(to))
        .unwrap_or(c)
}

/// Lowercase `text` and fold Turkish letters to ASCII.
///
/// Total and pure: never fails, and the output never has more characters
/// than the lowercased input.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|&c| c != COMBINING_DOT_ABOVE)
        .map(fold_char)
        .collect()
}
