//! Dictation text normalizer.
//!
//! Handles, in order:
//! - Whitespace and line-break cleanup, lowercasing
//! - Number words → digits (zéro..dix)
//! - Compact doses ("1gx3" → "1 g x3", "4g" → "4 g")
//! - Unit words → symbols (grammes → g, milligrammes → mg, microgrammes → µg)
//! - Frequencies ("3 fois par jour" → "3x/j")
//!
//! Normalization is total and idempotent.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::patterns::compile;

static LINE_BREAKS: LazyLock<Regex> = LazyLock::new(|| compile(r"\r\n?"));
static HORIZONTAL_SPACE: LazyLock<Regex> = LazyLock::new(|| compile(r"[^\S\n]+"));
static NUMBER_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"\b(zéro|zero|une|un|deux|trois|quatre|cinq|six|sept|huit|neuf|dix)\b")
});
static COMPACT_DOSE_TIMES: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(\d+(?:[.,]\d+)?)gx(\d+)"));
static COMPACT_DOSE: LazyLock<Regex> = LazyLock::new(|| compile(r"(\d)(mg|µg|ug|g)\b"));
static UNIT_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    compile(r"(^|[^\p{L}])[ ]*(milligrammes?|microgrammes?|grammes?)\b")
});
static FREQUENCY: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(\d+)\s*(?:fois|x)\s*(?:par\s+jour|/\s*jour)\b"));

static SHARED: LazyLock<Normalizer> = LazyLock::new(Normalizer::new);

/// Normalize raw dictation with the default mappings.
pub fn normalize(raw: &str) -> String {
    SHARED.normalize(raw)
}

/// Normalizer for dictated prescription text.
pub struct Normalizer {
    /// Spoken number → digits
    number_words: HashMap<&'static str, &'static str>,
    /// Unit word (singular or plural) → symbol
    unit_words: HashMap<&'static str, &'static str>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create a normalizer with default mappings.
    pub fn new() -> Self {
        Self {
            number_words: Self::default_number_words(),
            unit_words: Self::default_unit_words(),
        }
    }

    /// Normalize raw dictation text.
    pub fn normalize(&self, raw: &str) -> String {
        let text = raw.trim();
        let text = LINE_BREAKS.replace_all(text, "\n");
        let text = HORIZONTAL_SPACE.replace_all(&text, " ");
        let text = text.to_lowercase();
        let text = self.replace_number_words(&text);
        let text = merge_compact_doses(&text);
        let text = self.canonicalize_units(&text);
        let text = canonicalize_frequencies(&text);
        let text = HORIZONTAL_SPACE.replace_all(&text, " ");
        text.trim().to_string()
    }

    /// Replace whole-word small numbers with digits.
    pub fn replace_number_words(&self, text: &str) -> String {
        NUMBER_WORDS
            .replace_all(text, |caps: &Captures| {
                let word = &caps[1];
                self.number_words
                    .get(word)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| word.to_string())
            })
            .into_owned()
    }

    /// Replace unit words with their symbol, space-prefixed.
    pub fn canonicalize_units(&self, text: &str) -> String {
        UNIT_WORDS
            .replace_all(text, |caps: &Captures| {
                let word = &caps[2];
                let symbol = self.unit_words.get(word).copied().unwrap_or(word);
                format!("{} {}", &caps[1], symbol)
            })
            .into_owned()
    }

    /// Default French number words.
    fn default_number_words() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.insert("zéro", "0");
        map.insert("zero", "0");
        map.insert("un", "1");
        map.insert("une", "1");
        map.insert("deux", "2");
        map.insert("trois", "3");
        map.insert("quatre", "4");
        map.insert("cinq", "5");
        map.insert("six", "6");
        map.insert("sept", "7");
        map.insert("huit", "8");
        map.insert("neuf", "9");
        map.insert("dix", "10");
        map
    }

    /// Default unit words.
    fn default_unit_words() -> HashMap<&'static str, &'static str> {
        let mut map = HashMap::new();
        map.insert("gramme", "g");
        map.insert("grammes", "g");
        map.insert("milligramme", "mg");
        map.insert("milligrammes", "mg");
        map.insert("microgramme", "µg");
        map.insert("microgrammes", "µg");
        map
    }
}

/// "1gx3" → "1 g x3", then "4g" → "4 g".
fn merge_compact_doses(text: &str) -> String {
    // Chained "1gx2gx3": matches do not overlap, so the multiplier of one
    // dose is the amount of the next. Repeat until stable.
    let mut text = text.to_string();
    loop {
        let next = COMPACT_DOSE_TIMES.replace_all(&text, "${1} g x${2}").into_owned();
        if next == text {
            break;
        }
        text = next;
    }
    COMPACT_DOSE.replace_all(&text, "${1} ${2}").into_owned()
}

/// "3 fois par jour" / "3 x /jour" → "3x/j".
fn canonicalize_frequencies(text: &str) -> String {
    FREQUENCY.replace_all(text, "${1}x/j").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_and_case() {
        assert_eq!(normalize("  Ceftriaxone \t 1 G  "), "ceftriaxone 1 g");
        assert_eq!(normalize("a\r\nb\rc"), "a\nb\nc");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(" \n\t "), "");
    }

    #[test]
    fn test_number_words() {
        assert_eq!(normalize("deux g"), "2 g");
        assert_eq!(normalize("une fois par jour"), "1x/j");
        assert_eq!(normalize("pendant dix jours"), "pendant 10 jours");
        // Whole words only
        assert_eq!(normalize("septembre"), "septembre");
    }

    #[test]
    fn test_compact_doses() {
        assert_eq!(normalize("1gx3"), "1 g x3");
        assert_eq!(normalize("4g"), "4 g");
        assert_eq!(normalize("80mg"), "80 mg");
        assert_eq!(normalize("1,5g"), "1,5 g");
    }

    #[test]
    fn test_unit_words() {
        assert_eq!(normalize("1 gramme"), "1 g");
        assert_eq!(normalize("500 milligrammes"), "500 mg");
        assert_eq!(normalize("250microgrammes"), "250 µg");
        assert_eq!(normalize("deux grammes"), "2 g");
    }

    #[test]
    fn test_frequencies() {
        assert_eq!(normalize("3 fois par jour"), "3x/j");
        assert_eq!(normalize("2 x / jour"), "2x/j");
        assert_eq!(normalize("trois fois par jour"), "3x/j");
        // "x2" is not a frequency phrase on its own
        assert_eq!(normalize("4 g x2 par jour"), "4 g x2 par jour");
    }

    #[test]
    fn test_full_sentence() {
        let normalized = normalize(
            "Ceftriaxone 1g 3 fois par jour VVP pendant 7 jours (retrocession hospitaliere)",
        );
        assert_eq!(
            normalized,
            "ceftriaxone 1 g 3x/j vvp pendant 7 jours (retrocession hospitaliere)"
        );
    }

    #[test]
    fn test_chained_compact_doses() {
        assert_eq!(normalize("1gx2gx3"), "1 g x2 g x3");
        assert_eq!(normalize("2gx3gx4gx5"), "2 g x3 g x4 g x5");
    }

    #[test]
    fn test_idempotent_on_samples() {
        for raw in [
            "Ceftriaxone 1g 3 fois par jour VVP",
            "1gx3 fois par jour",
            "1gx2gx3",
            "0,5gx2gx4g",
            "deux grammes\r\n\r\nune fois / jour",
            "M. Jean Dupont, 06 12 34 56 78",
        ] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "not idempotent for {raw:?}");
        }
    }
}
