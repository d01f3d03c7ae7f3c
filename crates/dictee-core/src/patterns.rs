//! Compiled patterns shared by the matcher, the splitter and the extractors.
//!
//! All patterns run on normalized (lowercased) text.

use std::sync::LazyLock;

use regex::Regex;

pub(crate) fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("Invalid built-in regex pattern")
}

/// `<number>[.,<number>] (mg|g|µg|ug)`
static DOSE: LazyLock<Regex> =
    LazyLock::new(|| compile(r"\b(\d+(?:[.,]\d+)?)\s*(mg|µg|ug|g)\b"));

/// Tokens separating two treatments dictated in one breath.
static CONNECTOR: LazyLock<Regex> = LazyLock::new(|| compile(r"\b(?:et|puis|plus)\b|[,;]"));

/// A dose occurrence with byte offsets into the searched text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoseMatch {
    pub start: usize,
    pub end: usize,
    /// Numeric part as written ("1", "0,5")
    pub amount: String,
    /// Unit symbol ("mg", "g", "µg", "ug")
    pub unit: String,
}

impl DoseMatch {
    /// Dose rendered as "<amount> <unit>".
    pub fn label(&self) -> String {
        format!("{} {}", self.amount, self.unit)
    }
}

/// Byte span of a connector token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// All dose occurrences, in text order.
pub fn find_doses(text: &str) -> Vec<DoseMatch> {
    DOSE.captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            Some(DoseMatch {
                start: whole.start(),
                end: whole.end(),
                amount: caps.get(1)?.as_str().to_string(),
                unit: caps.get(2)?.as_str().to_string(),
            })
        })
        .collect()
}

/// First dose occurrence.
pub fn find_dose(text: &str) -> Option<DoseMatch> {
    find_doses(text).into_iter().next()
}

/// All connector occurrences, in text order.
pub fn find_connectors(text: &str) -> Vec<Span> {
    CONNECTOR
        .find_iter(text)
        .map(|m| Span {
            start: m.start(),
            end: m.end(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_doses() {
        let doses = find_doses("ceftriaxone 1 g et 4 g x2 puis 0,5 mg");
        let labels: Vec<String> = doses.iter().map(|d| d.label()).collect();
        assert_eq!(labels, vec!["1 g", "4 g", "0,5 mg"]);
        assert_eq!(doses[0].start, 12);
    }

    #[test]
    fn test_dose_needs_unit_and_boundary() {
        assert!(find_dose("pendant 7 jours").is_none());
        assert!(find_dose("3x/j").is_none());
        assert!(find_dose("x2 g").is_none());
        assert_eq!(find_dose("80mg").map(|d| d.label()), Some("80 mg".into()));
        assert_eq!(find_dose("250 µg").map(|d| d.unit), Some("µg".into()));
    }

    #[test]
    fn test_connectors_are_whole_words() {
        let spans = find_connectors("a et b, c; plusieurs puis d");
        assert_eq!(spans.len(), 4);
        assert!(find_connectors("petite").is_empty());
    }
}
