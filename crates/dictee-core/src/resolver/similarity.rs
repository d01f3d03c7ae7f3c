//! Similarity ranking between a lexicon token and a dictated token.
//!
//! A candidate is ranked by phonetic distance, then literal distance, then
//! the kind of lexicon target it matched (DCI before key before alias).
//! Comparison is strict: a later candidate replaces the running best only on
//! strict improvement, so earlier candidates win remaining ties.

use serde::{Deserialize, Serialize};

use super::phonetic::PhoneticCache;

/// Which field of a lexicon entry a target token came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Dci = 0,
    Key = 1,
    Alias = 2,
}

/// Edit distance with unit insert/delete/substitute costs.
pub fn levenshtein(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Levenshtein distance divided by the longer length (in chars).
/// Two empty strings are at distance 0.
pub fn normalized_distance(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 0.0;
    }
    levenshtein(a, b) as f64 / longest as f64
}

/// Minimum normalized distance over all code pairs; infinite when either
/// side has no code.
pub fn phonetic_distance(codes_a: &[String], codes_b: &[String]) -> f64 {
    let mut best = f64::INFINITY;
    for a in codes_a {
        for b in codes_b {
            best = best.min(normalized_distance(a, b));
        }
    }
    best
}

/// Score of one (target, input) token pair. Lower is better on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub phonetic: f64,
    pub text: f64,
    pub priority: Priority,
}

impl MatchScore {
    /// Score `input` against a lexicon `target` token.
    pub fn compute(
        cache: &mut PhoneticCache,
        target: &str,
        input: &str,
        priority: Priority,
    ) -> Self {
        let (target_codes, input_codes) = cache.pair(target, input);
        Self {
            phonetic: phonetic_distance(target_codes, input_codes),
            text: normalized_distance(target, input),
            priority,
        }
    }

    /// Strict ranking: phonetic, then text, then priority.
    pub fn beats(&self, other: &MatchScore) -> bool {
        if self.phonetic != other.phonetic {
            return self.phonetic < other.phonetic;
        }
        if self.text != other.text {
            return self.text < other.text;
        }
        self.priority < other.priority
    }

    /// Identical tokens.
    pub fn is_exact(&self) -> bool {
        self.text == 0.0
    }
}

/// Incrementally tracked best candidate.
#[derive(Debug, Clone)]
pub struct RunningBest<T> {
    best: Option<(MatchScore, T)>,
}

impl<T> Default for RunningBest<T> {
    fn default() -> Self {
        Self { best: None }
    }
}

impl<T> RunningBest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `item` if it is the first candidate or strictly beats the
    /// incumbent. Returns whether it was installed.
    pub fn offer(&mut self, score: MatchScore, item: T) -> bool {
        let replace = match &self.best {
            None => true,
            Some((incumbent, _)) => score.beats(incumbent),
        };
        if replace {
            self.best = Some((score, item));
        }
        replace
    }

    pub fn score(&self) -> Option<&MatchScore> {
        self.best.as_ref().map(|(s, _)| s)
    }

    pub fn into_inner(self) -> Option<(MatchScore, T)> {
        self.best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(phonetic: f64, text: f64, priority: Priority) -> MatchScore {
        MatchScore {
            phonetic,
            text,
            priority,
        }
    }

    #[test]
    fn test_levenshtein_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("céfépime", "céfépime"), 0);
    }

    #[test]
    fn test_normalized_distance() {
        assert_eq!(normalized_distance("", ""), 0.0);
        assert_eq!(normalized_distance("abcd", "abcx"), 0.25);
        // Counted in chars, not bytes
        assert_eq!(normalized_distance("é", "e"), 1.0);
    }

    #[test]
    fn test_phonetic_distance_infinite_without_codes() {
        let codes = vec!["SFTR".to_string()];
        assert!(phonetic_distance(&codes, &[]).is_infinite());
        assert!(phonetic_distance(&[], &codes).is_infinite());
        assert_eq!(phonetic_distance(&codes, &codes), 0.0);
    }

    #[test]
    fn test_phonetic_distance_takes_min_pair() {
        let a = vec!["JNTM".to_string(), "KNTM".to_string()];
        let b = vec!["KNTM".to_string()];
        assert_eq!(phonetic_distance(&a, &b), 0.0);
    }

    #[test]
    fn test_beats_order() {
        let base = score(0.25, 0.5, Priority::Key);

        assert!(score(0.0, 0.9, Priority::Alias).beats(&base));
        assert!(!score(0.5, 0.0, Priority::Dci).beats(&base));
        assert!(score(0.25, 0.4, Priority::Alias).beats(&base));
        assert!(score(0.25, 0.5, Priority::Dci).beats(&base));
        assert!(!score(0.25, 0.5, Priority::Key).beats(&base));
        assert!(!score(0.25, 0.5, Priority::Alias).beats(&base));
    }

    #[test]
    fn test_infinite_phonetic_ties_fall_to_text() {
        let a = score(f64::INFINITY, 0.1, Priority::Alias);
        let b = score(f64::INFINITY, 0.2, Priority::Dci);
        assert!(a.beats(&b));
    }

    #[test]
    fn test_running_best_is_stable() {
        let mut best = RunningBest::new();
        assert!(best.offer(score(0.0, 0.1, Priority::Alias), "first"));
        assert!(!best.offer(score(0.0, 0.1, Priority::Alias), "second"));
        assert!(best.offer(score(0.0, 0.1, Priority::Dci), "third"));

        let (s, item) = best.into_inner().unwrap();
        assert_eq!(item, "third");
        assert_eq!(s.priority, Priority::Dci);
    }

    #[test]
    fn test_compute_identical_tokens() {
        let mut cache = PhoneticCache::new();
        let s = MatchScore::compute(&mut cache, "ceftriaxone", "ceftriaxone", Priority::Dci);
        assert_eq!(s.phonetic, 0.0);
        assert!(s.is_exact());
    }
}
