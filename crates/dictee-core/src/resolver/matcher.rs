//! Drug resolution for one dictation segment.
//!
//! Two passes are combined:
//! 1. Exact: the first lexicon entry (in declaration order) owning an alias
//!    that occurs in the segment.
//! 2. Fuzzy: candidate words around the first dose, glued together to undo
//!    dictation splits, ranked against every lexicon target token.
//!
//! The exact hit is scored with the same token comparison, on the fuzzy
//! candidates plus the words of the alias it hit, and kept unless the fuzzy
//! winner strictly beats it. Its own alias words give it a zero phonetic and
//! text distance, so a fuzzy candidate only replaces it on an identical token
//! of better priority (DCI over key over alias).

use tracing::{debug, trace};

use crate::lexicon::{DrugEntry, Lexicon};
use crate::patterns::find_dose;

use super::phonetic::PhoneticCache;
use super::similarity::{MatchScore, Priority, RunningBest};
use super::tokens::{candidate_words, glue, tokenize, MIN_TOKEN_CHARS};

/// Words taken on each side of the dose when building glued candidates.
const DOSE_CONTEXT_WORDS: usize = 3;

/// How a drug was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMethod {
    /// Alias substring hit, confirmed by ranking
    Exact,
    /// Ranked fuzzy candidate
    Fuzzy,
}

/// A resolved lexicon entry with the evidence behind it.
#[derive(Debug, Clone)]
pub struct DrugMatch<'a> {
    pub entry: &'a DrugEntry,
    pub method: MatchMethod,
    /// Winning score; `None` when the exact hit had no scorable token
    pub score: Option<MatchScore>,
    /// Dictated token that produced the score
    pub token: Option<String>,
}

/// A lexicon entry's target tokens, tagged with their priority.
#[derive(Debug, Clone)]
struct EntryTargets {
    tokens: Vec<(String, Priority)>,
}

impl EntryTargets {
    fn build(entry: &DrugEntry) -> Self {
        let mut tokens: Vec<(String, Priority)> = Vec::new();
        let mut push = |text: &str, priority: Priority| {
            for token in tokenize(text) {
                let known = tokens.iter().any(|(t, p)| *t == token && *p == priority);
                if token.chars().count() >= MIN_TOKEN_CHARS && !known {
                    tokens.push((token, priority));
                }
            }
        };

        push(&entry.dci, Priority::Dci);
        push(&entry.key, Priority::Key);
        for alias in &entry.aliases {
            push(alias, Priority::Alias);
        }

        Self { tokens }
    }
}

/// Resolves lexicon entries from dictated segments.
pub struct DrugMatcher<'a> {
    lexicon: &'a Lexicon,
    targets: Vec<EntryTargets>,
}

impl<'a> DrugMatcher<'a> {
    /// Create a matcher over a lexicon.
    pub fn new(lexicon: &'a Lexicon) -> Self {
        let targets = lexicon.iter().map(EntryTargets::build).collect();
        Self { lexicon, targets }
    }

    /// Best lexicon entry for the segment, or `None` when the segment has no
    /// usable token and no alias hit.
    pub fn find_drug_in_segment(&self, segment: &str) -> Option<&'a DrugEntry> {
        self.resolve(segment).map(|m| m.entry)
    }

    /// Like [`find_drug_in_segment`](Self::find_drug_in_segment), with the
    /// winning score and method.
    pub fn resolve(&self, segment: &str) -> Option<DrugMatch<'a>> {
        let exact = self.find_exact(segment);
        let candidates = self.candidate_tokens(segment);
        let mut cache = PhoneticCache::new();

        let mut best: RunningBest<(usize, String)> = RunningBest::new();
        if let Some((index, alias)) = &exact {
            let mut evidence = candidates.clone();
            for word in candidate_words(alias) {
                if !evidence.contains(&word) {
                    evidence.push(word);
                }
            }
            if let Some((score, token)) = self.score_entry(*index, &evidence, &mut cache) {
                best.offer(score, (*index, token));
            }
        }
        let exact_index = exact.map(|(index, _)| index);
        let exact_score = best.score().copied();

        for token in &candidates {
            for (index, targets) in self.targets.iter().enumerate() {
                for (target, priority) in &targets.tokens {
                    let score = MatchScore::compute(&mut cache, target, token, *priority);
                    trace!(token = %token, target = %target, ?score, "candidate");
                    best.offer(score, (index, token.clone()));
                }
            }
        }

        let entries = self.lexicon.entries();
        let result = match best.into_inner() {
            Some((score, (index, token))) => {
                let method = if exact_index == Some(index) && exact_score.is_some() {
                    MatchMethod::Exact
                } else {
                    MatchMethod::Fuzzy
                };
                Some(DrugMatch {
                    entry: &entries[index],
                    method,
                    score: Some(score),
                    token: Some(token),
                })
            }
            None => exact_index.map(|index| DrugMatch {
                entry: &entries[index],
                method: MatchMethod::Exact,
                score: None,
                token: None,
            }),
        };

        if let Some(m) = &result {
            debug!(
                drug = %m.entry.key,
                method = ?m.method,
                phonetic = m.score.map(|s| s.phonetic),
                text = m.score.map(|s| s.text),
                "resolved drug"
            );
        }
        result
    }

    /// First entry (in lexicon order) owning an alias found in the segment,
    /// with that alias.
    fn find_exact(&self, segment: &str) -> Option<(usize, String)> {
        let haystack = segment.to_lowercase();
        self.lexicon.iter().enumerate().find_map(|(index, entry)| {
            entry
                .aliases_lower()
                .find(|alias| !alias.is_empty() && haystack.contains(alias.as_str()))
                .map(|alias| (index, alias))
        })
    }

    /// Glued words before and after the first dose plus the whole segment;
    /// every candidate word when there is no dose.
    fn candidate_tokens(&self, segment: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        let mut push = |token: Option<String>| {
            if let Some(token) = token {
                if !candidates.contains(&token) {
                    candidates.push(token);
                }
            }
        };

        match find_dose(segment) {
            Some(dose) => {
                let before = candidate_words(&segment[..dose.start]);
                let skip = before.len().saturating_sub(DOSE_CONTEXT_WORDS);
                push(glue(&before[skip..]));

                let after: Vec<String> = candidate_words(&segment[dose.end..])
                    .into_iter()
                    .take(DOSE_CONTEXT_WORDS)
                    .collect();
                push(glue(&after));
            }
            None => {
                for word in candidate_words(segment) {
                    push(Some(word));
                }
            }
        }

        push(glue(&candidate_words(segment)));

        candidates
    }

    /// Best score of one entry over the candidate tokens.
    fn score_entry(
        &self,
        index: usize,
        candidates: &[String],
        cache: &mut PhoneticCache,
    ) -> Option<(MatchScore, String)> {
        let targets = self.targets.get(index)?;
        let mut best = RunningBest::new();
        for token in candidates {
            for (target, priority) in &targets.tokens {
                let score = MatchScore::compute(cache, target, token, *priority);
                best.offer(score, token.clone());
            }
        }
        best.into_inner()
    }
}
