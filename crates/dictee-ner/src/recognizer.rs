//! [`EntityRecognizer`] adapters.
//!
//! - [`LlmRecognizer`]: prompt → caller-supplied completion → parsed spans
//! - [`PatternRecognizer`]: deterministic lexicon/dose spans, for tests and
//!   devices without a model

use dictee_core::patterns::find_doses;
use dictee_core::{EntityRecognizer, EntitySpan, Lexicon};
use regex::{Regex, RegexBuilder};
use tracing::{trace, warn};

use crate::extraction::{align_spans, parse_entity_output, RecognizerError, RecognizerResult};
use crate::prompts::build_full_prompt;

/// Recognizer backed by a text-completion function (e.g. a local LLM).
///
/// The completion function receives the full prompt and returns the raw
/// model output. Failures never reach the extractor: they are logged and
/// produce no spans.
pub struct LlmRecognizer<F> {
    complete: F,
    include_examples: bool,
}

impl<F> LlmRecognizer<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    pub fn new(complete: F) -> Self {
        Self {
            complete,
            include_examples: true,
        }
    }

    /// Disable few-shot examples (shorter prompt).
    pub fn without_examples(mut self) -> Self {
        self.include_examples = false;
        self
    }

    /// Run the model and parse its output, surfacing errors.
    pub fn try_recognize(&self, text: &str) -> RecognizerResult<Vec<EntitySpan>> {
        let prompt = build_full_prompt(text, self.include_examples);
        let output =
            (self.complete)(&prompt).map_err(|e| RecognizerError::Inference(e.to_string()))?;
        let spans = parse_entity_output(&output)?;
        Ok(align_spans(text, spans))
    }
}

impl<F> EntityRecognizer for LlmRecognizer<F>
where
    F: Fn(&str) -> anyhow::Result<String> + Send + Sync,
{
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        match self.try_recognize(text) {
            Ok(spans) => {
                trace!(spans = spans.len(), "llm recognizer");
                spans
            }
            Err(e) => {
                warn!(error = %e, "llm recognizer output discarded");
                Vec::new()
            }
        }
    }
}

/// Spans for lexicon aliases (`DRUG`) and doses (`DOSE`), sorted by start.
pub struct PatternRecognizer {
    aliases: Regex,
}

impl PatternRecognizer {
    /// Build from a lexicon. Longer aliases are preferred at the same start.
    pub fn new(lexicon: &Lexicon) -> RecognizerResult<Self> {
        let mut aliases: Vec<String> = lexicon
            .all_aliases()
            .filter(|a| !a.trim().is_empty())
            .collect();
        aliases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        aliases.dedup();

        let alternation = aliases
            .iter()
            .map(|a| regex::escape(a))
            .collect::<Vec<_>>()
            .join("|");
        let aliases = RegexBuilder::new(&format!(r"\b(?:{alternation})\b"))
            .case_insensitive(true)
            .build()
            .map_err(|e| RecognizerError::InvalidFormat(e.to_string()))?;

        Ok(Self { aliases })
    }

    /// Recognizer over the built-in lexicon.
    pub fn builtin() -> RecognizerResult<Self> {
        Self::new(Lexicon::builtin())
    }
}

impl EntityRecognizer for PatternRecognizer {
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        let mut spans: Vec<EntitySpan> = self
            .aliases
            .find_iter(text)
            .map(|m| EntitySpan::new("DRUG", m.start(), m.end(), m.as_str()))
            .collect();

        spans.extend(
            find_doses(text)
                .into_iter()
                .map(|d| EntitySpan::new("DOSE", d.start, d.end, &text[d.start..d.end])),
        );

        spans.sort_by_key(|s| (s.start, s.end));
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pattern_recognizer() {
        let recognizer = PatternRecognizer::builtin().unwrap();
        let spans = recognizer.recognize("4 g x2 de piperacilline tazo et vanco 1 g");

        let labels: Vec<(&str, &str)> = spans
            .iter()
            .map(|s| (s.entity_type.as_str(), s.text.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![
                ("DOSE", "4 g"),
                ("DRUG", "piperacilline tazo"),
                ("DRUG", "vanco"),
                ("DOSE", "1 g"),
            ]
        );
    }

    #[test]
    fn test_pattern_recognizer_whole_words() {
        let recognizer = PatternRecognizer::builtin().unwrap();
        // "vanco" inside "vancouver" is not a drug
        assert!(recognizer.recognize("retour a vancouver").is_empty());
    }

    #[test]
    fn test_llm_recognizer_parses_output() {
        let recognizer = LlmRecognizer::new(|prompt: &str| {
            assert!(prompt.contains("flagyl 500 mg"));
            Ok(r#"{"entities":[{"type":"DRUG","start":0,"end":6,"text":"flagyl"}]}"#.to_string())
        })
        .without_examples();

        let spans = recognizer.recognize("flagyl 500 mg");
        assert_eq!(spans, vec![EntitySpan::new("DRUG", 0, 6, "flagyl")]);
    }

    #[test]
    fn test_llm_recognizer_swallows_failures() {
        let failing = LlmRecognizer::new(|_: &str| Err(anyhow!("model not loaded")));
        assert!(matches!(
            failing.try_recognize("vanco 1 g"),
            Err(RecognizerError::Inference(_))
        ));
        assert!(failing.recognize("vanco 1 g").is_empty());

        let garbage = LlmRecognizer::new(|_: &str| Ok("je ne sais pas".to_string()));
        assert!(garbage.recognize("vanco 1 g").is_empty());
    }

    #[test]
    fn test_llm_recognizer_drops_misaligned_spans() {
        let recognizer = LlmRecognizer::new(|_: &str| {
            Ok(r#"{"entities":[{"type":"DRUG","start":2,"end":8,"text":"flagyl"}]}"#.to_string())
        });
        assert!(recognizer.recognize("flagyl 500 mg").is_empty());
    }
}
