//! Entity recognizer capability.
//!
//! The rule-based extractors never depend on a concrete recognizer. An
//! implementation (for example an on-device LLM adapter) is injected through
//! [`crate::DictationParser::with_recognizer`]; the default produces nothing.

use crate::models::EntitySpan;

/// Finds entity spans in a piece of text.
///
/// Implementations must not fail: a recognizer that cannot run returns an
/// empty list.
pub trait EntityRecognizer: Send + Sync {
    fn recognize(&self, text: &str) -> Vec<EntitySpan>;
}

/// Recognizer that never finds anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecognizer;

impl EntityRecognizer for NoopRecognizer {
    fn recognize(&self, _text: &str) -> Vec<EntitySpan> {
        Vec::new()
    }
}

impl<F> EntityRecognizer for F
where
    F: Fn(&str) -> Vec<EntitySpan> + Send + Sync,
{
    fn recognize(&self, text: &str) -> Vec<EntitySpan> {
        self(text)
    }
}
