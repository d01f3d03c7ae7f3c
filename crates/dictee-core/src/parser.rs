//! Dictation parser: the single entry point over the extractors.

use tracing::{debug, info_span};

use crate::extract::{PatientExtractor, PrescriptionExtractor};
use crate::lexicon::Lexicon;
use crate::models::DictationResult;
use crate::recognizer::{EntityRecognizer, NoopRecognizer};
use crate::resolver::{normalize, DrugMatcher};

/// Parser options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Run the patient profile extractor (default: true)
    pub extract_patient: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            extract_patient: true,
        }
    }
}

/// Normalizes a dictation and runs both extractors on it.
///
/// A parser borrows its lexicon and holds no per-call state, so one instance
/// can serve any number of calls, from any thread.
pub struct DictationParser<'a> {
    lexicon: &'a Lexicon,
    matcher: DrugMatcher<'a>,
    recognizer: Box<dyn EntityRecognizer>,
    options: ParserOptions,
}

impl<'a> DictationParser<'a> {
    /// Rule-only parser (no recognizer).
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self::with_recognizer(lexicon, Box::new(NoopRecognizer))
    }

    /// Parser consulting an external recognizer per sub-segment.
    pub fn with_recognizer(lexicon: &'a Lexicon, recognizer: Box<dyn EntityRecognizer>) -> Self {
        Self {
            lexicon,
            matcher: DrugMatcher::new(lexicon),
            recognizer,
            options: ParserOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parse raw dictation. Never fails; empty input gives an empty result.
    pub fn parse(&self, raw: &str) -> DictationResult {
        let span = info_span!("parse", chars = raw.chars().count());
        let _guard = span.enter();

        let normalized = normalize(raw);

        let prescriptions = PrescriptionExtractor::new(&self.matcher, self.recognizer.as_ref())
            .extract(&normalized);

        let patient = if self.options.extract_patient {
            PatientExtractor::new(self.lexicon).extract(raw, &normalized)
        } else {
            None
        };

        debug!(
            prescriptions = prescriptions.len(),
            patient = patient.is_some(),
            "dictation parsed"
        );

        DictationResult {
            patient,
            prescriptions,
            normalized_text: normalized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntitySpan;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_parse_empty() {
        let result = DictationParser::new(Lexicon::builtin()).parse("");
        assert!(result.prescriptions.is_empty());
        assert!(result.patient.is_none());
        assert!(result.normalized_text.is_empty());
    }

    #[test]
    fn test_parse_patient_and_prescription() {
        let result = DictationParser::new(Lexicon::builtin())
            .parse("Monsieur Paul Martin. Ordonnance: vancomycine 1 g 2 fois par jour IVSE");
        let patient = result.patient.as_ref().unwrap();
        assert_eq!(patient.display_name().as_deref(), Some("Paul Martin"));
        assert_eq!(result.prescriptions.len(), 1);
        let rx = &result.prescriptions[0];
        assert_eq!(rx.libelle.as_deref(), Some("Vancomycine"));
        assert_eq!(rx.posologie.as_deref(), Some("2x/j"));
        assert_eq!(rx.voie.as_deref(), Some("IVSE"));
    }

    #[test]
    fn test_patient_extraction_can_be_disabled() {
        let parser = DictationParser::new(Lexicon::builtin()).with_options(ParserOptions {
            extract_patient: false,
        });
        let result = parser.parse("M. Jean Dupont, prescription ceftriaxone 1g");
        assert!(result.patient.is_none());
        assert_eq!(result.prescriptions.len(), 1);
    }

    #[test]
    fn test_recognizer_is_consulted_per_segment() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let recognizer = move |_: &str| -> Vec<EntitySpan> {
            counter.fetch_add(1, Ordering::SeqCst);
            vec![EntitySpan::new("DRUG", 0, 3, "xyz")]
        };

        let parser = DictationParser::with_recognizer(Lexicon::builtin(), Box::new(recognizer));
        let result = parser.parse("ceftriaxone 1 g et amikacine 1 g");

        assert_eq!(calls.load(Ordering::SeqCst), 2);
        // Spans are not merged into the records
        assert_eq!(result.prescriptions[0].libelle.as_deref(), Some("Ceftriaxone"));
    }

    #[test]
    fn test_result_json_uses_nulls() {
        let result = DictationParser::new(Lexicon::builtin()).parse("1 g x2");
        let json = result.to_json().unwrap();
        assert!(json.contains("\"libelle\": null"));
        assert!(json.contains("\"segment_source\": \"1 g x2\""));
        assert!(json.contains("\"patient\": null"));
    }
}
