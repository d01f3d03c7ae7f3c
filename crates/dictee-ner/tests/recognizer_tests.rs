//! Recognizers plugged into the dictation parser.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dictee_core::{DictationParser, EntityRecognizer, Lexicon};
use dictee_ner::{parse_entity_output, LlmRecognizer, PatternRecognizer};
use proptest::prelude::*;

#[test]
fn test_pattern_recognizer_in_parser() {
    let recognizer = PatternRecognizer::builtin().unwrap();
    let parser = DictationParser::with_recognizer(Lexicon::builtin(), Box::new(recognizer));

    let result = parser.parse("Vanco 1 g IVL et flagyl 500 mg per os");
    assert_eq!(result.prescriptions.len(), 2);
    assert_eq!(result.prescriptions[0].libelle.as_deref(), Some("Vancomycine"));
    assert_eq!(result.prescriptions[1].libelle.as_deref(), Some("Metronidazole"));
}

#[test]
fn test_failing_llm_does_not_break_extraction() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let recognizer = LlmRecognizer::new(move |_: &str| {
        counter.fetch_add(1, Ordering::SeqCst);
        Err(anyhow::anyhow!("model file missing"))
    });

    let parser = DictationParser::with_recognizer(Lexicon::builtin(), Box::new(recognizer));
    let result = parser.parse("ceftriaxone 1 g 3 fois par jour vvp");

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(result.prescriptions.len(), 1);
    assert_eq!(result.prescriptions[0].libelle.as_deref(), Some("Ceftriaxone"));
}

#[test]
fn test_pattern_spans_slice_the_input() {
    let recognizer = PatternRecognizer::builtin().unwrap();
    let text = "Rocéphine 2 g puis Doliprane 1 g";
    for span in recognizer.recognize(text) {
        assert_eq!(&text[span.start..span.end], span.text);
    }
}

proptest! {
    #[test]
    fn parse_entity_output_never_panics(output in "\\PC{0,64}") {
        let _ = parse_entity_output(&output);
    }

    #[test]
    fn pattern_spans_are_sorted_and_in_bounds(text in "[a-zé0-9 ,]{0,48}") {
        let recognizer = PatternRecognizer::builtin().unwrap();
        let spans = recognizer.recognize(&text);
        for pair in spans.windows(2) {
            prop_assert!(pair[0].start <= pair[1].start);
        }
        for span in spans {
            prop_assert!(span.end <= text.len());
            prop_assert_eq!(text.get(span.start..span.end), Some(span.text.as_str()));
        }
    }
}
