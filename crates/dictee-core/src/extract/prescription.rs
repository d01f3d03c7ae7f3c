//! Prescription extraction: blocks → sub-segments → records.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use crate::models::Prescription;
use crate::patterns::{compile, find_dose};
use crate::recognizer::EntityRecognizer;
use crate::resolver::{phonetic_projection, DrugMatcher};

use super::fields::{extract_notes, find_duration, find_route};
use super::splitter::split_multi_drug_segment;

static BLANK_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"\n[^\S\n]*\n"));

/// Words that dangle at the end of a posology cut before the route.
const TRAILING_PREPOSITIONS: &[&str] = &["en", "sur", "via", "par", "de", "dans"];

/// Builds prescription records from normalized text.
pub struct PrescriptionExtractor<'a> {
    matcher: &'a DrugMatcher<'a>,
    recognizer: &'a dyn EntityRecognizer,
}

impl<'a> PrescriptionExtractor<'a> {
    pub fn new(matcher: &'a DrugMatcher<'a>, recognizer: &'a dyn EntityRecognizer) -> Self {
        Self { matcher, recognizer }
    }

    /// One record per non-empty sub-segment, in text order.
    pub fn extract(&self, normalized: &str) -> Vec<Prescription> {
        let mut prescriptions = Vec::new();

        for block in BLANK_LINE.split(normalized) {
            let block = block.trim();
            if block.is_empty() {
                continue;
            }
            for segment in split_multi_drug_segment(block) {
                let segment = segment.trim();
                if segment.is_empty() {
                    continue;
                }
                prescriptions.push(self.extract_segment(segment));
            }
        }

        debug!(count = prescriptions.len(), "extracted prescriptions");
        prescriptions
    }

    /// Build the record for one sub-segment.
    pub fn extract_segment(&self, segment: &str) -> Prescription {
        let mut prescription = Prescription::from_segment(segment, phonetic_projection(segment));

        let (notes, working) = extract_notes(segment);
        prescription.notes = notes;

        if let Some(entry) = self.matcher.find_drug_in_segment(&working) {
            prescription.libelle = Some(entry.key.clone());
            prescription.dci = Some(entry.dci.clone());
        }

        let dose = find_dose(&working);
        let route = find_route(&working);
        prescription.dosage = dose.as_ref().map(|d| d.label());
        prescription.duree = find_duration(&working);

        if let Some(dose) = &dose {
            let end = route
                .as_ref()
                .map(|r| r.start)
                .filter(|start| *start >= dose.end)
                .unwrap_or(working.len());
            prescription.posologie = clean_posology(&working[dose.end..end]);
        }

        if let Some(route) = route {
            prescription.voie = Some(route.route);
            prescription.dispositif = route.device;
        }

        let spans = self.recognizer.recognize(&working);
        trace!(spans = spans.len(), "recognizer consulted");

        debug!(
            drug = prescription.libelle.as_deref().unwrap_or("-"),
            dosage = prescription.dosage.as_deref().unwrap_or("-"),
            route = prescription.voie.as_deref().unwrap_or("-"),
            "segment extracted"
        );
        prescription
    }
}

/// Trim separators on the left and dangling prepositions on the right.
fn clean_posology(text: &str) -> Option<String> {
    let mut text = text
        .trim()
        .trim_start_matches(|c: char| {
            c == ',' || c == ';' || c == ':' || c == '.' || c.is_whitespace()
        })
        .trim_end_matches(|c: char| c == ',' || c == ';' || c.is_whitespace());

    while let Some((head, last)) = text.rsplit_once(' ') {
        if !TRAILING_PREPOSITIONS.contains(&last) {
            break;
        }
        text = head.trim_end();
    }
    if TRAILING_PREPOSITIONS.contains(&text) {
        text = "";
    }

    (!text.is_empty()).then(|| text.to_string())
}
