//! Prescription records and the combined extraction output.

use serde::{Deserialize, Serialize};

use super::patient::PatientProfile;

/// One treatment extracted from a dictation sub-segment.
///
/// Every field except `segment_source` may be unresolved. A produced record
/// always keeps its originating sub-segment verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Prescription {
    /// Canonical lexicon key (display name)
    pub libelle: Option<String>,
    /// Generic name (DCI)
    pub dci: Option<String>,
    /// Dose with unit, e.g. "1 g"
    pub dosage: Option<String>,
    /// Free-text frequency/timing between the dose and the route
    pub posologie: Option<String>,
    /// Administration route label (PO, IV, SC, ...)
    pub voie: Option<String>,
    /// Access device (VVP, PAC, PICC, ...)
    pub dispositif: Option<String>,
    /// Galenic form. Not extracted yet, always null.
    pub forme: Option<String>,
    /// Duration normalized to "<N>j"
    pub duree: Option<String>,
    /// Parenthesized and/or `notes:` clauses
    pub notes: Option<String>,
    /// Raw sub-segment this record was built from
    pub segment_source: String,
    /// Phonetic projection of `segment_source` (audit only)
    pub segment_source_phonetic: String,
}

impl Prescription {
    /// Create an empty record bound to its source sub-segment.
    pub fn from_segment(segment: impl Into<String>, phonetic: impl Into<String>) -> Self {
        Self {
            segment_source: segment.into(),
            segment_source_phonetic: phonetic.into(),
            ..Default::default()
        }
    }

    /// Whether a lexicon entry was resolved for this record.
    pub fn is_resolved(&self) -> bool {
        self.libelle.is_some()
    }
}

/// Full output of one extraction call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DictationResult {
    /// Patient identity, if a preamble named one
    pub patient: Option<PatientProfile>,
    /// Prescriptions in dictation order
    pub prescriptions: Vec<Prescription>,
    /// Normalized text the extractors ran on
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub normalized_text: String,
}

impl DictationResult {
    /// Serialize to the output schema (pretty JSON, absent values as null).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Number of prescriptions with a resolved drug.
    pub fn resolved_count(&self) -> usize {
        self.prescriptions.iter().filter(|p| p.is_resolved()).count()
    }
}
