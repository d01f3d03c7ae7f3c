//! Dictée Core Library
//!
//! Offline, deterministic extraction of prescriptions and patient identity
//! from French medical dictation.
//!
//! # Architecture
//!
//! ```text
//! Audio → Transcription (external) → raw text
//!                                       │
//!                                  Normalizer
//!                                       │
//!                   ┌───────────────────┴───────────────────┐
//!                   ▼                                       ▼
//!        Prescription Extractor                    Patient Extractor
//!     blocks → splitter → sub-segments               preamble → name,
//!     notes │ drug matcher │ dose │ route           civility, contacts
//!           │ duration │ posology                           │
//!                   │                                       │
//!                   └───────────────────┬───────────────────┘
//!                                       ▼
//!                      { patient, prescriptions } (JSON)
//! ```
//!
//! # Core Principle
//!
//! **Extraction never fails.** Every pass degrades to empty fields; a dosage
//! event always yields a prescription that keeps its source segment.
//!
//! # Modules
//!
//! - [`lexicon`]: Curated drug table (canonical key, DCI, aliases)
//! - [`models`]: Output types (Prescription, PatientProfile, EntitySpan)
//! - [`resolver`]: Normalizer, phonetic encoder, similarity ranker, drug matcher
//! - [`extract`]: Segment splitter, field passes, prescription and patient extractors
//! - [`recognizer`]: Optional external entity recognizer capability

pub mod extract;
pub mod lexicon;
pub mod models;
pub mod parser;
pub mod patterns;
pub mod recognizer;
pub mod resolver;

// Re-export commonly used types
pub use extract::{split_multi_drug_segment, PatientExtractor, PrescriptionExtractor};
pub use lexicon::{DrugEntry, Lexicon, LexiconError, LexiconResult};
pub use models::{DictationResult, EntitySpan, Gender, PatientProfile, Prescription};
pub use parser::{DictationParser, ParserOptions};
pub use recognizer::{EntityRecognizer, NoopRecognizer};
pub use resolver::{normalize, phonetic_codes, DrugMatcher, Normalizer};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DicteeError {
    #[error("Lexicon error: {0}")]
    LexiconError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<LexiconError> for DicteeError {
    fn from(e: LexiconError) -> Self {
        DicteeError::LexiconError(e.to_string())
    }
}

impl From<serde_json::Error> for DicteeError {
    fn from(e: serde_json::Error) -> Self {
        DicteeError::SerializationError(e.to_string())
    }
}

// =========================================================================
// Main API Object
// =========================================================================

/// Extraction engine for FFI callers. Owns its lexicon.
#[derive(uniffi::Object)]
pub struct DictationEngine {
    lexicon: Lexicon,
}

#[uniffi::export]
impl DictationEngine {
    /// Engine over the built-in lexicon.
    #[uniffi::constructor]
    pub fn builtin() -> Arc<Self> {
        Arc::new(Self {
            lexicon: Lexicon::builtin().clone(),
        })
    }

    /// Engine over a custom lexicon (JSON array of `{key, dci, aliases}`).
    #[uniffi::constructor]
    pub fn from_lexicon_json(json: String) -> Result<Arc<Self>, DicteeError> {
        let lexicon = Lexicon::from_json(&json)?;
        Ok(Arc::new(Self { lexicon }))
    }

    /// Canonicalize raw dictation text.
    pub fn normalize(&self, raw: String) -> String {
        normalize(&raw)
    }

    /// Extract prescriptions and the patient profile.
    pub fn parse(&self, raw: String) -> FfiDictation {
        DictationParser::new(&self.lexicon).parse(&raw).into()
    }

    /// Same as [`parse`](Self::parse), serialized to the JSON output schema.
    pub fn parse_json(&self, raw: String) -> Result<String, DicteeError> {
        let result = DictationParser::new(&self.lexicon).parse(&raw);
        Ok(result.to_json()?)
    }

    /// Number of drugs known to the engine.
    pub fn lexicon_size(&self) -> u32 {
        u32::try_from(self.lexicon.len()).unwrap_or(u32::MAX)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe prescription.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPrescription {
    pub libelle: Option<String>,
    pub dci: Option<String>,
    pub dosage: Option<String>,
    pub posologie: Option<String>,
    pub voie: Option<String>,
    pub dispositif: Option<String>,
    pub forme: Option<String>,
    pub duree: Option<String>,
    pub notes: Option<String>,
    pub segment_source: String,
    pub segment_source_phonetic: String,
}

impl From<Prescription> for FfiPrescription {
    fn from(p: Prescription) -> Self {
        Self {
            libelle: p.libelle,
            dci: p.dci,
            dosage: p.dosage,
            posologie: p.posologie,
            voie: p.voie,
            dispositif: p.dispositif,
            forme: p.forme,
            duree: p.duree,
            notes: p.notes,
            segment_source: p.segment_source,
            segment_source_phonetic: p.segment_source_phonetic,
        }
    }
}

/// FFI-safe patient profile. Gender is its lowercase label.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientProfile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub civility: Option<String>,
    pub city: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source_text: Option<String>,
}

impl From<PatientProfile> for FfiPatientProfile {
    fn from(p: PatientProfile) -> Self {
        Self {
            first_name: p.first_name,
            last_name: p.last_name,
            gender: p.gender.map(|g| g.as_str().to_string()),
            civility: p.civility,
            city: p.city,
            email: p.email,
            phone: p.phone,
            source_text: p.source_text,
        }
    }
}

/// FFI-safe extraction result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDictation {
    pub patient: Option<FfiPatientProfile>,
    pub prescriptions: Vec<FfiPrescription>,
    pub normalized_text: String,
}

impl From<DictationResult> for FfiDictation {
    fn from(result: DictationResult) -> Self {
        Self {
            patient: result.patient.map(|p| p.into()),
            prescriptions: result.prescriptions.into_iter().map(|p| p.into()).collect(),
            normalized_text: result.normalized_text,
        }
    }
}
