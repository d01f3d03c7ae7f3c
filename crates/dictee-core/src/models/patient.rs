//! Patient profile models.

use serde::{Deserialize, Serialize};

/// Gender derived from the civility token. Never asserted by the engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Unknown,
}

impl Gender {
    /// Derive gender from a civility token (`M.`, `Mme`, `Mademoiselle`, ...).
    ///
    /// Matching is case-insensitive. Feminine forms are checked first since
    /// every civility starts with `m`.
    pub fn from_civility(civility: Option<&str>) -> Self {
        let Some(token) = civility else {
            return Gender::Unknown;
        };
        let lower = token.trim().to_lowercase();

        if lower.starts_with("mme")
            || lower.starts_with("mad")
            || lower.starts_with("mlle")
            || lower.starts_with("melle")
        {
            Gender::Female
        } else if lower.starts_with('m') {
            Gender::Male
        } else {
            Gender::Unknown
        }
    }

    /// Lowercase label used in the output schema.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unknown => "unknown",
        }
    }
}

/// Patient identity found in the preamble of a dictation.
///
/// At most one profile is produced per input; absence is a valid outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientProfile {
    /// First name, as cased in the raw dictation when recoverable
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Derived from the civility token
    pub gender: Option<Gender>,
    /// Civility token as dictated (e.g., "M.", "Mme")
    pub civility: Option<String>,
    /// City from a `ville:` / `city:` / `commune:` label
    pub city: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Phone number reduced to digits (and a leading `+`)
    pub phone: Option<String>,
    /// Sentence the name was found in
    pub source_text: Option<String>,
}

impl PatientProfile {
    /// Display name ("First Last"), if any part is known.
    pub fn display_name(&self) -> Option<String> {
        let parts: Vec<&str> = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }
}
