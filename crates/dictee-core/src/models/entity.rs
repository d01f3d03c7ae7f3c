//! Entity spans produced by an optional external recognizer.

use serde::{Deserialize, Serialize};

/// A typed span over the text handed to a recognizer.
///
/// Offsets are byte offsets into that text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntitySpan {
    /// Entity label, e.g. "DRUG", "DOSE", "ROUTE"
    #[serde(rename = "type")]
    pub entity_type: String,
    pub start: usize,
    pub end: usize,
    pub text: String,
}

impl EntitySpan {
    pub fn new(
        entity_type: impl Into<String>,
        start: usize,
        end: usize,
        text: impl Into<String>,
    ) -> Self {
        Self {
            entity_type: entity_type.into(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Span length in bytes.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_field_name() {
        let span = EntitySpan::new("DRUG", 0, 11, "ceftriaxone");
        let json = serde_json::to_string(&span).unwrap();
        assert!(json.contains("\"type\":\"DRUG\""));
        assert_eq!(span.len(), 11);
        assert!(!span.is_empty());
    }
}
