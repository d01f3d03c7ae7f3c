//! Entity span extraction from LLM output.

use dictee_core::EntitySpan;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Recognizer errors.
#[derive(Error, Debug)]
pub enum RecognizerError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid response format: {0}")]
    InvalidFormat(String),

    #[error("LLM inference error: {0}")]
    Inference(String),
}

pub type RecognizerResult<T> = Result<T, RecognizerError>;

/// Raw NER output from the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerOutput {
    pub entities: Vec<EntitySpan>,
}

/// Parse LLM output into spans.
///
/// The model may wrap the JSON object in prose; only the outermost braces
/// are parsed. Spans with `end < start` are rejected.
pub fn parse_entity_output(output: &str) -> RecognizerResult<Vec<EntitySpan>> {
    // Try to find JSON in the response (in case the LLM adds extra text)
    let json_start = output.find('{').ok_or_else(|| {
        RecognizerError::InvalidFormat("No JSON object found in response".into())
    })?;
    let json_end = output.rfind('}').ok_or_else(|| {
        RecognizerError::InvalidFormat("No closing brace found in response".into())
    })?;
    if json_end < json_start {
        return Err(RecognizerError::InvalidFormat("Unbalanced braces in response".into()));
    }

    let parsed: NerOutput = serde_json::from_str(&output[json_start..=json_end])?;

    if let Some(bad) = parsed.entities.iter().find(|e| e.end < e.start) {
        return Err(RecognizerError::InvalidFormat(format!(
            "Span {}..{} is reversed",
            bad.start, bad.end
        )));
    }

    Ok(parsed.entities)
}

/// Keep only spans whose offsets fall on character boundaries of `text`
/// and whose text matches the slice. Models often miscount offsets.
pub fn align_spans(text: &str, spans: Vec<EntitySpan>) -> Vec<EntitySpan> {
    spans
        .into_iter()
        .filter(|span| text.get(span.start..span.end) == Some(span.text.as_str()))
        .collect()
}
