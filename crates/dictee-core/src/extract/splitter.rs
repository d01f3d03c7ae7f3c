//! Split a block holding several doses into one sub-segment per treatment.

use crate::patterns::{find_connectors, find_doses};

/// One sub-segment per dose occurrence.
///
/// With zero or one dose the segment is returned unchanged. Otherwise each
/// dose is widened to the connectors (`et`, `puis`, `plus`, `,`, `;`) that
/// separate it from its neighbours, falling back to the neighbouring dose
/// boundaries when no connector sits in between.
pub fn split_multi_drug_segment(segment: &str) -> Vec<String> {
    let doses = find_doses(segment);
    if doses.len() <= 1 {
        return vec![segment.to_string()];
    }

    let connectors = find_connectors(segment);
    let mut parts: Vec<String> = Vec::with_capacity(doses.len());

    for (i, dose) in doses.iter().enumerate() {
        let previous_end = if i == 0 { 0 } else { doses[i - 1].end };
        let next_start = doses.get(i + 1).map(|d| d.start).unwrap_or(segment.len());

        let left = connectors
            .iter()
            .filter(|c| c.start >= previous_end && c.end <= dose.start)
            .last()
            .map(|c| c.end)
            .unwrap_or(previous_end);

        let right = connectors
            .iter()
            .find(|c| c.start >= dose.end && c.end <= next_start)
            .map(|c| c.start)
            .unwrap_or(next_start);

        let part = segment[left..right].trim();
        if !part.is_empty() && !parts.iter().any(|p| p == part) {
            parts.push(part.to_string());
        }
    }

    parts
}
