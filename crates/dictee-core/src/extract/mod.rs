//! Extractors built on the resolver primitives.
//!
//! - [`PrescriptionExtractor`]: blocks → sub-segments → [`Prescription`](crate::models::Prescription)
//! - [`PatientExtractor`]: preamble → [`PatientProfile`](crate::models::PatientProfile)
//! - Field passes: route/device, duration, notes

mod fields;
mod patient;
mod prescription;
mod splitter;

pub use fields::{
    extract_notes, find_duration, find_route, take_labeled_note, take_parenthesized_note,
    RouteMatch, NOTES_SEPARATOR,
};
pub use patient::PatientExtractor;
pub use prescription::PrescriptionExtractor;
pub use splitter::split_multi_drug_segment;
