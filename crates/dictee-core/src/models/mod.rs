//! Domain models for dictation extraction.

mod entity;
mod patient;
mod prescription;

pub use entity::*;
pub use patient::*;
pub use prescription::*;
