//! Entity recognizer adapters for `dictee-core`.
//!
//! The core engine only knows the [`dictee_core::EntityRecognizer`]
//! capability. This crate plugs an external model into it without
//! implementing one: prompt templates for a small local instruct model, a
//! tolerant parser for its JSON output, and a deterministic pattern
//! recognizer for tests and devices without a model.

pub mod extraction;
pub mod prompts;
pub mod recognizer;

pub use extraction::*;
pub use prompts::*;
pub use recognizer::*;
