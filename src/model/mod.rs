//! Extraction result model.
//!
//! Everything here is built once per extraction and never mutated
//! afterwards; renderers only read from it.

mod document;

pub use document::*;
