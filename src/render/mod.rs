//! Output rendering for extracted documents.
//!
//! # Example
//!
//! ```no_run
//! use docx2txt::{process_file, render::*, ExtractOptions};
//!
//! let doc = process_file("document.docx", &ExtractOptions::default())?;
//!
//! let text = to_text(&doc);
//! let details = to_details(&doc);
//! let json = to_json(&doc, JsonFormat::Pretty)?;
//! # Ok::<(), docx2txt::Error>(())
//! ```

mod json;
mod text;

pub use json::{to_json, JsonFormat};
pub use text::{to_details, to_text};
