//! PPTX (PowerPoint) presentations.
//!
//! This module opens Microsoft PowerPoint presentations in the Office Open
//! XML (.pptx) format for validation.

mod document;

pub use document::PresentationDocument;
