//! DOCX (Word) documents.
//!
//! This module opens Microsoft Word documents in the Office Open XML
//! (.docx) format for validation.
//!
//! # Example
//!
//! ```no_run
//! use ooxml_validator::docx::WordprocessingDocument;
//! use ooxml_validator::{FileFormatVersion, OpenXmlValidator};
//!
//! let doc = WordprocessingDocument::open("report.docx")?;
//! println!("Main part: {}", doc.main_document_part());
//!
//! let findings = OpenXmlValidator::new(FileFormatVersion::Office2013).validate(&doc)?;
//! # Ok::<(), ooxml_validator::Error>(())
//! ```

mod document;

pub use document::WordprocessingDocument;
