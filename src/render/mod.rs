//! Output rendering for validation findings.
//!
//! Findings are written as JSON. By default the writer preserves object
//! identity: every object gets a `$id`, the top-level array is wrapped as
//! `{"$id": "1", "$values": [...]}`, and a part or element record that is
//! shared by several findings is written once and referenced afterwards as
//! `{"$ref": "<id>"}`.
//!
//! # Example
//!
//! ```no_run
//! use ooxml_validator::render::{to_json, JsonFormat, JsonOptions};
//! use ooxml_validator::{validate_file, FileFormatVersion};
//!
//! let findings = validate_file("report.docx", FileFormatVersion::Office2016)?;
//!
//! // Reference-preserving, compact
//! let json = to_json(&findings, &JsonOptions::default())?;
//!
//! // Plain arrays, pretty-printed
//! let options = JsonOptions::new().plain().with_format(JsonFormat::Pretty);
//! let readable = to_json(&findings, &options)?;
//! # Ok::<(), ooxml_validator::Error>(())
//! ```

mod json;
mod options;

pub use json::{to_json, to_json_default};
pub use options::{JsonFormat, JsonOptions, ReferenceHandling};
