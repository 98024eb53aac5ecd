//! OOXML markup validation.
//!
//! The validator checks an opened document against the markup a given Office
//! version understands. It reports:
//!
//! - **Package** findings: parts without a content type, relationships whose
//!   internal target is missing.
//! - **Schema** findings: elements and attributes from namespaces the version
//!   does not declare, a wrong main root element, properties elements that are
//!   not the first child of their parent, missing required children.
//! - **Semantic** findings: relationship IDs referenced from markup that the
//!   part's relationships do not define.
//! - **MarkupCompatibility** findings: undefined prefixes in `mc:Ignorable`,
//!   `mc:MustUnderstand` or `Requires`, must-understand namespaces the version
//!   does not know, `mc:Choice` without `Requires`.
//!
//! # Example
//!
//! ```no_run
//! use ooxml_validator::validation::{OpenXmlValidator, ValidatorOptions};
//! use ooxml_validator::{open_document, FileFormatVersion};
//!
//! let doc = open_document("data.xlsx")?;
//! let options = ValidatorOptions::new(FileFormatVersion::Office2010).with_max_errors(50);
//! let findings = OpenXmlValidator::with_options(options).validate(doc.as_ref())?;
//! println!("{} findings", findings.len());
//! # Ok::<(), ooxml_validator::Error>(())
//! ```

mod error_info;
mod markup;
pub mod namespaces;
mod options;
pub mod rules;
mod validator;

pub use error_info::{ElementInfo, ErrorPath, PartInfo, ValidationErrorInfo, ValidationErrorType};
pub use options::{ValidatorOptions, DEFAULT_MAX_ERRORS};
pub use validator::OpenXmlValidator;
