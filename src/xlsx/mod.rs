//! XLSX (Excel) workbooks.
//!
//! This module opens Microsoft Excel workbooks in the Office Open XML
//! (.xlsx) format for validation.
//!
//! # Example
//!
//! ```no_run
//! use ooxml_validator::xlsx::SpreadsheetDocument;
//!
//! let workbook = SpreadsheetDocument::open("data.xlsx")?;
//! for sheet in workbook.worksheet_parts()? {
//!     println!("Sheet part: {}", sheet);
//! }
//! # Ok::<(), ooxml_validator::Error>(())
//! ```

mod document;

pub use document::SpreadsheetDocument;
