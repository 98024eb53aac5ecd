//! # ooxml-validator
//!
//! Validate Office Open XML documents against an Office compatibility version.
//!
//! The library takes a JSON request naming a `.docx`, `.xlsx` or `.pptx` file
//! and a version index, opens the file read-only, validates its markup and
//! returns the findings as reference-preserving JSON.
//!
//! ## Quick Start
//!
//! ```no_run
//! // The request contract: index 0..=4 selects Office 2007..Office 2019
//! let json = ooxml_validator::invoke(r#"{"fileName": "report.docx", "format": "2"}"#)?;
//! println!("{}", json);
//! # Ok::<(), ooxml_validator::Error>(())
//! ```
//!
//! ## Typed API
//!
//! ```no_run
//! use ooxml_validator::{validate_file, FileFormatVersion};
//!
//! let findings = validate_file("data.xlsx", FileFormatVersion::Office2010)?;
//! for finding in &findings {
//!     println!("[{:?}] {}: {}", finding.error_type, finding.id, finding.description);
//! }
//! # Ok::<(), ooxml_validator::Error>(())
//! ```
//!
//! ## Features
//!
//! - `docx` (default): Word document support
//! - `xlsx` (default): Excel spreadsheet support
//! - `pptx` (default): PowerPoint presentation support
//! - `async`: `invoke_async` on a Tokio blocking thread
//! - `ffi`: C-ABI bindings for foreign language integration

pub mod container;
pub mod error;
pub mod kind;
pub mod package;
pub mod render;
pub mod request;
pub mod validation;
pub mod version;

#[cfg(feature = "docx")]
pub mod docx;

#[cfg(feature = "xlsx")]
pub mod xlsx;

#[cfg(feature = "pptx")]
pub mod pptx;

#[cfg(feature = "ffi")]
pub mod ffi;

// Re-exports
pub use container::{OoxmlContainer, Relationship, Relationships};
pub use error::{Error, Result};
pub use kind::{kind_for_file_name, DocumentKind};
pub use package::OpenXmlDocument;
pub use render::{JsonFormat, JsonOptions, ReferenceHandling};
pub use request::{ResolvedRequest, ValidationRequest};
pub use validation::{
    ElementInfo, ErrorPath, OpenXmlValidator, PartInfo, ValidationErrorInfo, ValidationErrorType,
    ValidatorOptions,
};
pub use version::FileFormatVersion;

use log::debug;
use std::path::Path;

/// Handle a JSON request and return the findings as JSON.
///
/// # Example
///
/// ```no_run
/// let json = ooxml_validator::invoke(r#"{"fileName": "slides.pptx", "format": "4"}"#)?;
/// assert!(json.starts_with(r#"{"$id":"1","$values":"#));
/// # Ok::<(), ooxml_validator::Error>(())
/// ```
pub fn invoke(request_json: &str) -> Result<String> {
    let request = ValidationRequest::from_json(request_json)?;
    invoke_request(&request)
}

/// Handle a decoded request with the default output options.
pub fn invoke_request(request: &ValidationRequest) -> Result<String> {
    invoke_with_options(request, &JsonOptions::default())
}

/// Handle a decoded request with custom output options.
///
/// # Example
///
/// ```no_run
/// use ooxml_validator::{invoke_with_options, JsonOptions, ValidationRequest};
///
/// let request = ValidationRequest::new("report.docx", "1");
/// let json = invoke_with_options(&request, &JsonOptions::new().pretty())?;
/// # Ok::<(), ooxml_validator::Error>(())
/// ```
pub fn invoke_with_options(request: &ValidationRequest, options: &JsonOptions) -> Result<String> {
    let resolved = request.resolve()?;
    let findings = validate_kind(&resolved.path, resolved.kind, resolved.version)?;
    render::to_json(&findings, options)
}

/// Handle a JSON request on Tokio's blocking pool.
///
/// # Example
///
/// ```no_run
/// # async fn run() -> ooxml_validator::Result<()> {
/// let json = ooxml_validator::invoke_async(
///     r#"{"fileName": "report.docx", "format": "3"}"#.to_string(),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
#[cfg(feature = "async")]
pub async fn invoke_async(request_json: String) -> Result<String> {
    tokio::task::spawn_blocking(move || invoke(&request_json))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))?
}

/// Open a document read-only, picking the adapter from the file name.
///
/// # Example
///
/// ```no_run
/// use ooxml_validator::{open_document, OpenXmlDocument};
///
/// let doc = open_document("report.docx")?;
/// println!("{} with main part {}", doc.kind(), doc.main_part());
/// doc.close();
/// # Ok::<(), ooxml_validator::Error>(())
/// ```
pub fn open_document(path: impl AsRef<Path>) -> Result<Box<dyn OpenXmlDocument>> {
    let path = path.as_ref();
    let kind = kind_for_file_name(&path.to_string_lossy())?;
    kind.open(path)
}

/// Validate a file against a compatibility version.
///
/// The document kind comes from the file name. The file is closed before
/// this returns, on success and on error.
pub fn validate_file(
    path: impl AsRef<Path>,
    version: FileFormatVersion,
) -> Result<Vec<ValidationErrorInfo>> {
    let path = path.as_ref();
    let kind = kind_for_file_name(&path.to_string_lossy())?;
    validate_kind(path, kind, version)
}

/// Open, validate and close.
fn validate_kind(
    path: &Path,
    kind: DocumentKind,
    version: FileFormatVersion,
) -> Result<Vec<ValidationErrorInfo>> {
    let document = kind.open(path)?;
    let findings = validate_document(document, version)?;
    debug!("{}: {} findings", path.display(), findings.len());
    Ok(findings)
}

/// Validate an open document, then close it whether validation succeeded
/// or failed.
fn validate_document(
    document: Box<dyn OpenXmlDocument>,
    version: FileFormatVersion,
) -> Result<Vec<ValidationErrorInfo>> {
    let result = OpenXmlValidator::new(version).validate(document.as_ref());
    document.close();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invoke_rejects_non_object() {
        assert!(matches!(invoke("\"report.docx\""), Err(Error::InvalidRequest(_))));
    }

    #[test]
    fn test_invoke_checks_arguments_before_opening() {
        let err = invoke(r#"{"fileName": "report.pdf", "format": "1"}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));

        let err = invoke(r#"{"fileName": "nowhere/report.docx", "format": "-1"}"#).unwrap_err();
        assert!(matches!(err, Error::OutOfRange(_)));
    }

    #[test]
    fn test_open_document_unknown_extension() {
        assert!(matches!(open_document("notes.txt"), Err(Error::InvalidArgument(_))));
    }

    #[cfg(feature = "docx")]
    mod release {
        use crate::docx::WordprocessingDocument;
        use crate::{validate_document, Error, FileFormatVersion};
        use std::io::{Cursor, Read, Seek, SeekFrom, Write};
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use zip::write::SimpleFileOptions;
        use zip::ZipWriter;

        /// In-memory package that records when it is dropped.
        struct TrackedReader {
            inner: Cursor<Vec<u8>>,
            dropped: Arc<AtomicBool>,
        }

        impl TrackedReader {
            fn new(data: Vec<u8>) -> (Self, Arc<AtomicBool>) {
                let dropped = Arc::new(AtomicBool::new(false));
                let reader = Self {
                    inner: Cursor::new(data),
                    dropped: Arc::clone(&dropped),
                };
                (reader, dropped)
            }
        }

        impl Read for TrackedReader {
            fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
                self.inner.read(buf)
            }
        }

        impl Seek for TrackedReader {
            fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
                self.inner.seek(pos)
            }
        }

        impl Drop for TrackedReader {
            fn drop(&mut self) {
                self.dropped.store(true, Ordering::SeqCst);
            }
        }

        fn docx(document_xml: &str, main_content_type: &str) -> Vec<u8> {
            let mut buffer = Vec::new();
            let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
            let options = SimpleFileOptions::default();
            let entries = [
                (
                    "[Content_Types].xml",
                    format!(
                        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/word/document.xml" ContentType="{}"/></Types>"#,
                        main_content_type
                    ),
                ),
                (
                    "_rels/.rels",
                    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#.to_string(),
                ),
                ("word/document.xml", document_xml.to_string()),
            ];
            for (name, content) in entries {
                zip.start_file(name, options).unwrap();
                zip.write_all(content.as_bytes()).unwrap();
            }
            zip.finish().unwrap();
            buffer
        }

        const DOCX_MAIN: &str =
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";

        #[test]
        fn test_released_after_failed_validation() {
            let (reader, dropped) = TrackedReader::new(docx(
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>"#,
                DOCX_MAIN,
            ));
            let document = WordprocessingDocument::from_reader(reader).unwrap();
            assert!(!dropped.load(Ordering::SeqCst));

            let err = validate_document(Box::new(document), FileFormatVersion::Office2019)
                .unwrap_err();
            assert!(matches!(err, Error::XmlParse(_)));
            assert!(dropped.load(Ordering::SeqCst));
        }

        #[test]
        fn test_released_after_validation() {
            let (reader, dropped) = TrackedReader::new(docx(
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p/></w:body></w:document>"#,
                DOCX_MAIN,
            ));
            let document = WordprocessingDocument::from_reader(reader).unwrap();

            let findings = validate_document(Box::new(document), FileFormatVersion::Office2019)
                .unwrap();
            assert!(findings.is_empty());
            assert!(dropped.load(Ordering::SeqCst));
        }

        #[test]
        fn test_released_when_open_fails() {
            let (reader, dropped) = TrackedReader::new(docx(
                r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#,
                "application/xml",
            ));
            let err = WordprocessingDocument::from_reader(reader).unwrap_err();
            assert!(matches!(err, Error::InvalidPackage(_)));
            assert!(dropped.load(Ordering::SeqCst));
        }
    }
}
