//! Error types for the ooxml-validator library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ooxml-validator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling a validation request.
///
/// Request errors (`OutOfRange`, `NullArgument`, `InvalidArgument`,
/// `NotFound`) are raised before the document is opened. Everything else
/// comes from opening, reading or validating the package and is passed
/// through unchanged.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested format version is outside the supported range.
    #[error("Specified argument was out of the range of valid values: {0}")]
    OutOfRange(String),

    /// A required request argument is missing or null.
    #[error("Value cannot be null (parameter '{0}')")]
    NullArgument(&'static str),

    /// A request argument is present but not acceptable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested file does not exist.
    #[error("Could not find file '{}'", .0.display())]
    NotFound(PathBuf),

    /// The request payload is not a JSON object, or lacks `format`.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The document kind was compiled out of this build.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error reading ZIP archive.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// Error parsing XML content.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// The package structure does not describe a document of the expected kind.
    #[error("Invalid package: {0}")]
    InvalidPackage(String),

    /// A required package component is missing.
    #[error("Missing component: {0}")]
    MissingComponent(String),

    /// Error while writing the findings as JSON.
    #[error("JSON serialization error: {0}")]
    Serialization(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<roxmltree::Error> for Error {
    fn from(err: roxmltree::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
