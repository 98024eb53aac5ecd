//! Document kinds and their package conventions.

use crate::error::{Error, Result};
use crate::package::OpenXmlDocument;
use std::path::Path;

/// Extensions accepted by the request decoder.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["docx", "pptx", "xlsx"];

/// Transitional relationship type of the package's main part.
pub const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";

/// Strict relationship type of the package's main part.
pub const STRICT_OFFICE_DOCUMENT_REL: &str =
    "http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument";

const WORDPROCESSING_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml",
    "application/vnd.ms-word.document.macroEnabled.main+xml",
    "application/vnd.ms-word.template.macroEnabledTemplate.main+xml",
];

const SPREADSHEET_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.template.main+xml",
    "application/vnd.ms-excel.sheet.macroEnabled.main+xml",
    "application/vnd.ms-excel.template.macroEnabled.main+xml",
    "application/vnd.ms-excel.addin.macroEnabled.main+xml",
];

const PRESENTATION_CONTENT_TYPES: &[&str] = &[
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml",
    "application/vnd.openxmlformats-officedocument.presentationml.template.main+xml",
    "application/vnd.openxmlformats-officedocument.presentationml.slideshow.main+xml",
    "application/vnd.ms-powerpoint.presentation.macroEnabled.main+xml",
    "application/vnd.ms-powerpoint.template.macroEnabled.main+xml",
    "application/vnd.ms-powerpoint.slideshow.macroEnabled.main+xml",
];

/// The three OOXML document families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// Word processing document (.docx)
    Wordprocessing,
    /// Spreadsheet document (.xlsx)
    Spreadsheet,
    /// Presentation document (.pptx)
    Presentation,
}

impl DocumentKind {
    /// All kinds in extension lookup order.
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::Wordprocessing,
        DocumentKind::Presentation,
        DocumentKind::Spreadsheet,
    ];

    /// Look up a kind by its (case-insensitive) file extension, without the dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.extension() == ext)
    }

    /// Returns the file extension for this kind.
    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Wordprocessing => "docx",
            DocumentKind::Spreadsheet => "xlsx",
            DocumentKind::Presentation => "pptx",
        }
    }

    /// Returns a human-readable name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            DocumentKind::Wordprocessing => "Word Document",
            DocumentKind::Spreadsheet => "Excel Workbook",
            DocumentKind::Presentation => "PowerPoint Presentation",
        }
    }

    /// Content types a main part of this kind may carry.
    pub fn main_content_types(&self) -> &'static [&'static str] {
        match self {
            DocumentKind::Wordprocessing => WORDPROCESSING_CONTENT_TYPES,
            DocumentKind::Spreadsheet => SPREADSHEET_CONTENT_TYPES,
            DocumentKind::Presentation => PRESENTATION_CONTENT_TYPES,
        }
    }

    /// Local name of the main part's root element.
    pub fn main_root_element(&self) -> &'static str {
        match self {
            DocumentKind::Wordprocessing => "document",
            DocumentKind::Spreadsheet => "workbook",
            DocumentKind::Presentation => "presentation",
        }
    }

    /// Transitional and strict namespaces of the main part's root element.
    pub fn main_namespaces(&self) -> [&'static str; 2] {
        match self {
            DocumentKind::Wordprocessing => [
                "http://schemas.openxmlformats.org/wordprocessingml/2006/main",
                "http://purl.oclc.org/ooxml/wordprocessingml/main",
            ],
            DocumentKind::Spreadsheet => [
                "http://schemas.openxmlformats.org/spreadsheetml/2006/main",
                "http://purl.oclc.org/ooxml/spreadsheetml/main",
            ],
            DocumentKind::Presentation => [
                "http://schemas.openxmlformats.org/presentationml/2006/main",
                "http://purl.oclc.org/ooxml/presentationml/main",
            ],
        }
    }

    /// Open a file read-only with the adapter for this kind.
    pub fn open(&self, path: &Path) -> Result<Box<dyn OpenXmlDocument>> {
        match self {
            #[cfg(feature = "docx")]
            DocumentKind::Wordprocessing => {
                Ok(Box::new(crate::docx::WordprocessingDocument::open(path)?))
            }
            #[cfg(feature = "xlsx")]
            DocumentKind::Spreadsheet => Ok(Box::new(crate::xlsx::SpreadsheetDocument::open(path)?)),
            #[cfg(feature = "pptx")]
            DocumentKind::Presentation => {
                Ok(Box::new(crate::pptx::PresentationDocument::open(path)?))
            }
            #[cfg(not(all(feature = "docx", feature = "xlsx", feature = "pptx")))]
            _ => {
                let _ = path;
                Err(Error::UnsupportedFormat(self.extension().to_string()))
            }
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Lowercased trailing four characters of a file name.
///
/// This is the extension test the request contract uses: `report.DOCX`
/// yields `docx`, and so does a name without a dot such as `mydocx`.
pub fn trailing_extension(file_name: &str) -> String {
    let count = file_name.chars().count();
    file_name
        .chars()
        .skip(count.saturating_sub(4))
        .collect::<String>()
        .to_lowercase()
}

/// Resolve the document kind for a file name, or fail with an
/// invalid-argument error.
pub fn kind_for_file_name(file_name: &str) -> Result<DocumentKind> {
    let ext = trailing_extension(file_name);
    DocumentKind::from_extension(&ext)
        .ok_or_else(|| Error::InvalidArgument("file must be a .docx, .xlsx, or .pptx".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(DocumentKind::Wordprocessing.to_string(), "Word Document");
        assert_eq!(DocumentKind::Spreadsheet.to_string(), "Excel Workbook");
        assert_eq!(DocumentKind::Presentation.to_string(), "PowerPoint Presentation");
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(DocumentKind::from_extension("docx"), Some(DocumentKind::Wordprocessing));
        assert_eq!(DocumentKind::from_extension("XLSX"), Some(DocumentKind::Spreadsheet));
        assert_eq!(DocumentKind::from_extension("pptx"), Some(DocumentKind::Presentation));
        assert_eq!(DocumentKind::from_extension("pdf"), None);
    }

    #[test]
    fn test_trailing_extension() {
        assert_eq!(trailing_extension("report.DOCX"), "docx");
        assert_eq!(trailing_extension("/tmp/a.xlsx"), "xlsx");
        assert_eq!(trailing_extension("mydocx"), "docx");
        assert_eq!(trailing_extension("ab"), "ab");
        assert_eq!(trailing_extension("report.pdf"), ".pdf");
    }

    #[test]
    fn test_kind_for_file_name() {
        assert_eq!(
            kind_for_file_name("deck.PPTX").unwrap(),
            DocumentKind::Presentation
        );
        assert!(matches!(
            kind_for_file_name("report.pdf"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(kind_for_file_name("docx.doc"), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_main_content_types() {
        assert!(DocumentKind::Wordprocessing
            .main_content_types()
            .iter()
            .any(|ct| ct.ends_with("document.main+xml")));
        assert!(DocumentKind::Spreadsheet
            .main_content_types()
            .iter()
            .all(|ct| ct.ends_with("main+xml")));
    }
}
