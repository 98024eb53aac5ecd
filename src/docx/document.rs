//! Word processing document adapter.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::container::OoxmlContainer;
use crate::error::Result;
use crate::kind::DocumentKind;
use crate::package::{MainPackage, OpenXmlDocument};
use crate::validation::namespaces::W_NS;
use crate::validation::rules::{FirstChildRule, MarkupRules, RequiredChildRule};

/// Range markup may open a table ahead of its properties.
const RANGE_MARKUP: &[&str] = &[
    "bookmarkStart",
    "bookmarkEnd",
    "commentRangeStart",
    "commentRangeEnd",
    "moveFromRangeStart",
    "moveFromRangeEnd",
    "moveToRangeStart",
    "moveToRangeEnd",
    "permStart",
    "permEnd",
    "customXmlInsRangeStart",
    "customXmlInsRangeEnd",
    "customXmlDelRangeStart",
    "customXmlDelRangeEnd",
    "customXmlMoveFromRangeStart",
    "customXmlMoveFromRangeEnd",
    "customXmlMoveToRangeStart",
    "customXmlMoveToRangeEnd",
];

/// Properties elements lead their containers in WordprocessingML.
pub(crate) static WORDPROCESSING_RULES: MarkupRules = MarkupRules {
    namespace: W_NS,
    first_child: &[
        FirstChildRule::new("p", "pPr"),
        FirstChildRule::new("r", "rPr"),
        FirstChildRule::new("tbl", "tblPr").after(RANGE_MARKUP),
        FirstChildRule::new("tr", "trPr").after(&["tblPrEx"]),
        FirstChildRule::new("tc", "tcPr"),
        FirstChildRule::new("sdt", "sdtPr"),
    ],
    required_children: &[
        RequiredChildRule { parent: "tbl", child: "tblPr" },
        RequiredChildRule { parent: "tbl", child: "tblGrid" },
    ],
};

/// A read-only Word document.
pub struct WordprocessingDocument {
    package: MainPackage,
}

impl WordprocessingDocument {
    /// Open a DOCX file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let package = MainPackage::open(path.as_ref(), DocumentKind::Wordprocessing)?;
        Ok(Self { package })
    }

    /// Open a DOCX package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Open a DOCX package from a reader. The document owns the reader
    /// until it is closed or dropped.
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let container = OoxmlContainer::from_reader(reader)?;
        let package = MainPackage::from_container(container, DocumentKind::Wordprocessing)?;
        Ok(Self { package })
    }

    /// Entry name of the main document part, usually `word/document.xml`.
    pub fn main_document_part(&self) -> &str {
        &self.package.main_part
    }
}

impl OpenXmlDocument for WordprocessingDocument {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Wordprocessing
    }

    fn package(&self) -> &OoxmlContainer {
        &self.package.container
    }

    fn main_part(&self) -> &str {
        &self.package.main_part
    }

    fn markup_rules(&self) -> &'static MarkupRules {
        &WORDPROCESSING_RULES
    }

    fn close(self: Box<Self>) {
        self.package.container.close();
    }
}

impl std::fmt::Debug for WordprocessingDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordprocessingDocument")
            .field("main_part", &self.package.main_part)
            .finish()
    }
}
