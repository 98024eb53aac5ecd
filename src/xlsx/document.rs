//! Spreadsheet document adapter.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::container::OoxmlContainer;
use crate::error::Result;
use crate::kind::DocumentKind;
use crate::package::{MainPackage, OpenXmlDocument};
use crate::validation::namespaces::X_NS;
use crate::validation::rules::{FirstChildRule, MarkupRules, RequiredChildRule};

const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";

pub(crate) static SPREADSHEET_RULES: MarkupRules = MarkupRules {
    namespace: X_NS,
    first_child: &[
        FirstChildRule::new("worksheet", "sheetPr"),
        FirstChildRule::new("workbook", "fileVersion"),
    ],
    required_children: &[
        RequiredChildRule { parent: "workbook", child: "sheets" },
        RequiredChildRule { parent: "worksheet", child: "sheetData" },
    ],
};

/// A read-only Excel workbook.
pub struct SpreadsheetDocument {
    package: MainPackage,
}

impl SpreadsheetDocument {
    /// Open an XLSX file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let package = MainPackage::open(path.as_ref(), DocumentKind::Spreadsheet)?;
        Ok(Self { package })
    }

    /// Open an XLSX package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Open a XLSX package from a reader. The document owns the reader
    /// until it is closed or dropped.
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let container = OoxmlContainer::from_reader(reader)?;
        let package = MainPackage::from_container(container, DocumentKind::Spreadsheet)?;
        Ok(Self { package })
    }

    /// Entry name of the workbook part, usually `xl/workbook.xml`.
    pub fn workbook_part(&self) -> &str {
        &self.package.main_part
    }

    /// Entry names of the worksheets the workbook relates to, in
    /// relationship order.
    pub fn worksheet_parts(&self) -> Result<Vec<String>> {
        let workbook = &self.package.main_part;
        let rels = self.package.container.read_relationships(workbook)?;
        Ok(rels
            .iter()
            .filter(|r| r.rel_type == WORKSHEET_REL && !r.external)
            .map(|r| OoxmlContainer::resolve_path(workbook, &r.target))
            .collect())
    }
}

impl OpenXmlDocument for SpreadsheetDocument {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Spreadsheet
    }

    fn package(&self) -> &OoxmlContainer {
        &self.package.container
    }

    fn main_part(&self) -> &str {
        &self.package.main_part
    }

    fn markup_rules(&self) -> &'static MarkupRules {
        &SPREADSHEET_RULES
    }

    fn close(self: Box<Self>) {
        self.package.container.close();
    }
}

impl std::fmt::Debug for SpreadsheetDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpreadsheetDocument")
            .field("workbook_part", &self.package.main_part)
            .finish()
    }
}
