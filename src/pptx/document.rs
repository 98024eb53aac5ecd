//! Presentation document adapter.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::container::OoxmlContainer;
use crate::error::Result;
use crate::kind::DocumentKind;
use crate::package::{MainPackage, OpenXmlDocument};
use crate::validation::namespaces::P_NS;
use crate::validation::rules::{FirstChildRule, MarkupRules, RequiredChildRule};

const SLIDE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

pub(crate) static PRESENTATION_RULES: MarkupRules = MarkupRules {
    namespace: P_NS,
    first_child: &[
        FirstChildRule::new("sld", "cSld"),
        FirstChildRule::new("sldLayout", "cSld"),
        FirstChildRule::new("sldMaster", "cSld"),
    ],
    required_children: &[
        RequiredChildRule { parent: "presentation", child: "notesSz" },
        RequiredChildRule { parent: "sld", child: "cSld" },
        RequiredChildRule { parent: "cSld", child: "spTree" },
    ],
};

/// A read-only PowerPoint presentation.
pub struct PresentationDocument {
    package: MainPackage,
}

impl PresentationDocument {
    /// Open a PPTX file read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let package = MainPackage::open(path.as_ref(), DocumentKind::Presentation)?;
        Ok(Self { package })
    }

    /// Open a PPTX package held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Open a PPTX package from a reader. The document owns the reader
    /// until it is closed or dropped.
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let container = OoxmlContainer::from_reader(reader)?;
        let package = MainPackage::from_container(container, DocumentKind::Presentation)?;
        Ok(Self { package })
    }

    /// Entry name of the presentation part, usually `ppt/presentation.xml`.
    pub fn presentation_part(&self) -> &str {
        &self.package.main_part
    }

    /// Entry names of the slides, in relationship order.
    pub fn slide_parts(&self) -> Result<Vec<String>> {
        let presentation = &self.package.main_part;
        let rels = self.package.container.read_relationships(presentation)?;
        Ok(rels
            .iter()
            .filter(|r| r.rel_type == SLIDE_REL && !r.external)
            .map(|r| OoxmlContainer::resolve_path(presentation, &r.target))
            .collect())
    }
}

impl OpenXmlDocument for PresentationDocument {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Presentation
    }

    fn package(&self) -> &OoxmlContainer {
        &self.package.container
    }

    fn main_part(&self) -> &str {
        &self.package.main_part
    }

    fn markup_rules(&self) -> &'static MarkupRules {
        &PRESENTATION_RULES
    }

    fn close(self: Box<Self>) {
        self.package.container.close();
    }
}

impl std::fmt::Debug for PresentationDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationDocument")
            .field("presentation_part", &self.package.main_part)
            .finish()
    }
}
