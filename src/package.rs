//! The document handle seen by the validator.

use log::debug;
use std::path::Path;

use crate::container::OoxmlContainer;
use crate::error::{Error, Result};
use crate::kind::{DocumentKind, OFFICE_DOCUMENT_REL, STRICT_OFFICE_DOCUMENT_REL};
use crate::validation::rules::MarkupRules;

/// An opened, read-only OOXML document.
///
/// Implemented by [`WordprocessingDocument`](crate::docx::WordprocessingDocument),
/// [`SpreadsheetDocument`](crate::xlsx::SpreadsheetDocument) and
/// [`PresentationDocument`](crate::pptx::PresentationDocument). The package
/// is released when the handle is dropped or closed.
pub trait OpenXmlDocument {
    /// Document family.
    fn kind(&self) -> DocumentKind;

    /// The underlying package.
    fn package(&self) -> &OoxmlContainer;

    /// ZIP entry name of the main part, e.g. `word/document.xml`.
    fn main_part(&self) -> &str;

    /// Structural rules for this family's markup.
    fn markup_rules(&self) -> &'static MarkupRules;

    /// Release the package.
    fn close(self: Box<Self>);
}

/// A package whose main part has been located and checked against a kind.
pub(crate) struct MainPackage {
    pub(crate) container: OoxmlContainer,
    pub(crate) main_part: String,
}

impl MainPackage {
    /// Open a file read-only as a package of `kind`.
    pub(crate) fn open(path: &Path, kind: DocumentKind) -> Result<Self> {
        let container = OoxmlContainer::open(path)?;
        Self::from_container(container, kind)
    }

    /// Locate the main part through the package relationships and check its
    /// content type.
    pub(crate) fn from_container(container: OoxmlContainer, kind: DocumentKind) -> Result<Self> {
        let rels = container.read_package_relationships()?;
        let main_rel = rels
            .get_by_type(OFFICE_DOCUMENT_REL)
            .into_iter()
            .chain(rels.get_by_type(STRICT_OFFICE_DOCUMENT_REL))
            .find(|r| !r.external)
            .ok_or_else(|| {
                Error::InvalidPackage(format!(
                    "the package has no main part relationship; it is not a valid {}",
                    kind
                ))
            })?;

        let main_part = OoxmlContainer::resolve_path("", &main_rel.target);
        if !container.exists(&main_part) {
            return Err(Error::MissingComponent(main_part));
        }

        let content_type = container.content_type(&main_part).unwrap_or_default();
        if !kind.main_content_types().iter().any(|ct| *ct == content_type) {
            return Err(Error::InvalidPackage(format!(
                "main part '/{}' has content type '{}', which is not a {}",
                main_part, content_type, kind
            )));
        }

        debug!("opened {} with main part {}", kind, main_part);
        Ok(Self {
            container,
            main_part,
        })
    }
}
