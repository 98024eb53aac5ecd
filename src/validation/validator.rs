//! The validator entry point.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace, warn};

use super::error_info::{PartInfo, ValidationErrorInfo, ValidationErrorType};
use super::markup::PartChecker;
use super::options::ValidatorOptions;
use crate::container::{OoxmlContainer, CONTENT_TYPES_PART, PACKAGE_RELS_PART};
use crate::error::{Error, Result};
use crate::package::OpenXmlDocument;
use crate::version::FileFormatVersion;

/// Relationship content type, used to exclude .rels parts from markup checks.
const RELATIONSHIPS_CONTENT_TYPE: &str = "application/vnd.openxmlformats-package.relationships+xml";

/// Ordered findings with an optional cap.
#[derive(Debug, Default)]
pub(crate) struct Findings {
    items: Vec<ValidationErrorInfo>,
    limit: usize,
    dropped: usize,
}

impl Findings {
    /// `limit == 0` means unlimited.
    pub(crate) fn new(limit: usize) -> Self {
        Self {
            items: Vec::new(),
            limit,
            dropped: 0,
        }
    }

    pub(crate) fn push(&mut self, info: ValidationErrorInfo) {
        if self.is_full() {
            self.dropped += 1;
        } else {
            self.items.push(info);
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.limit != 0 && self.items.len() >= self.limit
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    pub(crate) fn into_vec(self) -> Vec<ValidationErrorInfo> {
        self.items
    }
}

/// One shared record per part.
#[derive(Default)]
struct PartTable {
    parts: HashMap<String, Arc<PartInfo>>,
}

impl PartTable {
    fn get(&mut self, package: &OoxmlContainer, name: &str) -> Arc<PartInfo> {
        let entry = self.parts.entry(name.to_string()).or_insert_with(|| {
            Arc::new(PartInfo::new(name, package.content_type(name)))
        });
        Arc::clone(entry)
    }
}

/// Validates an opened document against one compatibility version.
///
/// # Example
///
/// ```no_run
/// use ooxml_validator::{FileFormatVersion, OpenXmlValidator};
/// use ooxml_validator::docx::WordprocessingDocument;
///
/// let doc = WordprocessingDocument::open("report.docx")?;
/// let findings = OpenXmlValidator::new(FileFormatVersion::Office2016).validate(&doc)?;
/// for finding in &findings {
///     println!("{}: {}", finding.id, finding.description);
/// }
/// # Ok::<(), ooxml_validator::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct OpenXmlValidator {
    options: ValidatorOptions,
}

impl Default for OpenXmlValidator {
    fn default() -> Self {
        Self::with_options(ValidatorOptions::default())
    }
}

impl OpenXmlValidator {
    /// Create a validator for a compatibility version.
    pub fn new(version: FileFormatVersion) -> Self {
        Self::with_options(ValidatorOptions::new(version))
    }

    /// Create a validator from options.
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self { options }
    }

    /// The configured options.
    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// The configured compatibility version.
    pub fn version(&self) -> FileFormatVersion {
        self.options.version
    }

    /// Validate a document and return its findings in detection order:
    /// package findings first, then markup findings with the main part ahead
    /// of the other parts.
    ///
    /// Read failures and malformed XML are returned as errors, not findings.
    pub fn validate<D: OpenXmlDocument + ?Sized>(&self, document: &D) -> Result<Vec<ValidationErrorInfo>> {
        let package = document.package();
        let mut findings = Findings::new(self.options.max_errors);
        let mut parts = PartTable::default();

        debug!(
            "validating {} against {}",
            document.kind(),
            self.options.version
        );

        self.check_content_types(package, &mut parts, &mut findings);
        self.check_relationships(package, &mut parts, &mut findings)?;

        for name in markup_parts(document) {
            if findings.is_full() {
                break;
            }
            self.check_markup(document, &name, &mut parts, &mut findings)?;
        }

        if findings.dropped > 0 {
            warn!(
                "stopped after {} findings; {} more were not reported",
                findings.len(),
                findings.dropped
            );
        }
        debug!("{} findings", findings.len());

        Ok(findings.into_vec())
    }

    fn check_content_types(
        &self,
        package: &OoxmlContainer,
        parts: &mut PartTable,
        findings: &mut Findings,
    ) {
        for name in package.list_parts() {
            if name == CONTENT_TYPES_PART || package.content_type(name).is_some() {
                continue;
            }
            let part = parts.get(package, name);
            let description = format!("The part '{}' does not have a content type.", part.uri);
            findings.push(
                ValidationErrorInfo::new(
                    "Pkg_MissingContentType",
                    ValidationErrorType::Package,
                    description,
                )
                .at(&part, None),
            );
        }
    }

    fn check_relationships(
        &self,
        package: &OoxmlContainer,
        parts: &mut PartTable,
        findings: &mut Findings,
    ) -> Result<()> {
        let sources: Vec<&str> = std::iter::once("")
            .chain(package.list_parts().filter(|name| {
                *name != CONTENT_TYPES_PART && !OoxmlContainer::is_relationships_part(name)
            }))
            .collect();

        for source in sources {
            let rels_path = OoxmlContainer::relationships_path(source);
            if !package.exists(&rels_path) {
                continue;
            }

            let rels = package.read_relationships(source)?;
            let rels_part = parts.get(package, &rels_path);
            for rel in rels.iter().filter(|r| !r.external) {
                let target = OoxmlContainer::resolve_path(source, &rel.target);
                if !target.is_empty() && package.exists(&target) {
                    continue;
                }

                let description = format!(
                    "The relationship '{}' of part '/{}' targets '{}', which does not exist in the package.",
                    rel.id,
                    if source.is_empty() { PACKAGE_RELS_PART } else { source },
                    rel.target
                );
                let info = ValidationErrorInfo::new(
                    "Pkg_BrokenRelationship",
                    ValidationErrorType::Package,
                    description,
                )
                .with_related_part(&rels_part);
                let info = if source.is_empty() {
                    info.at_path(format!("/{}", PACKAGE_RELS_PART))
                } else {
                    info.at(&parts.get(package, source), None)
                };
                findings.push(info);
            }
        }

        Ok(())
    }

    fn check_markup<D: OpenXmlDocument + ?Sized>(
        &self,
        document: &D,
        name: &str,
        parts: &mut PartTable,
        findings: &mut Findings,
    ) -> Result<()> {
        let package = document.package();
        trace!("checking markup of {}", name);

        let xml = package.read_xml(name)?;
        let tree = roxmltree::Document::parse(&xml)
            .map_err(|e| Error::XmlParse(format!("/{}: {}", name, e)))?;
        let rels = package.read_relationships(name)?;
        let part = parts.get(package, name);

        let mut checker = PartChecker::new(
            self.options.version,
            document.markup_rules(),
            part,
            &rels,
            &tree,
            findings,
        );
        if name == document.main_part() {
            checker.check_root(document.kind());
        }
        checker.run();

        Ok(())
    }
}

/// XML parts subject to markup checks: the main part first, then the rest in
/// name order.
fn markup_parts<D: OpenXmlDocument + ?Sized>(document: &D) -> Vec<String> {
    let package = document.package();
    let main = document.main_part();

    let mut others: Vec<String> = package
        .list_parts()
        .filter(|name| *name != main && is_markup_part(package, name))
        .map(String::from)
        .collect();
    others.sort();

    let mut parts = Vec::with_capacity(others.len() + 1);
    parts.push(main.to_string());
    parts.extend(others);
    parts
}

fn is_markup_part(package: &OoxmlContainer, name: &str) -> bool {
    if name == CONTENT_TYPES_PART || OoxmlContainer::is_relationships_part(name) {
        return false;
    }
    // Custom XML data items carry arbitrary user schemas.
    if name.to_ascii_lowercase().starts_with("customxml/") {
        return false;
    }
    match package.content_type(name) {
        Some(ct) => ct != RELATIONSHIPS_CONTENT_TYPE && (ct.ends_with("+xml") || ct.ends_with("/xml")),
        None => false,
    }
}
