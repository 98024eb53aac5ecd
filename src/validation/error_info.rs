//! Validation finding records.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Classification of a validation finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorType {
    /// Markup does not match the schema of the target version
    Schema,
    /// Markup is schema-valid but references something that does not exist
    Semantic,
    /// Package structure problem (content types, relationships)
    Package,
    /// Markup compatibility (mc:) attribute or element misuse
    MarkupCompatibility,
}

/// A package part referenced by findings.
///
/// Findings from the same part share a single `Arc<PartInfo>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PartInfo {
    /// Absolute part URI, e.g. `/word/document.xml`
    pub uri: String,
    /// Declared content type, if any
    pub content_type: Option<String>,
}

impl PartInfo {
    /// Describe a part by its ZIP entry name.
    pub fn new(entry_name: &str, content_type: Option<&str>) -> Self {
        Self {
            uri: format!("/{}", entry_name.trim_start_matches('/')),
            content_type: content_type.map(String::from),
        }
    }
}

/// An element referenced by findings.
///
/// Findings on the same element share a single `Arc<ElementInfo>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ElementInfo {
    /// Local name
    pub local_name: String,
    /// Namespace URI
    pub namespace_uri: Option<String>,
    /// Prefix bound to the namespace at this element
    pub prefix: Option<String>,
    /// Location as `/w:document[1]/w:body[1]/w:p[2]`
    #[serde(rename = "XPath")]
    pub xpath: String,
    /// 1-based line in the part
    pub line: u32,
    /// 1-based column in the part
    pub column: u32,
}

impl ElementInfo {
    /// `prefix:local` or `local`.
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}:{}", prefix, self.local_name),
            _ => self.local_name.clone(),
        }
    }
}

/// Where a finding was detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ErrorPath {
    /// Part URI
    pub part_uri: String,
    /// Element location inside the part
    #[serde(rename = "XPath")]
    pub xpath: Option<String>,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ValidationErrorInfo {
    /// Stable identifier of the rule that fired, e.g. `Sch_UndeclaredElement`
    pub id: String,
    /// Classification
    pub error_type: ValidationErrorType,
    /// Human-readable description
    pub description: String,
    /// Location of the finding
    pub path: Option<ErrorPath>,
    /// Offending element
    pub node: Option<Arc<ElementInfo>>,
    /// Part containing the offending element
    pub part: Option<Arc<PartInfo>>,
    /// Second element involved, e.g. the misplaced child
    pub related_node: Option<Arc<ElementInfo>>,
    /// Second part involved
    pub related_part: Option<Arc<PartInfo>>,
}

impl ValidationErrorInfo {
    /// Create a finding without location.
    pub fn new(
        id: impl Into<String>,
        error_type: ValidationErrorType,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            error_type,
            description: description.into(),
            path: None,
            node: None,
            part: None,
            related_node: None,
            related_part: None,
        }
    }

    /// Attach the part and, optionally, the element the finding is about.
    pub fn at(mut self, part: &Arc<PartInfo>, node: Option<&Arc<ElementInfo>>) -> Self {
        self.path = Some(ErrorPath {
            part_uri: part.uri.clone(),
            xpath: node.map(|n| n.xpath.clone()),
        });
        self.part = Some(Arc::clone(part));
        self.node = node.map(Arc::clone);
        self
    }

    /// Attach a location for findings on parts that have no record, such
    /// as the package relationships.
    pub fn at_path(mut self, part_uri: impl Into<String>) -> Self {
        self.path = Some(ErrorPath {
            part_uri: part_uri.into(),
            xpath: None,
        });
        self
    }

    /// Attach a related element.
    pub fn with_related_node(mut self, node: &Arc<ElementInfo>) -> Self {
        self.related_node = Some(Arc::clone(node));
        self
    }

    /// Attach a related part.
    pub fn with_related_part(mut self, part: &Arc<PartInfo>) -> Self {
        self.related_part = Some(Arc::clone(part));
        self
    }
}
