//! Element-level checks over one XML part.

use std::collections::HashMap;
use std::sync::Arc;

use roxmltree::{Attribute, Document, Node};

use super::error_info::{ElementInfo, PartInfo, ValidationErrorInfo, ValidationErrorType};
use super::namespaces::{self, MC_NS, XML_NS};
use super::rules::MarkupRules;
use super::validator::Findings;
use crate::container::Relationships;
use crate::kind::DocumentKind;
use crate::version::FileFormatVersion;

/// Walks a parsed part and records findings.
///
/// Markup compatibility is applied while walking: namespaces listed in
/// `mc:Ignorable` are skipped when the target version does not understand
/// them, and each `mc:AlternateContent` contributes only the branch that
/// version would select.
pub(crate) struct PartChecker<'a, 'input> {
    version: FileFormatVersion,
    rules: &'static MarkupRules,
    part: Arc<PartInfo>,
    rels: &'a Relationships,
    xml: &'a Document<'input>,
    elements: HashMap<usize, Arc<ElementInfo>>,
    findings: &'a mut Findings,
}

impl<'a, 'input> PartChecker<'a, 'input> {
    pub(crate) fn new(
        version: FileFormatVersion,
        rules: &'static MarkupRules,
        part: Arc<PartInfo>,
        rels: &'a Relationships,
        xml: &'a Document<'input>,
        findings: &'a mut Findings,
    ) -> Self {
        Self {
            version,
            rules,
            part,
            rels,
            xml,
            elements: HashMap::new(),
            findings,
        }
    }

    /// Check that the root element is the main element of `kind`.
    pub(crate) fn check_root(&mut self, kind: DocumentKind) {
        let root = self.xml.root_element();
        let tag = root.tag_name();
        let namespace_ok = tag
            .namespace()
            .is_some_and(|ns| kind.main_namespaces().iter().any(|m| *m == ns));
        if namespace_ok && tag.name() == kind.main_root_element() {
            return;
        }

        let node = self.element(root);
        let description = format!(
            "The root element of part '{}' must be '{}:{}' but found '{}'.",
            self.part.uri,
            kind.main_namespaces()[0],
            kind.main_root_element(),
            expanded_name(root)
        );
        self.report(
            ValidationErrorInfo::new("Sch_UnexpectedRoot", ValidationErrorType::Schema, description)
                .at(&self.part, Some(&node)),
        );
    }

    /// Walk the whole part.
    pub(crate) fn run(&mut self) {
        let root = self.xml.root_element();
        self.visit(root, &[]);
    }

    fn visit(&mut self, node: Node<'a, 'input>, inherited: &[String]) {
        if self.findings.is_full() {
            return;
        }

        let ignorable = self.ignorable_namespaces(node, inherited);
        self.check_must_understand(node);

        let tag = node.tag_name();
        if tag.namespace() == Some(MC_NS) && tag.name() == "AlternateContent" {
            if let Some(branch) = self.select_alternate(node) {
                for child in branch.children().filter(Node::is_element) {
                    self.visit(child, &ignorable);
                }
            }
            return;
        }

        if !self.check_declared(node, &ignorable) {
            return;
        }

        self.check_attributes(node, &ignorable);
        self.check_first_child(node);
        self.check_required_children(node);

        // Extension payloads are open content.
        if is_extension(node) {
            return;
        }

        for child in node.children().filter(Node::is_element) {
            self.visit(child, &ignorable);
        }
    }

    /// Namespaces ignorable at `node`: the inherited set plus any named by
    /// its own `mc:Ignorable`.
    fn ignorable_namespaces(&mut self, node: Node<'a, 'input>, inherited: &[String]) -> Vec<String> {
        let mut ignorable = inherited.to_vec();
        let Some(value) = node.attribute((MC_NS, "Ignorable")) else {
            return ignorable;
        };

        let mut invalid = false;
        for prefix in value.split_whitespace() {
            match node.lookup_namespace_uri(Some(prefix)) {
                Some(uri) => {
                    if !ignorable.iter().any(|i| i == uri) {
                        ignorable.push(uri.to_string());
                    }
                }
                None => invalid = true,
            }
        }
        if invalid {
            self.report_invalid_prefix(node, "Ignorable", value);
        }
        ignorable
    }

    fn check_must_understand(&mut self, node: Node<'a, 'input>) {
        let Some(value) = node.attribute((MC_NS, "MustUnderstand")) else {
            return;
        };

        for prefix in value.split_whitespace() {
            match node.lookup_namespace_uri(Some(prefix)) {
                Some(uri) if namespaces::is_understood(uri, self.version) => {}
                Some(uri) => {
                    let element = self.element(node);
                    let description = format!(
                        "The namespace '{}' is declared as must-understand but is not understood by {}.",
                        uri, self.version
                    );
                    self.report(
                        ValidationErrorInfo::new(
                            "MC_MustUnderstand",
                            ValidationErrorType::MarkupCompatibility,
                            description,
                        )
                        .at(&self.part, Some(&element)),
                    );
                }
                None => {
                    self.report_invalid_prefix(node, "MustUnderstand", value);
                    return;
                }
            }
        }
    }

    /// Pick the branch of an `mc:AlternateContent` the target version would
    /// process: the first understood `mc:Choice`, else `mc:Fallback`.
    fn select_alternate(&mut self, node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
        let mut fallback = None;

        for child in node.children().filter(Node::is_element) {
            if child.tag_name().namespace() != Some(MC_NS) {
                continue;
            }
            match child.tag_name().name() {
                "Choice" => {
                    let Some(requires) = child.attribute("Requires") else {
                        let element = self.element(child);
                        self.report(
                            ValidationErrorInfo::new(
                                "MC_ChoiceRequiresMissing",
                                ValidationErrorType::MarkupCompatibility,
                                "All Choice elements must have a Requires attribute whose value \
                                 contains a whitespace-delimited list of namespace prefixes.",
                            )
                            .at(&self.part, Some(&element)),
                        );
                        continue;
                    };

                    let mut understood = true;
                    for prefix in requires.split_whitespace() {
                        match child.lookup_namespace_uri(Some(prefix)) {
                            Some(uri) => understood &= namespaces::is_understood(uri, self.version),
                            None => {
                                self.report_invalid_prefix(child, "Requires", requires);
                                understood = false;
                                break;
                            }
                        }
                    }
                    if understood {
                        return Some(child);
                    }
                }
                "Fallback" => {
                    if fallback.is_none() {
                        fallback = Some(child);
                    }
                }
                _ => {}
            }
        }

        fallback
    }

    /// Report elements the target version does not declare. Returns whether
    /// the element should be checked further.
    fn check_declared(&mut self, node: Node<'a, 'input>, ignorable: &[String]) -> bool {
        let uri = node.tag_name().namespace();
        match uri {
            Some(uri) if namespaces::is_understood(uri, self.version) => true,
            Some(uri) if ignorable.iter().any(|i| i == uri) => false,
            _ => {
                let element = self.element(node);
                let description = match node.parent_element() {
                    Some(parent) => format!(
                        "The element '{}' has unexpected child element '{}'.",
                        expanded_name(parent),
                        expanded_name(node)
                    ),
                    None => format!("The element '{}' is not declared.", expanded_name(node)),
                };
                self.report(
                    ValidationErrorInfo::new(
                        "Sch_UndeclaredElement",
                        ValidationErrorType::Schema,
                        description,
                    )
                    .at(&self.part, Some(&element)),
                );
                false
            }
        }
    }

    fn check_attributes(&mut self, node: Node<'a, 'input>, ignorable: &[String]) {
        for attr in node.attributes() {
            let Some(uri) = attr.namespace() else {
                continue;
            };
            if uri == XML_NS || uri == MC_NS {
                continue;
            }
            if namespaces::is_relationship_namespace(uri) {
                self.check_relationship_reference(node, &attr);
            }
            if namespaces::is_understood(uri, self.version) || ignorable.iter().any(|i| i == uri) {
                continue;
            }

            let element = self.element(node);
            let description = format!("The attribute '{}:{}' is not declared.", uri, attr.name());
            self.report(
                ValidationErrorInfo::new(
                    "Sch_UndeclaredAttribute",
                    ValidationErrorType::Schema,
                    description,
                )
                .at(&self.part, Some(&element)),
            );
        }
    }

    fn check_relationship_reference(&mut self, node: Node<'a, 'input>, attr: &Attribute<'a, 'input>) {
        let id = attr.value();
        if id.is_empty() || self.rels.get(id).is_some() {
            return;
        }

        let element = self.element(node);
        let prefix = attr
            .namespace()
            .and_then(|uri| node.lookup_prefix(uri))
            .unwrap_or("r");
        let description = format!(
            "The relationship '{}' referenced by attribute '{}:{}' does not exist.",
            id,
            prefix,
            attr.name()
        );
        self.report(
            ValidationErrorInfo::new(
                "Sem_InvalidRelationshipId",
                ValidationErrorType::Semantic,
                description,
            )
            .at(&self.part, Some(&element)),
        );
    }

    fn check_first_child(&mut self, node: Node<'a, 'input>) {
        let ns = self.rules.namespace;
        if node.tag_name().namespace() != Some(ns) {
            return;
        }

        let rules = self.rules;
        let children: Vec<Node<'a, 'input>> = node.children().filter(Node::is_element).collect();
        for rule in rules.first_child_rules(node.tag_name().name()) {
            let position = children.iter().position(|c| {
                c.tag_name().namespace() == Some(ns) && c.tag_name().name() == rule.child
            });
            let Some(position) = position.filter(|&p| p > 0) else {
                continue;
            };
            let misplaced = children[..position].iter().any(|c| {
                c.tag_name().namespace() != Some(ns) || !rule.may_precede(c.tag_name().name())
            });
            if !misplaced {
                continue;
            }

            let parent = self.element(node);
            let child = self.element(children[position]);
            let description = format!(
                "The element '{}' has invalid child element '{}'. The '{}' element must be the \
                 first child, but was found at position {}.",
                parent.qualified_name(),
                child.qualified_name(),
                child.qualified_name(),
                position + 1
            );
            self.report(
                ValidationErrorInfo::new(
                    "Sch_ElementOrdering",
                    ValidationErrorType::Schema,
                    description,
                )
                .at(&self.part, Some(&parent))
                .with_related_node(&child),
            );
        }
    }

    fn check_required_children(&mut self, node: Node<'a, 'input>) {
        let ns = self.rules.namespace;
        if node.tag_name().namespace() != Some(ns) {
            return;
        }

        let rules = self.rules;
        for rule in rules.required_child_rules(node.tag_name().name()) {
            let present = node
                .children()
                .filter(Node::is_element)
                .any(|c| c.tag_name().namespace() == Some(ns) && c.tag_name().name() == rule.child);
            if present {
                continue;
            }

            let parent = self.element(node);
            let description = format!(
                "The element '{}' has incomplete content. List of possible elements expected: '{}:{}'.",
                parent.qualified_name(),
                ns,
                rule.child
            );
            self.report(
                ValidationErrorInfo::new(
                    "Sch_MissingRequiredChild",
                    ValidationErrorType::Schema,
                    description,
                )
                .at(&self.part, Some(&parent)),
            );
        }
    }

    fn report_invalid_prefix(&mut self, node: Node<'a, 'input>, attribute: &str, value: &str) {
        let element = self.element(node);
        let description = format!(
            "The {} attribute is invalid - The value '{}' contains an invalid prefix that is not defined.",
            attribute, value
        );
        self.report(
            ValidationErrorInfo::new(
                "MC_InvalidPrefix",
                ValidationErrorType::MarkupCompatibility,
                description,
            )
            .at(&self.part, Some(&element)),
        );
    }

    fn report(&mut self, info: ValidationErrorInfo) {
        self.findings.push(info);
    }

    /// Shared record for an element; repeated findings on the same element
    /// reuse it.
    fn element(&mut self, node: Node<'a, 'input>) -> Arc<ElementInfo> {
        let key = node.range().start;
        if let Some(info) = self.elements.get(&key) {
            return Arc::clone(info);
        }

        let tag = node.tag_name();
        let pos = self.xml.text_pos_at(key);
        let info = Arc::new(ElementInfo {
            local_name: tag.name().to_string(),
            namespace_uri: tag.namespace().map(String::from),
            prefix: prefix_of(node),
            xpath: xpath(node),
            line: pos.row,
            column: pos.col,
        });
        self.elements.insert(key, Arc::clone(&info));
        info
    }
}

/// An `ext` entry of an `extLst`, in whichever main namespace declares it.
fn is_extension(node: Node<'_, '_>) -> bool {
    let tag = node.tag_name();
    tag.name() == "ext"
        && node.parent_element().is_some_and(|parent| {
            let list = parent.tag_name();
            list.name() == "extLst" && list.namespace() == tag.namespace()
        })
}

fn prefix_of(node: Node<'_, '_>) -> Option<String> {
    let uri = node.tag_name().namespace()?;
    node.lookup_prefix(uri)
        .filter(|p| !p.is_empty())
        .map(String::from)
}

fn expanded_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(ns) => format!("{}:{}", ns, tag.name()),
        None => tag.name().to_string(),
    }
}

/// `/w:document[1]/w:body[1]/w:p[3]`
fn xpath(node: Node<'_, '_>) -> String {
    let mut segments = Vec::new();
    let mut current = Some(node);

    while let Some(element) = current {
        let tag = element.tag_name();
        let mut index = 1;
        let mut sibling = element.prev_sibling_element();
        while let Some(s) = sibling {
            if s.tag_name() == tag {
                index += 1;
            }
            sibling = s.prev_sibling_element();
        }

        let name = match prefix_of(element) {
            Some(prefix) => format!("{}:{}", prefix, tag.name()),
            None => tag.name().to_string(),
        };
        segments.push(format!("{}[{}]", name, index));
        current = element.parent_element();
    }

    segments.reverse();
    format!("/{}", segments.join("/"))
}
