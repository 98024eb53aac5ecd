//! JSON writer for findings.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use super::options::{JsonFormat, JsonOptions, ReferenceHandling};
use crate::error::Result;
use crate::validation::{ErrorPath, ValidationErrorInfo};

/// Convert findings to JSON.
pub fn to_json(findings: &[ValidationErrorInfo], options: &JsonOptions) -> Result<String> {
    let value = match options.references {
        ReferenceHandling::Plain => serde_json::to_value(findings)?,
        ReferenceHandling::Preserve => ReferenceWriter::default().findings(findings)?,
    };

    let json = match options.format {
        JsonFormat::Compact => serde_json::to_string(&value)?,
        JsonFormat::Pretty => serde_json::to_string_pretty(&value)?,
    };
    Ok(json)
}

/// Convert findings to compact, reference-preserving JSON.
pub fn to_json_default(findings: &[ValidationErrorInfo]) -> Result<String> {
    to_json(findings, &JsonOptions::default())
}

/// Assigns `$id`s in write order and remembers which shared records were
/// already written.
#[derive(Default)]
struct ReferenceWriter {
    next_id: usize,
    written: HashMap<*const (), String>,
}

impl ReferenceWriter {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    fn findings(&mut self, findings: &[ValidationErrorInfo]) -> Result<Value> {
        let mut root = Map::new();
        root.insert("$id".to_string(), Value::String(self.next_id()));

        let values = findings
            .iter()
            .map(|f| self.finding(f))
            .collect::<Result<Vec<_>>>()?;
        root.insert("$values".to_string(), Value::Array(values));

        Ok(Value::Object(root))
    }

    fn finding(&mut self, finding: &ValidationErrorInfo) -> Result<Value> {
        let mut map = Map::new();
        map.insert("$id".to_string(), Value::String(self.next_id()));
        map.insert("Id".to_string(), Value::String(finding.id.clone()));
        map.insert("ErrorType".to_string(), serde_json::to_value(finding.error_type)?);
        map.insert(
            "Description".to_string(),
            Value::String(finding.description.clone()),
        );
        let path = self.path(finding.path.as_ref())?;
        map.insert("Path".to_string(), path);
        let node = self.shared(finding.node.as_ref())?;
        map.insert("Node".to_string(), node);
        let part = self.shared(finding.part.as_ref())?;
        map.insert("Part".to_string(), part);
        let related_node = self.shared(finding.related_node.as_ref())?;
        map.insert("RelatedNode".to_string(), related_node);
        let related_part = self.shared(finding.related_part.as_ref())?;
        map.insert("RelatedPart".to_string(), related_part);
        Ok(Value::Object(map))
    }

    /// Paths are owned per finding, so they always get a fresh id.
    fn path(&mut self, path: Option<&ErrorPath>) -> Result<Value> {
        match path {
            Some(path) => {
                let id = self.next_id();
                Ok(with_id(id, serde_json::to_value(path)?))
            }
            None => Ok(Value::Null),
        }
    }

    fn shared<T: Serialize>(&mut self, record: Option<&Arc<T>>) -> Result<Value> {
        let Some(record) = record else {
            return Ok(Value::Null);
        };

        let key = Arc::as_ptr(record) as *const ();
        if let Some(id) = self.written.get(&key) {
            let mut reference = Map::new();
            reference.insert("$ref".to_string(), Value::String(id.clone()));
            return Ok(Value::Object(reference));
        }

        let id = self.next_id();
        self.written.insert(key, id.clone());
        Ok(with_id(id, serde_json::to_value(record.as_ref())?))
    }
}

/// Put `$id` first in an object.
fn with_id(id: String, value: Value) -> Value {
    let mut map = Map::new();
    map.insert("$id".to_string(), Value::String(id));
    if let Value::Object(fields) = value {
        map.extend(fields);
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{ElementInfo, PartInfo, ValidationErrorType};

    fn part() -> Arc<PartInfo> {
        Arc::new(PartInfo::new(
            "word/document.xml",
            Some("application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"),
        ))
    }

    fn node(xpath: &str) -> Arc<ElementInfo> {
        Arc::new(ElementInfo {
            local_name: "p".to_string(),
            namespace_uri: Some("urn:w".to_string()),
            prefix: Some("w".to_string()),
            xpath: xpath.to_string(),
            line: 2,
            column: 7,
        })
    }

    fn finding(id: &str, part: &Arc<PartInfo>, node: &Arc<ElementInfo>) -> ValidationErrorInfo {
        ValidationErrorInfo::new(id, ValidationErrorType::Schema, "desc").at(part, Some(node))
    }

    #[test]
    fn test_empty_findings() {
        assert_eq!(to_json_default(&[]).unwrap(), r#"{"$id":"1","$values":[]}"#);
        let plain = JsonOptions::new().plain();
        assert_eq!(to_json(&[], &plain).unwrap(), "[]");
    }

    #[test]
    fn test_field_order_and_ids() {
        let part = part();
        let node = node("/w:document[1]");
        let json = to_json_default(&[finding("A", &part, &node)]).unwrap();

        let expected_prefix = r#"{"$id":"1","$values":[{"$id":"2","Id":"A","ErrorType":"Schema","Description":"desc","Path":{"$id":"3","PartUri":"/word/document.xml","XPath":"/w:document[1]"},"Node":{"$id":"4","LocalName":"p""#;
        assert!(json.starts_with(expected_prefix), "{}", json);
        assert!(json.contains(r#""Part":{"$id":"5","Uri":"/word/document.xml""#));
        assert!(json.ends_with(r#""RelatedNode":null,"RelatedPart":null}]}"#));
    }

    #[test]
    fn test_shared_records_become_refs() {
        let part = part();
        let shared = node("/w:document[1]/w:body[1]/w:p[1]");
        let other = node("/w:document[1]/w:body[1]/w:p[2]");
        let findings = vec![
            finding("A", &part, &shared),
            finding("B", &part, &shared),
            finding("C", &part, &other),
        ];

        let json = to_json_default(&findings).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let values = value["$values"].as_array().unwrap();

        let part_id = values[0]["Part"]["$id"].as_str().unwrap();
        let node_id = values[0]["Node"]["$id"].as_str().unwrap();
        assert_eq!(values[1]["Part"], serde_json::json!({ "$ref": part_id }));
        assert_eq!(values[1]["Node"], serde_json::json!({ "$ref": node_id }));
        assert_eq!(values[2]["Part"], serde_json::json!({ "$ref": part_id }));

        // Equal content but a different record is written again.
        assert!(values[2]["Node"]["$id"].is_string());
        assert_eq!(values[2]["Node"]["XPath"], "/w:document[1]/w:body[1]/w:p[2]");

        // Paths are never shared.
        assert!(values[1]["Path"]["$id"].is_string());
    }

    #[test]
    fn test_plain_repeats_records() {
        let part = part();
        let node = node("/w:document[1]");
        let findings = vec![finding("A", &part, &node), finding("B", &part, &node)];

        let json = to_json(&findings, &JsonOptions::new().plain()).unwrap();
        assert!(!json.contains("$id"));
        assert_eq!(json.matches(r#""Uri":"/word/document.xml""#).count(), 2);
    }

    #[test]
    fn test_pretty() {
        let json = to_json(&[], &JsonOptions::new().pretty()).unwrap();
        assert!(json.contains('\n'));
    }
}
