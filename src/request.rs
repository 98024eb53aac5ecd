//! The JSON validation request and its argument checks.

use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::kind::{kind_for_file_name, DocumentKind};
use crate::version::FileFormatVersion;

/// A validation request as received from the invocation host.
///
/// ```json
/// { "fileName": "/data/report.docx", "format": "2" }
/// ```
///
/// `format` is required but tolerant: `null` or text that does not parse
/// selects the newest version, while a request without the property is
/// rejected by [`ValidationRequest::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRequest {
    /// Path of the document to validate
    #[serde(default)]
    pub file_name: Option<String>,
    /// Compatibility version index as decimal text. The outer `None` means
    /// the property is absent; `Some(None)` is an explicit `null`.
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub format: Option<Option<String>>,
}

/// Accept a string, a number or null. Only called when the property is
/// present.
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(Some(match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

/// A request that passed every argument check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// Existing file to open
    pub path: PathBuf,
    /// Document family implied by the file name
    pub kind: DocumentKind,
    /// Compatibility version the validator targets
    pub version: FileFormatVersion,
}

impl ValidationRequest {
    /// Create a request.
    pub fn new(file_name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            file_name: Some(file_name.into()),
            format: Some(Some(format.into())),
        }
    }

    /// Decode a request from JSON text. The payload must be an object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value =
            serde_json::from_str(json).map_err(|e| Error::InvalidRequest(e.to_string()))?;
        if !value.is_object() {
            return Err(Error::InvalidRequest(
                "expected a JSON object with 'fileName' and 'format'".to_string(),
            ));
        }
        serde_json::from_value(value).map_err(|e| Error::InvalidRequest(e.to_string()))
    }

    /// The format as an integer, or `None` when it is absent, null, or does
    /// not parse as a 32-bit decimal integer.
    pub fn parsed_format(&self) -> Option<i64> {
        self.format
            .as_ref()
            .and_then(|f| f.as_deref())
            .and_then(|s| s.trim().parse::<i32>().ok())
            .map(i64::from)
    }

    /// Run the argument checks in contract order and pick the version.
    ///
    /// 1. a request without `format` is [`Error::InvalidRequest`]
    /// 2. a parsed format outside `0..=4` is [`Error::OutOfRange`]
    /// 3. a missing file name is [`Error::NullArgument`]
    /// 4. an unsupported extension is [`Error::InvalidArgument`]
    /// 5. a missing file is [`Error::NotFound`]
    ///
    /// A null or unparseable format is not an error: it selects the newest
    /// version, and so does `0`.
    pub fn resolve(&self) -> Result<ResolvedRequest> {
        if self.format.is_none() {
            return Err(Error::InvalidRequest(
                "the request has no 'format' property".to_string(),
            ));
        }

        let parsed = self.parsed_format();
        let checked = parsed.unwrap_or(0);
        if !(0..=FileFormatVersion::MAX_INDEX).contains(&checked) {
            return Err(Error::OutOfRange(format!(
                "Office version must be {}",
                FileFormatVersion::mapping_description()
            )));
        }

        let file_name = self
            .file_name
            .as_deref()
            .ok_or(Error::NullArgument("fileName"))?;
        let kind = kind_for_file_name(file_name)?;

        let path = PathBuf::from(file_name);
        if !path.is_file() {
            return Err(Error::NotFound(path));
        }

        let version = FileFormatVersion::select(parsed);
        debug!(
            "request for {} ({}) resolved to {}",
            path.display(),
            kind,
            version
        );

        Ok(ResolvedRequest {
            path,
            kind,
            version,
        })
    }
}
