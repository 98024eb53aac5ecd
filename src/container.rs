//! ZIP container abstraction for OOXML packages.

use crate::error::{Error, Result};
use log::trace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// Name of the content types stream at the package root.
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Package-level relationships part.
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";

/// A readable, seekable source for a ZIP archive.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// A relationship entry from a .rels file.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    pub id: String,
    /// Relationship type URI
    pub rel_type: String,
    /// Target path (relative or absolute)
    pub target: String,
    /// Whether the target is external
    pub external: bool,
}

/// Collection of relationships parsed from a .rels file.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    /// Map from relationship ID to relationship data
    pub by_id: HashMap<String, Relationship>,
    /// Map from relationship type to list of relationships
    pub by_type: HashMap<String, Vec<Relationship>>,
    /// Relationship IDs in document order
    pub order: Vec<String>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a relationship by ID.
    pub fn get(&self, id: &str) -> Option<&Relationship> {
        self.by_id.get(id)
    }

    /// Get relationships by type.
    pub fn get_by_type(&self, rel_type: &str) -> Vec<&Relationship> {
        self.by_type
            .get(rel_type)
            .map(|v| v.iter().collect())
            .unwrap_or_default()
    }

    /// Iterate relationships in the order they appear in the .rels part.
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.order.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Add a relationship.
    pub fn add(&mut self, rel: Relationship) {
        self.by_type
            .entry(rel.rel_type.clone())
            .or_default()
            .push(rel.clone());
        if !self.by_id.contains_key(&rel.id) {
            self.order.push(rel.id.clone());
        }
        self.by_id.insert(rel.id.clone(), rel);
    }

    /// Number of relationships.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no relationships.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Content type mapping from `[Content_Types].xml`.
#[derive(Debug, Clone, Default)]
pub struct ContentTypes {
    /// Lowercased extension to content type
    defaults: HashMap<String, String>,
    /// Lowercased part name (no leading slash) to content type
    overrides: HashMap<String, String>,
}

impl ContentTypes {
    /// Parse the content types stream.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut types = Self::default();
        let mut reader = quick_xml::Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e)) => {
                    let local = e.local_name();
                    let is_default = local.as_ref() == b"Default";
                    let is_override = local.as_ref() == b"Override";
                    if is_default || is_override {
                        let mut key = String::new();
                        let mut content_type = String::new();
                        for attr in e.attributes().flatten() {
                            match attr.key.as_ref() {
                                b"Extension" | b"PartName" => {
                                    key = String::from_utf8_lossy(&attr.value).to_string()
                                }
                                b"ContentType" => {
                                    content_type = String::from_utf8_lossy(&attr.value).to_string()
                                }
                                _ => {}
                            }
                        }

                        if !key.is_empty() && !content_type.is_empty() {
                            if is_default {
                                types.defaults.insert(key.to_lowercase(), content_type);
                            } else {
                                let part = key.trim_start_matches('/').to_lowercase();
                                types.overrides.insert(part, content_type);
                            }
                        }
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        Ok(types)
    }

    /// Content type of a part, by override first and extension second.
    pub fn get(&self, part_name: &str) -> Option<&str> {
        let key = part_name.trim_start_matches('/').to_lowercase();
        if let Some(ct) = self.overrides.get(&key) {
            return Some(ct);
        }
        // Text after the last dot of the last segment, so `_rels/.rels` has
        // extension `rels`.
        let (_, ext) = key.rsplit('/').next()?.rsplit_once('.')?;
        self.defaults.get(ext).map(String::as_str)
    }
}

/// Fix XML encoding declaration from UTF-16 to UTF-8.
///
/// When we decode UTF-16 XML to a Rust String (UTF-8), the XML declaration
/// still says encoding="UTF-16", which the XML readers would then reject.
fn fix_xml_encoding_declaration(content: &str) -> String {
    if content.starts_with("<?xml") {
        if let Some(end_decl) = content.find("?>") {
            let decl = &content[..end_decl + 2];
            let rest = &content[end_decl + 2..];

            let fixed_decl = decl
                .replace("encoding=\"UTF-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='UTF-16'", "encoding='UTF-8'")
                .replace("encoding=\"utf-16\"", "encoding=\"UTF-8\"")
                .replace("encoding='utf-16'", "encoding='UTF-8'");

            return format!("{}{}", fixed_decl, rest);
        }
    }
    content.to_string()
}

/// Decode XML bytes handling different encodings (UTF-8, UTF-16 LE/BE).
///
/// OOXML parts are normally UTF-8, but producers are allowed to write
/// UTF-16 with a byte order mark.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    if bytes.len() >= 3 && bytes[0] == 0xEF && bytes[1] == 0xBB && bytes[2] == 0xBF {
        return String::from_utf8(bytes[3..].to_vec())
            .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)));
    }

    if bytes.len() >= 2 && bytes[0] == 0xFF && bytes[1] == 0xFE {
        let content = decode_utf16(&bytes[2..], u16::from_le_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let content = decode_utf16(&bytes[2..], u16::from_be_bytes)?;
        return Ok(fix_xml_encoding_declaration(&content));
    }

    String::from_utf8(bytes.to_vec())
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

fn decode_utf16(bytes: &[u8], to_unit: fn([u8; 2]) -> u16) -> Result<String> {
    let len = bytes.len() & !1;

    let units = (0..len)
        .step_by(2)
        .map(|i| to_unit([bytes[i], bytes[i + 1]]));

    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(|e| Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Read-only OOXML package over a ZIP archive.
///
/// The archive (and, when opened from a path, its file handle) is owned by
/// the container and released when the container is dropped or closed.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Box<dyn ReadSeek>>>,
    content_types: ContentTypes,
    names: Vec<String>,
}

impl OoxmlContainer {
    /// Open an OOXML package from a file path, read-only.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ooxml_validator::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("document.docx")?;
    /// # Ok::<(), ooxml_validator::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create an OOXML container from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(data))
    }

    /// Create an OOXML container from a reader.
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Result<Self> {
        let source: Box<dyn ReadSeek> = Box::new(reader);
        let mut archive = zip::ZipArchive::new(source)?;
        let names: Vec<String> = archive.file_names().map(String::from).collect();

        let content_types = {
            let mut file = archive
                .by_name(CONTENT_TYPES_PART)
                .map_err(|_| Error::MissingComponent(CONTENT_TYPES_PART.to_string()))?;
            let mut bytes = Vec::new();
            file.read_to_end(&mut bytes)?;
            ContentTypes::parse(&decode_xml_bytes(&bytes)?)?
        };

        trace!("opened package with {} entries", names.len());

        Ok(Self {
            archive: RefCell::new(archive),
            content_types,
            names,
        })
    }

    /// Read an XML part from the archive as a string.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let bytes = self.read_binary(path)?;
        decode_xml_bytes(&bytes)
    }

    /// Read a binary part from the archive.
    pub fn read_binary(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;
        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Check if a part exists in the archive.
    pub fn exists(&self, path: &str) -> bool {
        self.names.iter().any(|n| n == path)
    }

    /// List all entries in the archive, directories included.
    pub fn list_files(&self) -> &[String] {
        &self.names
    }

    /// List package parts: every entry except directories.
    pub fn list_parts(&self) -> impl Iterator<Item = &str> {
        self.names
            .iter()
            .map(String::as_str)
            .filter(|n| !n.ends_with('/'))
    }

    /// Parsed `[Content_Types].xml`.
    pub fn content_types(&self) -> &ContentTypes {
        &self.content_types
    }

    /// Content type of a part, if the package declares one.
    pub fn content_type(&self, part: &str) -> Option<&str> {
        self.content_types.get(part)
    }

    /// Path of the relationships part belonging to `part_path`.
    ///
    /// An empty path or `/` names the package itself.
    pub fn relationships_path(part_path: &str) -> String {
        let part_path = part_path.trim_start_matches('/');
        if part_path.is_empty() {
            return PACKAGE_RELS_PART.to_string();
        }
        match part_path.rsplit_once('/') {
            Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
            None => format!("_rels/{}.rels", part_path),
        }
    }

    /// Whether an entry is a relationships part.
    pub fn is_relationships_part(path: &str) -> bool {
        path.ends_with(".rels") && (path.starts_with("_rels/") || path.contains("/_rels/"))
    }

    /// Read and parse relationships of a part.
    pub fn read_relationships(&self, part_path: &str) -> Result<Relationships> {
        self.parse_relationships(&Self::relationships_path(part_path))
    }

    /// Read package-level relationships (_rels/.rels).
    pub fn read_package_relationships(&self) -> Result<Relationships> {
        self.parse_relationships(PACKAGE_RELS_PART)
    }

    /// Parse a relationships part. A missing part yields an empty set.
    fn parse_relationships(&self, rels_path: &str) -> Result<Relationships> {
        if !self.exists(rels_path) {
            return Ok(Relationships::new());
        }
        let content = self.read_xml(rels_path)?;

        if content.trim().is_empty() {
            return Ok(Relationships::new());
        }

        let mut rels = Relationships::new();
        let mut reader = quick_xml::Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(quick_xml::events::Event::Empty(e)) | Ok(quick_xml::events::Event::Start(e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut id = String::new();
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut external = false;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => id = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Type" => rel_type = String::from_utf8_lossy(&attr.value).to_string(),
                            b"Target" => target = String::from_utf8_lossy(&attr.value).to_string(),
                            b"TargetMode" => {
                                external = String::from_utf8_lossy(&attr.value).to_lowercase()
                                    == "external"
                            }
                            _ => {}
                        }
                    }

                    if !id.is_empty() {
                        rels.add(Relationship {
                            id,
                            rel_type,
                            target,
                            external,
                        });
                    }
                }
                Ok(quick_xml::events::Event::Eof) => break,
                Err(e) => return Err(Error::XmlParse(format!("{}: {}", rels_path, e))),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Resolve a relationship target relative to its source part.
    pub fn resolve_path(base: &str, relative: &str) -> String {
        let relative = relative.split('#').next().unwrap_or_default();
        if let Some(stripped) = relative.strip_prefix('/') {
            return stripped.to_string();
        }

        let mut segments: Vec<&str> = match base.rsplit_once('/') {
            Some((dir, _)) => dir.split('/').filter(|s| !s.is_empty()).collect(),
            None => Vec::new(),
        };
        for component in relative.split('/') {
            match component {
                "" | "." => {}
                ".." => {
                    segments.pop();
                }
                c => segments.push(c),
            }
        }

        segments.join("/")
    }

    /// Release the archive and its file handle.
    pub fn close(self) {
        drop(self);
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.names.len())
            .finish()
    }
}
