//! Builders for small OOXML packages written on the fly.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::PathBuf;

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const X_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
pub const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
pub const W14_NS: &str = "http://schemas.microsoft.com/office/word/2010/wordml";

const RELS_CT: &str = "application/vnd.openxmlformats-package.relationships+xml";
const DOCX_MAIN_CT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const XLSX_MAIN_CT: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const WORKSHEET_CT: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const PPTX_MAIN_CT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const SLIDE_CT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

pub const OFFICE_DOCUMENT_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
pub const WORKSHEET_REL: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
pub const SLIDE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
pub const IMAGE_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

/// `<w:document>` around a body's inner markup, with `w`, `r`, `mc` and
/// `w14` bound.
pub fn word_document(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="{W_NS}" xmlns:r="{R_NS}" xmlns:mc="{MC_NS}" xmlns:w14="{W14_NS}"><w:body>{body}</w:body></w:document>"#
    )
}

/// A `.rels` document from `(id, type, target)` triples.
pub fn relationships(rels: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for (id, rel_type, target) in rels {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            id, rel_type, target
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// An in-memory package under construction.
#[derive(Clone, Default)]
pub struct PackageBuilder {
    entries: Vec<(String, Vec<u8>)>,
    overrides: Vec<(String, String)>,
}

impl PackageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A Word document whose body holds `body`.
    pub fn docx(body: &str) -> Self {
        Self::new()
            .content_type("word/document.xml", DOCX_MAIN_CT)
            .entry(
                "_rels/.rels",
                relationships(&[("rId1", OFFICE_DOCUMENT_REL, "word/document.xml")]),
            )
            .entry("word/document.xml", word_document(body))
            .entry("word/_rels/document.xml.rels", relationships(&[]))
    }

    /// A workbook with one worksheet.
    pub fn xlsx(workbook: &str, sheet: &str) -> Self {
        Self::new()
            .content_type("xl/workbook.xml", XLSX_MAIN_CT)
            .content_type("xl/worksheets/sheet1.xml", WORKSHEET_CT)
            .entry(
                "_rels/.rels",
                relationships(&[("rId1", OFFICE_DOCUMENT_REL, "xl/workbook.xml")]),
            )
            .entry("xl/workbook.xml", workbook)
            .entry(
                "xl/_rels/workbook.xml.rels",
                relationships(&[("rId1", WORKSHEET_REL, "worksheets/sheet1.xml")]),
            )
            .entry("xl/worksheets/sheet1.xml", sheet)
    }

    /// A conformant workbook.
    pub fn minimal_xlsx() -> Self {
        Self::xlsx(
            &format!(
                r#"<workbook xmlns="{X_NS}" xmlns:r="{R_NS}"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#
            ),
            &format!(r#"<worksheet xmlns="{X_NS}"><sheetData/></worksheet>"#),
        )
    }

    /// A presentation with one slide.
    pub fn pptx(presentation: &str, slide: &str) -> Self {
        Self::new()
            .content_type("ppt/presentation.xml", PPTX_MAIN_CT)
            .content_type("ppt/slides/slide1.xml", SLIDE_CT)
            .entry(
                "_rels/.rels",
                relationships(&[("rId1", OFFICE_DOCUMENT_REL, "ppt/presentation.xml")]),
            )
            .entry("ppt/presentation.xml", presentation)
            .entry(
                "ppt/_rels/presentation.xml.rels",
                relationships(&[("rId2", SLIDE_REL, "slides/slide1.xml")]),
            )
            .entry("ppt/slides/slide1.xml", slide)
    }

    /// A conformant presentation.
    pub fn minimal_pptx() -> Self {
        Self::pptx(
            &format!(
                r#"<p:presentation xmlns:p="{P_NS}" xmlns:r="{R_NS}"><p:sldIdLst><p:sldId id="256" r:id="rId2"/></p:sldIdLst><p:notesSz cx="6858000" cy="9144000"/></p:presentation>"#
            ),
            &format!(r#"<p:sld xmlns:p="{P_NS}"><p:cSld><p:spTree/></p:cSld></p:sld>"#),
        )
    }

    /// Add or replace an entry.
    pub fn entry(mut self, name: &str, data: impl AsRef<[u8]>) -> Self {
        self.entries.retain(|(n, _)| n != name);
        self.entries.push((name.to_string(), data.as_ref().to_vec()));
        self
    }

    /// Drop an entry.
    pub fn without(mut self, name: &str) -> Self {
        self.entries.retain(|(n, _)| n != name);
        self
    }

    /// Declare a content type override for a part.
    pub fn content_type(mut self, part: &str, content_type: &str) -> Self {
        self.overrides.retain(|(p, _)| p != part);
        self.overrides.push((part.to_string(), content_type.to_string()));
        self
    }

    fn content_types_xml(&self) -> String {
        let mut xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="{RELS_CT}"/><Default Extension="xml" ContentType="application/xml"/>"#
        );
        for (part, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="/{}" ContentType="{}"/>"#,
                part, content_type
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    /// Zip bytes with a generated `[Content_Types].xml`.
    pub fn build(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(self.content_types_xml().as_bytes()).unwrap();
        for (name, data) in &self.entries {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }

        zip.finish().unwrap();
        buffer
    }

    /// Zip bytes without `[Content_Types].xml`.
    pub fn build_without_content_types(&self) -> Vec<u8> {
        let mut buffer = Vec::new();
        let mut zip = ZipWriter::new(Cursor::new(&mut buffer));
        let options = SimpleFileOptions::default();
        for (name, data) in &self.entries {
            zip.start_file(name.as_str(), options).unwrap();
            zip.write_all(data).unwrap();
        }
        zip.finish().unwrap();
        buffer
    }

    /// Write the package into `dir` and return its path.
    pub fn write_to(&self, dir: &TempDir, file_name: &str) -> PathBuf {
        let path = dir.path().join(file_name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

/// `{"fileName": ..., "format": ...}` for a path.
pub fn request(path: &std::path::Path, format: &str) -> String {
    serde_json::json!({
        "fileName": path.to_string_lossy(),
        "format": format,
    })
    .to_string()
}
