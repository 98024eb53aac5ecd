//! Namespaces known to each Office compatibility version.

use crate::version::FileFormatVersion;
use crate::version::FileFormatVersion::{
    Office2007, Office2010, Office2013, Office2016, Office2019,
};

/// WordprocessingML main namespace.
pub const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
/// SpreadsheetML main namespace.
pub const X_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
/// PresentationML main namespace.
pub const P_NS: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
/// Office document relationships namespace (transitional).
pub const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
/// Office document relationships namespace (strict).
pub const R_STRICT_NS: &str = "http://purl.oclc.org/ooxml/officeDocument/relationships";
/// Markup compatibility namespace.
pub const MC_NS: &str = "http://schemas.openxmlformats.org/markup-compatibility/2006";
/// The reserved `xml:` namespace.
pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

/// A namespace and the first version whose schemas declare it.
#[derive(Debug, Clone, Copy)]
pub struct KnownNamespace {
    /// Conventional prefix
    pub prefix: &'static str,
    /// Namespace URI
    pub uri: &'static str,
    /// First version that understands the namespace
    pub since: FileFormatVersion,
}

const fn ns(prefix: &'static str, uri: &'static str, since: FileFormatVersion) -> KnownNamespace {
    KnownNamespace { prefix, uri, since }
}

/// Namespaces understood by the validator.
pub static KNOWN_NAMESPACES: &[KnownNamespace] = &[
    // ECMA-376 transitional
    ns("w", W_NS, Office2007),
    ns("x", X_NS, Office2007),
    ns("p", P_NS, Office2007),
    ns("r", R_NS, Office2007),
    ns("mc", MC_NS, Office2007),
    ns("xml", XML_NS, Office2007),
    ns("a", "http://schemas.openxmlformats.org/drawingml/2006/main", Office2007),
    ns("wp", "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing", Office2007),
    ns("pic", "http://schemas.openxmlformats.org/drawingml/2006/picture", Office2007),
    ns("c", "http://schemas.openxmlformats.org/drawingml/2006/chart", Office2007),
    ns("cdr", "http://schemas.openxmlformats.org/drawingml/2006/chartDrawing", Office2007),
    ns("dgm", "http://schemas.openxmlformats.org/drawingml/2006/diagram", Office2007),
    ns("xdr", "http://schemas.openxmlformats.org/drawingml/2006/spreadsheetDrawing", Office2007),
    ns("lc", "http://schemas.openxmlformats.org/drawingml/2006/lockedCanvas", Office2007),
    ns("comp", "http://schemas.openxmlformats.org/drawingml/2006/compatibility", Office2007),
    ns("m", "http://schemas.openxmlformats.org/officeDocument/2006/math", Office2007),
    ns("b", "http://schemas.openxmlformats.org/officeDocument/2006/bibliography", Office2007),
    ns("ds", "http://schemas.openxmlformats.org/officeDocument/2006/customXml", Office2007),
    ns("ap", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties", Office2007),
    ns("op", "http://schemas.openxmlformats.org/officeDocument/2006/custom-properties", Office2007),
    ns("vt", "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes", Office2007),
    ns("cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties", Office2007),
    ns("sl", "http://schemas.openxmlformats.org/schemaLibrary/2006/main", Office2007),
    ns("dc", "http://purl.org/dc/elements/1.1/", Office2007),
    ns("dcterms", "http://purl.org/dc/terms/", Office2007),
    ns("dcmitype", "http://purl.org/dc/dcmitype/", Office2007),
    ns("xsi", "http://www.w3.org/2001/XMLSchema-instance", Office2007),
    ns("v", "urn:schemas-microsoft-com:vml", Office2007),
    ns("o", "urn:schemas-microsoft-com:office:office", Office2007),
    ns("w10", "urn:schemas-microsoft-com:office:word", Office2007),
    ns("xvml", "urn:schemas-microsoft-com:office:excel", Office2007),
    ns("pvml", "urn:schemas-microsoft-com:office:powerpoint", Office2007),
    ns("wne", "http://schemas.microsoft.com/office/word/2006/wordml", Office2007),
    // ISO/IEC 29500 strict
    ns("w", "http://purl.oclc.org/ooxml/wordprocessingml/main", Office2007),
    ns("x", "http://purl.oclc.org/ooxml/spreadsheetml/main", Office2007),
    ns("p", "http://purl.oclc.org/ooxml/presentationml/main", Office2007),
    ns("a", "http://purl.oclc.org/ooxml/drawingml/main", Office2007),
    ns("r", R_STRICT_NS, Office2007),
    // Office 2010
    ns("w14", "http://schemas.microsoft.com/office/word/2010/wordml", Office2010),
    ns("wp14", "http://schemas.microsoft.com/office/word/2010/wordprocessingDrawing", Office2010),
    ns("wpc", "http://schemas.microsoft.com/office/word/2010/wordprocessingCanvas", Office2010),
    ns("wpg", "http://schemas.microsoft.com/office/word/2010/wordprocessingGroup", Office2010),
    ns("wpi", "http://schemas.microsoft.com/office/word/2010/wordprocessingInk", Office2010),
    ns("wps", "http://schemas.microsoft.com/office/word/2010/wordprocessingShape", Office2010),
    ns("x14", "http://schemas.microsoft.com/office/spreadsheetml/2009/9/main", Office2010),
    ns("x14ac", "http://schemas.microsoft.com/office/spreadsheetml/2009/9/ac", Office2010),
    ns("xm", "http://schemas.microsoft.com/office/excel/2006/main", Office2010),
    ns("p14", "http://schemas.microsoft.com/office/powerpoint/2010/main", Office2010),
    ns("a14", "http://schemas.microsoft.com/office/drawing/2010/main", Office2010),
    ns("c14", "http://schemas.microsoft.com/office/drawing/2007/8/2/chart", Office2010),
    ns("dsp", "http://schemas.microsoft.com/office/drawing/2008/diagram", Office2010),
    // Office 2013
    ns("w15", "http://schemas.microsoft.com/office/word/2012/wordml", Office2013),
    ns("x15", "http://schemas.microsoft.com/office/spreadsheetml/2010/11/main", Office2013),
    ns("x15ac", "http://schemas.microsoft.com/office/spreadsheetml/2010/11/ac", Office2013),
    ns("p15", "http://schemas.microsoft.com/office/powerpoint/2012/main", Office2013),
    ns("c15", "http://schemas.microsoft.com/office/drawing/2012/chart", Office2013),
    ns("thm15", "http://schemas.microsoft.com/office/thememl/2012/main", Office2013),
    // Office 2016
    ns("w16se", "http://schemas.microsoft.com/office/word/2015/wordml/symex", Office2016),
    ns("a16", "http://schemas.microsoft.com/office/drawing/2014/main", Office2016),
    ns("c16", "http://schemas.microsoft.com/office/drawing/2014/chart", Office2016),
    ns("cx", "http://schemas.microsoft.com/office/drawing/2014/chartex", Office2016),
    ns("xr", "http://schemas.microsoft.com/office/spreadsheetml/2014/revision", Office2016),
    ns("xr2", "http://schemas.microsoft.com/office/spreadsheetml/2015/revision2", Office2016),
    ns("xr3", "http://schemas.microsoft.com/office/spreadsheetml/2016/revision3", Office2016),
    // Office 2019
    ns("w16cid", "http://schemas.microsoft.com/office/word/2016/wordml/cid", Office2019),
    ns("w16", "http://schemas.microsoft.com/office/word/2018/wordml", Office2019),
    ns("w16cex", "http://schemas.microsoft.com/office/word/2018/wordml/cex", Office2019),
    ns("xlrd", "http://schemas.microsoft.com/office/spreadsheetml/2017/richdata", Office2019),
    ns("x18tc", "http://schemas.microsoft.com/office/spreadsheetml/2018/threadedcomments", Office2019),
    ns("adec", "http://schemas.microsoft.com/office/drawing/2017/decorative", Office2019),
];

/// Look up a namespace URI.
pub fn lookup(uri: &str) -> Option<&'static KnownNamespace> {
    KNOWN_NAMESPACES.iter().find(|known| known.uri == uri)
}

/// First version that understands `uri`, if any does.
pub fn introduced_in(uri: &str) -> Option<FileFormatVersion> {
    lookup(uri).map(|known| known.since)
}

/// Whether `version` understands markup in `uri`.
pub fn is_understood(uri: &str, version: FileFormatVersion) -> bool {
    introduced_in(uri).is_some_and(|since| version.includes(since))
}

/// Whether attributes in `uri` carry relationship IDs.
pub fn is_relationship_namespace(uri: &str) -> bool {
    uri == R_NS || uri == R_STRICT_NS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_namespaces_are_understood_everywhere() {
        for version in FileFormatVersion::ALL {
            assert!(is_understood(W_NS, version));
            assert!(is_understood(MC_NS, version));
            assert!(is_understood("urn:schemas-microsoft-com:vml", version));
        }
    }

    #[test]
    fn test_w14_requires_office_2010() {
        let w14 = "http://schemas.microsoft.com/office/word/2010/wordml";
        assert_eq!(introduced_in(w14), Some(FileFormatVersion::Office2010));
        assert!(!is_understood(w14, FileFormatVersion::Office2007));
        assert!(is_understood(w14, FileFormatVersion::Office2010));
        assert!(is_understood(w14, FileFormatVersion::Office2019));
    }

    #[test]
    fn test_newest_namespaces() {
        let w16cid = "http://schemas.microsoft.com/office/word/2016/wordml/cid";
        assert!(!is_understood(w16cid, FileFormatVersion::Office2016));
        assert!(is_understood(w16cid, FileFormatVersion::Office2019));
    }

    #[test]
    fn test_unknown_namespace() {
        assert_eq!(introduced_in("urn:example:bogus"), None);
        assert!(!is_understood("urn:example:bogus", FileFormatVersion::Office2019));
    }

    #[test]
    fn test_uris_are_unique() {
        for (i, a) in KNOWN_NAMESPACES.iter().enumerate() {
            for b in &KNOWN_NAMESPACES[i + 1..] {
                assert_ne!(a.uri, b.uri, "duplicate entry for {}", a.uri);
            }
        }
    }

    #[test]
    fn test_relationship_namespaces() {
        assert!(is_relationship_namespace(R_NS));
        assert!(is_relationship_namespace(R_STRICT_NS));
        assert!(!is_relationship_namespace(W_NS));
    }
}
