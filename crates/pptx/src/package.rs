//! OPC plumbing: content types, relationships and part names.

use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

use deck_core::Result;

/// Content types of the parts this writer produces.
pub mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const OPC_CORE_PROPERTIES: &str =
        "application/vnd.openxmlformats-package.core-properties+xml";
    pub const OFC_EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
    pub const OFC_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const PML_PRESENTATION_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const PML_SLIDE: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const PML_SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const PML_SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const PML_PRES_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
    pub const PML_VIEW_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml";
    pub const PML_TABLE_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
}

/// Relationship type URIs.
pub mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    pub const SLIDE_LAYOUT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const THEME: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const VIEW_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
}

pub(crate) const XML_DECLARATION: &str =
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Relationships of one part, numbered `rId1`, `rId2`, ... in insertion order.
#[derive(Debug, Default)]
pub(crate) struct Relationships {
    entries: Vec<(String, &'static str, String)>,
}

impl Relationships {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a relationship and return its id.
    pub(crate) fn add(&mut self, rel_type: &'static str, target: impl Into<String>) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push((id.clone(), rel_type, target.into()));
        id
    }

    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.entries.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );
        for (id, rel_type, target) in &self.entries {
            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
                id,
                rel_type,
                escape(target.as_str())
            )?;
        }
        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

/// Builder for `[Content_Types].xml`.
#[derive(Debug, Default)]
pub(crate) struct ContentTypes {
    overrides: Vec<(String, &'static str)>,
}

impl ContentTypes {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register a part by its name inside the package (no leading slash).
    pub(crate) fn add_override(&mut self, part_name: &str, content_type: &'static str) {
        self.overrides.push((format!("/{}", part_name), content_type));
    }

    pub(crate) fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);
        xml.push_str(XML_DECLARATION);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        write!(
            xml,
            r#"<Default Extension="rels" ContentType="{}"/>"#,
            content_type::RELATIONSHIPS
        )?;
        write!(
            xml,
            r#"<Default Extension="xml" ContentType="{}"/>"#,
            content_type::XML
        )?;
        for (part_name, content_type) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape(part_name.as_str()),
                content_type
            )?;
        }
        xml.push_str("</Types>");
        Ok(xml)
    }
}

/// `ppt/slides/slide3.xml` → `ppt/slides/_rels/slide3.xml.rels`.
pub(crate) fn rels_part_name(part_name: &str) -> String {
    match part_name.rsplit_once('/') {
        Some((dir, file)) => format!("{}/_rels/{}.rels", dir, file),
        None => format!("_rels/{}.rels", part_name),
    }
}

/// Part name of the 1-based slide `number`.
pub(crate) fn slide_part_name(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}
