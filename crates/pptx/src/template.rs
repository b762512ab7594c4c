//! Fixed package parts plus the few generated from deck metadata.
//!
//! Master, layout and theme are the minimum a viewer needs to open the
//! package; every slide uses the single blank layout.

use quick_xml::escape::escape;
use std::fmt::Write as FmtWrite;

use deck_core::{Deck, Result};

use crate::package::XML_DECLARATION;

/// Id of the first slide in `p:sldIdLst`.
pub(crate) const FIRST_SLIDE_ID: usize = 256;

/// Id of the slide master; the layout id follows it.
pub(crate) const SLIDE_MASTER_ID: u32 = 2_147_483_648;

pub(crate) fn slide_master_xml() -> &'static str {
    include_str!("../resources/slideMaster1.xml")
}

/// The "Blank" layout: no placeholders.
pub(crate) fn blank_layout_xml() -> &'static str {
    include_str!("../resources/slideLayout1.xml")
}

pub(crate) fn theme_xml() -> &'static str {
    include_str!("../resources/theme1.xml")
}

pub(crate) fn pres_props_xml() -> &'static str {
    include_str!("../resources/presProps.xml")
}

pub(crate) fn view_props_xml() -> &'static str {
    include_str!("../resources/viewProps.xml")
}

pub(crate) fn table_styles_xml() -> &'static str {
    include_str!("../resources/tableStyles.xml")
}

/// `ppt/presentation.xml`. `slide_rel_ids` are the relationship ids of the
/// slides in presentation order.
pub(crate) fn presentation_xml(
    deck: &Deck,
    master_rel_id: &str,
    slide_rel_ids: &[String],
) -> Result<String> {
    let mut xml = String::with_capacity(1024 + slide_rel_ids.len() * 48);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#,
    );
    write!(
        xml,
        r#"<p:sldMasterIdLst><p:sldMasterId id="{}" r:id="{}"/></p:sldMasterIdLst>"#,
        SLIDE_MASTER_ID, master_rel_id
    )?;

    if !slide_rel_ids.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for (idx, rel_id) in slide_rel_ids.iter().enumerate() {
            write!(
                xml,
                r#"<p:sldId id="{}" r:id="{}"/>"#,
                FIRST_SLIDE_ID + idx,
                rel_id
            )?;
        }
        xml.push_str("</p:sldIdLst>");
    }

    write!(
        xml,
        r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="6858000" cy="9144000"/>"#,
        deck.width().value(),
        deck.height().value()
    )?;
    xml.push_str(r#"<p:defaultTextStyle><a:defPPr><a:defRPr lang="en-US"/></a:defPPr></p:defaultTextStyle>"#);
    xml.push_str("</p:presentation>");
    Ok(xml)
}

/// `docProps/core.xml`. No timestamps, so repeated builds stay identical.
pub(crate) fn core_properties_xml(deck: &Deck) -> Result<String> {
    let mut xml = String::with_capacity(640);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    );
    let title = deck_core::normalize::sanitize(deck.title());
    let author = deck_core::normalize::sanitize(deck.author());
    write!(xml, "<dc:title>{}</dc:title>", escape(title.as_str()))?;
    write!(xml, "<dc:creator>{}</dc:creator>", escape(author.as_str()))?;
    write!(
        xml,
        "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
        escape(author.as_str())
    )?;
    xml.push_str("<cp:revision>1</cp:revision>");
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

/// `docProps/app.xml`.
pub(crate) fn app_properties_xml(deck: &Deck) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
    );
    write!(
        xml,
        "<Application>{}</Application><PresentationFormat>Widescreen</PresentationFormat><Slides>{}</Slides>",
        env!("CARGO_PKG_NAME"),
        deck.slide_count()
    )?;
    xml.push_str("</Properties>");
    Ok(xml)
}
