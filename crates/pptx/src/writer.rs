//! PPTX package writer.

use std::io::{Cursor, Write};
use std::path::Path;

use deck_core::{Deck, Error, Result};
use tempfile::NamedTempFile;
use zip::write::FileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::package::{
    content_type as ct, rels_part_name, relationship_type as rt, slide_part_name, ContentTypes,
    Relationships,
};
use crate::slide::slide_xml;
use crate::template;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const SLIDE_MASTER_PART: &str = "ppt/slideMasters/slideMaster1.xml";
const SLIDE_LAYOUT_PART: &str = "ppt/slideLayouts/slideLayout1.xml";
const THEME_PART: &str = "ppt/theme/theme1.xml";
const PRES_PROPS_PART: &str = "ppt/presProps.xml";
const VIEW_PROPS_PART: &str = "ppt/viewProps.xml";
const TABLE_STYLES_PART: &str = "ppt/tableStyles.xml";
const CORE_PROPS_PART: &str = "docProps/core.xml";
const APP_PROPS_PART: &str = "docProps/app.xml";

/// Writer for PPTX (Office Open XML) packages.
pub struct PptxWriter;

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self
    }

    /// Serialize a deck into package bytes. The same deck always gives the
    /// same bytes.
    pub fn to_bytes(&self, deck: &Deck) -> Result<Vec<u8>> {
        let mut package = PackageBuilder::new();

        let mut types = ContentTypes::new();
        let mut root_rels = Relationships::new();
        let mut pres_rels = Relationships::new();

        root_rels.add(rt::OFFICE_DOCUMENT, PRESENTATION_PART);
        root_rels.add(rt::CORE_PROPERTIES, CORE_PROPS_PART);
        root_rels.add(rt::EXTENDED_PROPERTIES, APP_PROPS_PART);

        let master_rel_id = pres_rels.add(rt::SLIDE_MASTER, "slideMasters/slideMaster1.xml");
        let mut slide_rel_ids = Vec::with_capacity(deck.slide_count());
        for number in 1..=deck.slide_count() {
            slide_rel_ids.push(pres_rels.add(rt::SLIDE, format!("slides/slide{}.xml", number)));
        }
        pres_rels.add(rt::PRES_PROPS, "presProps.xml");
        pres_rels.add(rt::VIEW_PROPS, "viewProps.xml");
        pres_rels.add(rt::THEME, "theme/theme1.xml");
        pres_rels.add(rt::TABLE_STYLES, "tableStyles.xml");

        types.add_override(PRESENTATION_PART, ct::PML_PRESENTATION_MAIN);
        types.add_override(SLIDE_MASTER_PART, ct::PML_SLIDE_MASTER);
        types.add_override(SLIDE_LAYOUT_PART, ct::PML_SLIDE_LAYOUT);
        for number in 1..=deck.slide_count() {
            types.add_override(&slide_part_name(number), ct::PML_SLIDE);
        }
        types.add_override(THEME_PART, ct::OFC_THEME);
        types.add_override(PRES_PROPS_PART, ct::PML_PRES_PROPS);
        types.add_override(VIEW_PROPS_PART, ct::PML_VIEW_PROPS);
        types.add_override(TABLE_STYLES_PART, ct::PML_TABLE_STYLES);
        types.add_override(CORE_PROPS_PART, ct::OPC_CORE_PROPERTIES);
        types.add_override(APP_PROPS_PART, ct::OFC_EXTENDED_PROPERTIES);

        package.add_part("[Content_Types].xml", types.to_xml()?.as_bytes())?;
        package.add_part("_rels/.rels", root_rels.to_xml()?.as_bytes())?;
        package.add_part(
            CORE_PROPS_PART,
            template::core_properties_xml(deck)?.as_bytes(),
        )?;
        package.add_part(APP_PROPS_PART, template::app_properties_xml(deck)?.as_bytes())?;

        package.add_part(
            PRESENTATION_PART,
            template::presentation_xml(deck, &master_rel_id, &slide_rel_ids)?.as_bytes(),
        )?;
        package.add_part(
            &rels_part_name(PRESENTATION_PART),
            pres_rels.to_xml()?.as_bytes(),
        )?;

        let mut master_rels = Relationships::new();
        master_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
        master_rels.add(rt::THEME, "../theme/theme1.xml");
        package.add_part(SLIDE_MASTER_PART, template::slide_master_xml().as_bytes())?;
        package.add_part(
            &rels_part_name(SLIDE_MASTER_PART),
            master_rels.to_xml()?.as_bytes(),
        )?;

        let mut layout_rels = Relationships::new();
        layout_rels.add(rt::SLIDE_MASTER, "../slideMasters/slideMaster1.xml");
        package.add_part(SLIDE_LAYOUT_PART, template::blank_layout_xml().as_bytes())?;
        package.add_part(
            &rels_part_name(SLIDE_LAYOUT_PART),
            layout_rels.to_xml()?.as_bytes(),
        )?;

        package.add_part(THEME_PART, template::theme_xml().as_bytes())?;
        package.add_part(PRES_PROPS_PART, template::pres_props_xml().as_bytes())?;
        package.add_part(VIEW_PROPS_PART, template::view_props_xml().as_bytes())?;
        package.add_part(TABLE_STYLES_PART, template::table_styles_xml().as_bytes())?;

        for (idx, slide) in deck.slides().iter().enumerate() {
            let part_name = slide_part_name(idx + 1);
            log::debug!(
                "Writing {} ({} shapes, background {})",
                part_name,
                slide.shapes().len(),
                slide.background()
            );

            let mut slide_rels = Relationships::new();
            slide_rels.add(rt::SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml");
            package.add_part(&part_name, slide_xml(slide)?.as_bytes())?;
            package.add_part(&rels_part_name(&part_name), slide_rels.to_xml()?.as_bytes())?;
        }

        package.finish()
    }

    /// Write the deck to `path`.
    ///
    /// The package goes to a temporary file next to `path` and is renamed
    /// into place; on failure nothing is left at `path`.
    pub fn save(&self, deck: &Deck, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes(deck)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        file.write_all(&bytes)?;
        file.as_file().sync_all()?;
        file.persist(path).map_err(|e| Error::IoError(e.error))?;

        log::info!(
            "Wrote {} slides ({} bytes) to {}",
            deck.slide_count(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Zip archive under construction, held in memory.
struct PackageBuilder {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
}

impl PackageBuilder {
    fn new() -> Self {
        // Fixed timestamp keeps output reproducible.
        let options = FileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    fn add_part(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.zip
            .start_file(name, self.options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", name, e)))?;
        self.zip
            .write_all(data)
            .map_err(|e| Error::ZipError(format!("Failed to write '{}': {}", name, e)))?;
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish package: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_core::{Frame, Rgb, Slide, TextBox};
    use std::io::Read;
    use zip::ZipArchive;

    fn two_slide_deck() -> Deck {
        let mut deck = Deck::new("Deck", "Author");
        let mut first = Slide::new(Rgb::BLACK);
        first.push(TextBox::new(Frame::inches(1.0, 1.0, 4.0, 1.0), "Hello"));
        deck.add_slide(first);
        deck.add_slide(Slide::new(Rgb::WHITE));
        deck
    }

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = PptxWriter::new().to_bytes(&two_slide_deck()).unwrap();
        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();

        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "docProps/app.xml",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            "ppt/theme/theme1.xml",
            "ppt/presProps.xml",
            "ppt/viewProps.xml",
            "ppt/tableStyles.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/_rels/slide1.xml.rels",
            "ppt/slides/slide2.xml",
            "ppt/slides/_rels/slide2.xml.rels",
        ] {
            assert!(names.contains(&part), "missing part {}", part);
        }
    }

    #[test]
    fn test_presentation_rels_point_at_slides() {
        let bytes = PptxWriter::new().to_bytes(&two_slide_deck()).unwrap();
        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml""#));
        assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml""#));

        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
    }

    #[test]
    fn test_output_is_deterministic() {
        let deck = two_slide_deck();
        let writer = PptxWriter::new();
        assert_eq!(writer.to_bytes(&deck).unwrap(), writer.to_bytes(&deck).unwrap());
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pptx");
        std::fs::write(&path, b"stale").unwrap();

        PptxWriter::new().save(&two_slide_deck(), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"PK"));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }
}
