//! PPTX package reader producing a structural deck summary.

use deck_core::{
    DeckSummary, Error, Result, Rgb, ShapeKind, ShapeSummary, SlideSummary, TableSummary,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

/// Parser for PPTX (Office Open XML) files.
pub struct PptxParser;

impl PptxParser {
    /// Create a new PPTX parser.
    pub fn new() -> Self {
        Self
    }

    /// Read the package at `path`.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<DeckSummary> {
        let file = File::open(path.as_ref())?;
        self.parse(BufReader::new(file))
    }

    /// Parse a PPTX package from a reader.
    pub fn parse<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let mut summary = DeckSummary::new();

        // Get the slide order from presentation.xml.rels
        let slide_order = self.get_slide_order(&mut archive)?;

        for (idx, slide_path) in slide_order.iter().enumerate() {
            let slide = self.parse_slide(&mut archive, slide_path, idx + 1)?;
            summary.add_slide(slide);
        }

        log::debug!("Read {} slides from package", summary.slide_count());
        Ok(summary)
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_path = "ppt/_rels/presentation.xml.rels";

        let rels_content = self.read_file_from_archive(archive, rels_path)?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Relationship" => {
                    let rel_type = attribute(e, b"Type").unwrap_or_default();
                    let target = attribute(e, b"Target").unwrap_or_default();

                    if rel_type.ends_with("/slide") {
                        // Target names carry the slide number
                        let order_num = extract_slide_number(&target);
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order_num));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        if slides.is_empty() {
            log::warn!("Package lists no slides");
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    /// Parse a single slide from the archive.
    fn parse_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<SlideSummary> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        extract_slide(&content, slide_number)
            .map_err(|e| Error::CorruptedFile(format!("{}: {}", slide_path, e)))
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxParser {
    fn default() -> Self {
        Self::new()
    }
}

/// A shape being read.
#[derive(Debug, Default)]
struct ShapeState {
    text_box: bool,
    preset: Option<String>,
    text: String,
}

impl ShapeState {
    fn kind(&self) -> ShapeKind {
        if self.text_box {
            ShapeKind::TextBox
        } else if self.preset.as_deref() == Some("ellipse") {
            ShapeKind::Oval
        } else {
            ShapeKind::Rectangle
        }
    }
}

/// A table being read.
#[derive(Debug, Default)]
struct TableState {
    columns: usize,
    cells: Vec<Vec<String>>,
    in_cell: bool,
}

/// Paragraph text of the current text body. Only `a:t` content counts;
/// `a:br` becomes `\n` and paragraphs are joined with `\n`.
#[derive(Debug, Default)]
struct TextState {
    paragraphs: Vec<String>,
    current: Option<String>,
    in_run_text: bool,
}

impl TextState {
    fn begin_body(&mut self) {
        self.paragraphs.clear();
        self.current = None;
        self.in_run_text = false;
    }

    fn end_paragraph(&mut self) {
        if let Some(paragraph) = self.current.take() {
            self.paragraphs.push(paragraph);
        }
    }

    fn body_text(&mut self) -> String {
        self.end_paragraph();
        self.paragraphs.join("\n")
    }
}

/// Extract background and shapes from slide XML.
fn extract_slide(xml_content: &str, slide_number: usize) -> Result<SlideSummary> {
    let mut slide = SlideSummary::new(slide_number);
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(false);

    let mut in_background = false;
    let mut shape: Option<ShapeState> = None;
    let mut table: Option<TableState> = None;
    let mut text = TextState::default();

    loop {
        let event = reader
            .read_event()
            .map_err(|e| Error::XmlError(format!("at byte {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(ref e) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = true,
                b"sp" => shape = Some(ShapeState::default()),
                b"cxnSp" => slide.add_shape(ShapeSummary::new(ShapeKind::Connector, "")),
                b"graphicFrame" => table = Some(TableState::default()),
                b"tr" => {
                    if let Some(ref mut t) = table {
                        t.cells.push(Vec::new());
                    }
                }
                b"tc" => {
                    if let Some(ref mut t) = table {
                        t.in_cell = true;
                    }
                }
                b"txBody" => text.begin_body(),
                b"p" => {
                    text.end_paragraph();
                    text.current = Some(String::new());
                }
                b"t" => text.in_run_text = true,
                b"br" => push_break(&mut text),
                b"srgbClr" if in_background => read_background(&mut slide, e),
                b"cNvSpPr" => mark_text_box(shape.as_mut(), e),
                b"prstGeom" => read_preset(shape.as_mut(), e),
                b"gridCol" => count_column(table.as_mut()),
                b"grpSp" | b"pic" => {
                    log::warn!("Slide {}: skipping unsupported shape element", slide_number)
                }
                _ => {}
            },
            Event::Empty(ref e) => match local_name(e.name().as_ref()) {
                b"srgbClr" if in_background => read_background(&mut slide, e),
                b"cNvSpPr" => mark_text_box(shape.as_mut(), e),
                b"prstGeom" => read_preset(shape.as_mut(), e),
                b"gridCol" => count_column(table.as_mut()),
                b"p" => {
                    text.end_paragraph();
                    text.paragraphs.push(String::new());
                }
                b"br" => push_break(&mut text),
                _ => {}
            },
            Event::Text(ref e) => {
                if text.in_run_text {
                    if let Some(ref mut paragraph) = text.current {
                        let value = e.unescape().unwrap_or_default();
                        paragraph.push_str(&value);
                    }
                }
            }
            Event::End(ref e) => match local_name(e.name().as_ref()) {
                b"bg" => in_background = false,
                b"t" => text.in_run_text = false,
                b"p" => text.end_paragraph(),
                b"txBody" => {
                    let body = text.body_text();
                    match (table.as_mut(), shape.as_mut()) {
                        (Some(t), _) if t.in_cell => {
                            if let Some(row) = t.cells.last_mut() {
                                row.push(body);
                            }
                        }
                        (_, Some(s)) => s.text = body,
                        _ => {}
                    }
                }
                b"tc" => {
                    if let Some(ref mut t) = table {
                        t.in_cell = false;
                    }
                }
                b"sp" => {
                    if let Some(s) = shape.take() {
                        slide.add_shape(ShapeSummary::new(s.kind(), s.text));
                    }
                }
                b"graphicFrame" => {
                    if let Some(t) = table.take() {
                        slide.add_shape(ShapeSummary::table(TableSummary {
                            rows: t.cells.len(),
                            columns: t.columns,
                            cells: t.cells,
                        }));
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(slide)
}

/// The first solid color inside `p:bg` is the slide background.
fn read_background(slide: &mut SlideSummary, e: &BytesStart) {
    if slide.background.is_some() {
        return;
    }
    let value = attribute(e, b"val").unwrap_or_default();
    slide.background = Rgb::from_hex(&value);
    if slide.background.is_none() {
        log::warn!("Slide {}: unreadable background color '{}'", slide.number, value);
    }
}

fn mark_text_box(shape: Option<&mut ShapeState>, e: &BytesStart) {
    if let Some(s) = shape {
        s.text_box = attribute(e, b"txBox").as_deref() == Some("1");
    }
}

fn read_preset(shape: Option<&mut ShapeState>, e: &BytesStart) {
    if let Some(s) = shape {
        s.preset = attribute(e, b"prst");
    }
}

fn count_column(table: Option<&mut TableState>) {
    if let Some(t) = table {
        t.columns += 1;
    }
}

fn push_break(text: &mut TextState) {
    if let Some(ref mut paragraph) = text.current {
        paragraph.push('\n');
    }
}

/// Value of the attribute `key`, if present.
fn attribute(e: &BytesStart, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| String::from_utf8_lossy(&attr.value).to_string())
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
