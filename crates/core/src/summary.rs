//! Structural summary of a deck: what a viewer would find on each slide.
//!
//! Built either from the in-memory [`Deck`] or by reading a written package
//! back, so the two can be compared.

use crate::normalize::{sanitize, single_line};
use crate::types::{Deck, Rgb, Shape, ShapeKind, Slide, TextBody};
use std::fmt;

/// Slide-by-slide structure of a deck.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckSummary {
    /// Slides in presentation order.
    pub slides: Vec<SlideSummary>,
}

impl DeckSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slide(&mut self, slide: SlideSummary) {
        self.slides.push(slide);
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// All non-empty shape texts of all slides, flattened.
    pub fn all_text(&self) -> Vec<&str> {
        self.slides
            .iter()
            .flat_map(|s| s.shapes.iter().map(|shape| shape.text.as_str()))
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl fmt::Display for DeckSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slide in &self.slides {
            let background = slide
                .background
                .map(|c| c.to_string())
                .unwrap_or_else(|| "inherited".to_string());
            writeln!(
                f,
                "Slide {} (background {}, {} shapes)",
                slide.number,
                background,
                slide.shapes.len()
            )?;
            for shape in &slide.shapes {
                match &shape.table {
                    Some(table) => {
                        writeln!(f, "  {} {}x{}", shape.kind, table.rows, table.columns)?;
                        for row in &table.cells {
                            writeln!(f, "    | {} |", row.join(" | "))?;
                        }
                    }
                    None if shape.text.is_empty() => writeln!(f, "  {}", shape.kind)?,
                    None => writeln!(f, "  {}: {}", shape.kind, single_line(&shape.text))?,
                }
            }
        }
        Ok(())
    }
}

/// One slide's background and shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideSummary {
    /// 1-based slide number.
    pub number: usize,

    /// Solid background color, if the slide sets one.
    pub background: Option<Rgb>,

    /// Shapes in z-order (back to front).
    pub shapes: Vec<ShapeSummary>,
}

impl SlideSummary {
    pub fn new(number: usize) -> Self {
        Self {
            number,
            background: None,
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: ShapeSummary) {
        self.shapes.push(shape);
    }

    /// Number of shapes of the given kind.
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }

    /// Tables on this slide.
    pub fn tables(&self) -> Vec<&TableSummary> {
        self.shapes.iter().filter_map(|s| s.table.as_ref()).collect()
    }
}

/// Kind and text of a shape. Paragraphs and line breaks both appear as `\n`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeSummary {
    pub kind: ShapeKind,
    pub text: String,
    pub table: Option<TableSummary>,
}

impl ShapeSummary {
    pub fn new(kind: ShapeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            table: None,
        }
    }

    pub fn table(table: TableSummary) -> Self {
        Self {
            kind: ShapeKind::Table,
            text: String::new(),
            table: Some(table),
        }
    }
}

/// Grid size and cell texts of a table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSummary {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<String>>,
}

impl TableSummary {
    pub fn row(&self, index: usize) -> Option<Vec<&str>> {
        self.cells
            .get(index)
            .map(|row| row.iter().map(String::as_str).collect())
    }
}

impl Deck {
    /// Summary of the deck as it will be written: each run's text is
    /// sanitized the same way the package writer sanitizes it.
    pub fn summary(&self) -> DeckSummary {
        let mut summary = DeckSummary::new();
        for (idx, slide) in self.slides().iter().enumerate() {
            summary.add_slide(summarize_slide(slide, idx + 1));
        }
        summary
    }
}

fn summarize_slide(slide: &Slide, number: usize) -> SlideSummary {
    let mut summary = SlideSummary::new(number);
    summary.background = Some(slide.background());

    for shape in slide.shapes() {
        let shape_summary = match shape {
            Shape::TextBox(tb) => ShapeSummary::new(shape.kind(), body_text(&tb.body)),
            Shape::AutoShape(s) => ShapeSummary::new(
                shape.kind(),
                s.body.as_ref().map(body_text).unwrap_or_default(),
            ),
            Shape::Connector(_) => ShapeSummary::new(shape.kind(), ""),
            Shape::Table(table) => ShapeSummary::table(TableSummary {
                rows: table.row_count(),
                columns: table.column_count(),
                cells: table
                    .rows
                    .iter()
                    .map(|row| row.iter().map(body_text).collect())
                    .collect(),
            }),
        };
        summary.add_shape(shape_summary);
    }

    summary
}

/// Runs are sanitized one at a time, as the writer emits them, so a
/// combining mark opening a run is never composed with the run before it.
fn body_text(body: &TextBody) -> String {
    body.paragraphs
        .iter()
        .map(|p| p.runs.iter().map(|r| sanitize(&r.text)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AutoShape, Connector, Frame, Point, Run, Table, TextBox};

    fn sample_deck() -> Deck {
        let mut deck = Deck::new("Sample", "Tester");
        let mut slide = Slide::new(Rgb::BLACK);
        slide.push(TextBox::new(Frame::default(), "Title\r\nSecond line"));
        slide.push(AutoShape::oval(Frame::default()));
        slide.push(Connector::straight(Point::default(), Point::inches(1.0, 1.0)));
        slide.push(Table::new(
            Frame::inches(0.0, 0.0, 4.0, 2.0),
            vec![
                vec!["A".to_string(), "B".to_string()],
                vec!["1".to_string(), "2".to_string()],
            ],
        ));
        deck.add_slide(slide);
        deck
    }

    #[test]
    fn test_deck_summary_structure() {
        let summary = sample_deck().summary();
        assert_eq!(summary.slide_count(), 1);

        let slide = &summary.slides[0];
        assert_eq!(slide.number, 1);
        assert_eq!(slide.background, Some(Rgb::BLACK));
        assert_eq!(slide.shapes.len(), 4);
        assert_eq!(slide.shapes[0].text, "Title\nSecond line");
        assert_eq!(slide.shapes[1].kind, ShapeKind::Oval);
        assert_eq!(slide.shapes[1].text, "");
        assert_eq!(slide.count(ShapeKind::Connector), 1);

        let tables = slide.tables();
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].rows, 2);
        assert_eq!(tables[0].columns, 2);
        assert_eq!(tables[0].row(1), Some(vec!["1", "2"]));
    }

    #[test]
    fn test_combining_mark_opening_a_run_stays_separate() {
        let mut deck = Deck::new("Sample", "Tester");
        let mut slide = Slide::new(Rgb::WHITE);
        slide.push(TextBox::rich(
            Frame::default(),
            vec![Run::new("Herme"), Run::new("\u{300}s")],
        ));
        slide.push(TextBox::new(Frame::default(), "Herme\u{300}s"));
        deck.add_slide(slide);

        let summary = deck.summary();
        assert_eq!(summary.slides[0].shapes[0].text, "Herme\u{300}s");
        assert_eq!(summary.slides[0].shapes[1].text, "Herm\u{e8}s");
    }

    #[test]
    fn test_all_text_skips_empty() {
        let summary = sample_deck().summary();
        assert_eq!(summary.all_text(), vec!["Title\nSecond line"]);
    }

    #[test]
    fn test_display_lists_shapes() {
        let rendered = sample_deck().summary().to_string();
        assert!(rendered.starts_with("Slide 1 (background #000000, 4 shapes)"));
        assert!(rendered.contains("  TextBox: Title / Second line"));
        assert!(rendered.contains("  Oval\n"));
        assert!(rendered.contains("  Table 2x2"));
        assert!(rendered.contains("    | 1 | 2 |"));
    }
}
