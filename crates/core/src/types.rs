//! Domain types for describing a presentation deck.
//!
//! Shapes are plain values built up front with chained setters and then
//! handed whole to a [`Slide`]; nothing is edited after it has been placed.

use std::fmt;

/// EMUs per inch.
pub const EMU_PER_INCH: f64 = 914_400.0;

/// EMUs per typographic point.
pub const EMU_PER_POINT: f64 = 12_700.0;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Emu(pub i64);

impl Emu {
    /// Convert inches to EMU, truncating toward zero.
    pub fn inches(value: f64) -> Self {
        Self((value * EMU_PER_INCH) as i64)
    }

    /// Convert points to EMU, truncating toward zero.
    pub fn points(value: f64) -> Self {
        Self((value * EMU_PER_POINT) as i64)
    }

    /// Raw EMU value.
    pub fn value(self) -> i64 {
        self.0
    }
}

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    /// Create a color from its components.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `RRGGBB` form, as used by `a:srgbClr`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `RRGGBB` (an optional leading `#` is accepted).
    pub fn from_hex(value: &str) -> Option<Self> {
        let value = value.strip_prefix('#').unwrap_or(value);
        if value.len() != 6 || !value.is_ascii() {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&value[range], 16).ok();
        Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex())
    }
}

/// A position on the slide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Point {
    pub x: Emu,
    pub y: Emu,
}

impl Point {
    pub fn inches(x: f64, y: f64) -> Self {
        Self {
            x: Emu::inches(x),
            y: Emu::inches(y),
        }
    }
}

/// Position and size of a shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub cx: Emu,
    pub cy: Emu,
}

impl Frame {
    /// Frame from left, top, width and height in inches.
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Emu::inches(x),
            y: Emu::inches(y),
            cx: Emu::inches(width),
            cy: Emu::inches(height),
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Character formatting. Unset fields inherit from the enclosing level.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    /// Latin typeface name.
    pub name: Option<String>,
    /// Size in points.
    pub size: Option<f64>,
    pub color: Option<Rgb>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl Font {
    /// Fields of `over` win; anything it leaves unset comes from `self`.
    pub fn merged(&self, over: &Font) -> Font {
        Font {
            name: over.name.clone().or_else(|| self.name.clone()),
            size: over.size.or(self.size),
            color: over.color.or(self.color),
            bold: over.bold.or(self.bold),
            italic: over.italic.or(self.italic),
        }
    }
}

/// A span of uniformly formatted text. `\n` inside the text is a line
/// break within the paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: Font,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::default(),
        }
    }

    /// Override the color of this run only.
    pub fn color(mut self, color: Rgb) -> Self {
        self.font.color = Some(color);
        self
    }
}

/// A paragraph of runs with paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    /// Applied to every run; run fonts override it.
    pub font: Font,
    pub align: Option<Alignment>,
}

impl Paragraph {
    /// Paragraph holding a single run. Empty text gives an empty paragraph.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run::new(text)]
        };
        Self::from_runs(runs)
    }

    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self {
            runs,
            font: Font::default(),
            align: None,
        }
    }

    pub fn font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }

    pub fn font_name(mut self, name: impl Into<String>) -> Self {
        self.font.name = Some(name.into());
        self
    }

    pub fn size(mut self, points: f64) -> Self {
        self.font.size = Some(points);
        self
    }

    pub fn color(mut self, color: Rgb) -> Self {
        self.font.color = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.font.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.font.italic = Some(italic);
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = Some(align);
        self
    }

    /// Plain text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }
}

/// The text content of a shape or table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBody {
    pub paragraphs: Vec<Paragraph>,
}

impl TextBody {
    /// One paragraph; embedded `\n` become line breaks.
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            paragraphs: vec![Paragraph::new(text)],
        }
    }

    /// One paragraph per line.
    pub fn from_paragraphs<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paragraphs: lines.into_iter().map(Paragraph::new).collect(),
        }
    }

    /// Restyle the paragraph at `index`. Missing indexes are ignored.
    pub fn map_paragraph(mut self, index: usize, f: impl FnOnce(Paragraph) -> Paragraph) -> Self {
        if let Some(paragraph) = self.paragraphs.get_mut(index) {
            *paragraph = f(std::mem::take(paragraph));
        }
        self
    }

    /// Restyle every paragraph from `start` onward.
    pub fn map_paragraphs_from(mut self, start: usize, f: impl Fn(Paragraph) -> Paragraph) -> Self {
        for paragraph in self.paragraphs.iter_mut().skip(start) {
            *paragraph = f(std::mem::take(paragraph));
        }
        self
    }

    pub fn map_all(self, f: impl Fn(Paragraph) -> Paragraph) -> Self {
        self.map_paragraphs_from(0, f)
    }

    /// Paragraph texts joined with `\n`.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<Vec<Paragraph>> for TextBody {
    fn from(paragraphs: Vec<Paragraph>) -> Self {
        Self { paragraphs }
    }
}

/// Shape interior or line color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Fill {
    /// Whatever the theme style reference supplies.
    #[default]
    Theme,
    /// Transparent.
    NoFill,
    Solid(Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashStyle {
    Dash,
}

/// Outline of an autoshape or the stroke of a connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Line {
    pub fill: Fill,
    pub width: Option<Emu>,
    pub dash: Option<DashStyle>,
}

impl Line {
    /// Solid line of the given color, default width.
    pub fn solid(color: Rgb) -> Self {
        Self {
            fill: Fill::Solid(color),
            ..Self::default()
        }
    }

    /// No outline at all.
    pub fn none() -> Self {
        Self {
            fill: Fill::NoFill,
            ..Self::default()
        }
    }

    pub fn width(mut self, width: Emu) -> Self {
        self.width = Some(width);
        self
    }

    pub fn dash(mut self, dash: DashStyle) -> Self {
        self.dash = Some(dash);
        self
    }
}

/// Defaults of a freshly created text box: Arial 18 pt black, regular.
fn text_box_font() -> Font {
    Font {
        name: Some("Arial".to_string()),
        size: Some(18.0),
        color: Some(Rgb::BLACK),
        bold: Some(false),
        italic: None,
    }
}

/// A free-standing text frame with word wrap on.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub body: TextBody,
    pub word_wrap: bool,
}

impl TextBox {
    /// A text box holding `text` as one paragraph.
    pub fn new(frame: Frame, text: impl Into<String>) -> Self {
        Self::rich(frame, vec![Run::new(text)])
    }

    /// A text box holding one paragraph made of `runs`.
    pub fn rich(frame: Frame, runs: Vec<Run>) -> Self {
        let runs = runs.into_iter().filter(|r| !r.text.is_empty()).collect();
        Self {
            frame,
            body: TextBody::from(vec![Paragraph::from_runs(runs).font(text_box_font())]),
            word_wrap: true,
        }
    }

    pub fn size(self, points: f64) -> Self {
        self.restyle(|p| p.size(points))
    }

    pub fn color(self, color: Rgb) -> Self {
        self.restyle(|p| p.color(color))
    }

    pub fn bold(self, bold: bool) -> Self {
        self.restyle(|p| p.bold(bold))
    }

    pub fn italic(self, italic: bool) -> Self {
        self.restyle(|p| p.italic(italic))
    }

    pub fn align(self, align: Alignment) -> Self {
        self.restyle(|p| p.align(align))
    }

    fn restyle(mut self, f: impl Fn(Paragraph) -> Paragraph) -> Self {
        self.body = self.body.map_all(f);
        self
    }
}

/// Preset geometry of an autoshape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Rectangle,
    Oval,
}

/// A preset-geometry shape with fill, outline and optional text.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoShape {
    pub geometry: Geometry,
    pub frame: Frame,
    pub fill: Fill,
    pub line: Line,
    pub body: Option<TextBody>,
}

impl AutoShape {
    pub fn rectangle(frame: Frame) -> Self {
        Self::with_geometry(Geometry::Rectangle, frame)
    }

    pub fn oval(frame: Frame) -> Self {
        Self::with_geometry(Geometry::Oval, frame)
    }

    fn with_geometry(geometry: Geometry, frame: Frame) -> Self {
        Self {
            geometry,
            frame,
            fill: Fill::Theme,
            line: Line::default(),
            body: None,
        }
    }

    pub fn fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = line;
        self
    }

    /// Text anchored at the middle of the shape. Paragraphs keep their own
    /// alignment and otherwise follow the master (left).
    pub fn text(mut self, body: TextBody) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectorKind {
    Straight,
    Curved,
}

/// A line between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub kind: ConnectorKind,
    pub begin: Point,
    pub end: Point,
    pub line: Line,
}

impl Connector {
    pub fn straight(begin: Point, end: Point) -> Self {
        Self::new(ConnectorKind::Straight, begin, end)
    }

    pub fn curved(begin: Point, end: Point) -> Self {
        Self::new(ConnectorKind::Curved, begin, end)
    }

    fn new(kind: ConnectorKind, begin: Point, end: Point) -> Self {
        Self {
            kind,
            begin,
            end,
            line: Line::default(),
        }
    }

    pub fn line(mut self, line: Line) -> Self {
        self.line = line;
        self
    }

    /// Bounding box spanned by the two end points.
    pub fn frame(&self) -> Frame {
        Frame {
            x: self.begin.x.min(self.end.x),
            y: self.begin.y.min(self.end.y),
            cx: Emu((self.end.x.0 - self.begin.x.0).abs()),
            cy: Emu((self.end.y.0 - self.begin.y.0).abs()),
        }
    }

    /// The line runs right to left.
    pub fn flip_h(&self) -> bool {
        self.end.x < self.begin.x
    }

    /// The line runs bottom to top.
    pub fn flip_v(&self) -> bool {
        self.end.y < self.begin.y
    }
}

/// A grid of text cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub frame: Frame,
    pub columns: Vec<Emu>,
    pub rows: Vec<Vec<TextBody>>,
}

impl Table {
    /// Columns share the frame width evenly until `column_widths` says
    /// otherwise. Short rows are padded with empty cells.
    pub fn new(frame: Frame, rows: Vec<Vec<String>>) -> Self {
        let column_count = rows.iter().map(Vec::len).max().unwrap_or(0);
        let columns = if column_count == 0 {
            Vec::new()
        } else {
            vec![Emu(frame.cx.0 / column_count as i64); column_count]
        };
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<TextBody> = row.into_iter().map(TextBody::single).collect();
                cells.resize_with(column_count, TextBody::default);
                cells
            })
            .collect();

        Self {
            frame,
            columns,
            rows,
        }
    }

    /// Replace column widths. Widths beyond the column count are ignored.
    pub fn column_widths(mut self, widths: &[Emu]) -> Self {
        for (column, width) in self.columns.iter_mut().zip(widths) {
            *column = *width;
        }
        self
    }

    /// Restyle every paragraph of every cell.
    pub fn map_cells(mut self, f: impl Fn(Paragraph) -> Paragraph) -> Self {
        for cell in self.rows.iter_mut().flatten() {
            *cell = std::mem::take(cell).map_all(&f);
        }
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Every row gets an equal share of the frame height.
    pub fn row_height(&self) -> Emu {
        match self.rows.len() {
            0 => self.frame.cy,
            n => Emu(self.frame.cy.0 / n as i64),
        }
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TextBody> {
        self.rows.get(row).and_then(|r| r.get(column))
    }
}

/// Coarse shape classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    TextBox,
    Rectangle,
    Oval,
    Connector,
    Table,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ShapeKind::TextBox => "TextBox",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Oval => "Oval",
            ShapeKind::Connector => "Connector",
            ShapeKind::Table => "Table",
        };
        f.write_str(name)
    }
}

/// A positioned visual element on a slide.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    TextBox(TextBox),
    AutoShape(AutoShape),
    Connector(Connector),
    Table(Table),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::TextBox(_) => ShapeKind::TextBox,
            Shape::AutoShape(s) => match s.geometry {
                Geometry::Rectangle => ShapeKind::Rectangle,
                Geometry::Oval => ShapeKind::Oval,
            },
            Shape::Connector(_) => ShapeKind::Connector,
            Shape::Table(_) => ShapeKind::Table,
        }
    }
}

impl From<TextBox> for Shape {
    fn from(shape: TextBox) -> Self {
        Shape::TextBox(shape)
    }
}

impl From<AutoShape> for Shape {
    fn from(shape: AutoShape) -> Self {
        Shape::AutoShape(shape)
    }
}

impl From<Connector> for Shape {
    fn from(shape: Connector) -> Self {
        Shape::Connector(shape)
    }
}

impl From<Table> for Shape {
    fn from(shape: Table) -> Self {
        Shape::Table(shape)
    }
}

/// One page of the deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    background: Rgb,
    shapes: Vec<Shape>,
}

impl Slide {
    /// An empty slide with a solid background.
    pub fn new(background: Rgb) -> Self {
        Self {
            background,
            shapes: Vec::new(),
        }
    }

    /// Place a shape on top of those already on the slide.
    pub fn push(&mut self, shape: impl Into<Shape>) {
        self.shapes.push(shape.into());
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }
}

/// The whole presentation. Slides can only be appended.
#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    title: String,
    author: String,
    width: Emu,
    height: Emu,
    slides: Vec<Slide>,
}

impl Deck {
    /// An empty 16:9 deck (13.333 in × 7.5 in).
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            width: Emu::inches(13.333),
            height: Emu::inches(7.5),
            slides: Vec::new(),
        }
    }

    /// Append a finished slide.
    pub fn add_slide(&mut self, slide: Slide) {
        self.slides.push(slide);
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn width(&self) -> Emu {
        self.width
    }

    pub fn height(&self) -> Emu {
        self.height
    }
}
