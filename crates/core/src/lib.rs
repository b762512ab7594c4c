//! Core document model, deck content, and slide assembly for the
//! Taste Infrastructure presentation.

pub mod assembler;
pub mod content;
pub mod error;
pub mod normalize;
pub mod palette;
pub mod summary;
pub mod types;

pub use assembler::{DeckAssembler, SLIDE_COUNT};
pub use content::DeckContent;
pub use error::{Error, Result};
pub use summary::{DeckSummary, ShapeSummary, SlideSummary, TableSummary};
pub use types::{
    Alignment, AutoShape, Connector, ConnectorKind, DashStyle, Deck, Emu, Fill, Font, Frame,
    Geometry, Line, Paragraph, Point, Rgb, Run, Shape, ShapeKind, Slide, Table, TextBody, TextBox,
};
