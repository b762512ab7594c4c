//! PPTX (Office Open XML) backend for deck documents.
//!
//! Writes a [`deck_core::Deck`] as a PresentationML package and reads a
//! package back into a [`deck_core::DeckSummary`].

pub mod package;
pub mod parser;
mod shape;
mod slide;
mod template;
pub mod writer;

pub use parser::PptxParser;
pub use writer::PptxWriter;
