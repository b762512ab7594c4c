//! End-to-end checks on the written Taste Infrastructure package.

use deck_core::content::Span;
use deck_core::palette::{DARK_BG, LIGHT_BG};
use deck_core::{Deck, DeckAssembler, DeckContent, ShapeKind, SLIDE_COUNT};
use deck_pptx::{PptxParser, PptxWriter};
use std::io::Cursor;

fn build_deck() -> Deck {
    let content = DeckContent::builtin().unwrap();
    DeckAssembler::new().assemble(&content)
}

#[test]
fn test_written_deck_has_twelve_slides_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Taste_Infrastructure_W230.pptx");

    PptxWriter::new().save(&build_deck(), &path).unwrap();
    let summary = PptxParser::new().parse_file(&path).unwrap();

    assert_eq!(summary.slide_count(), SLIDE_COUNT);
    for (idx, slide) in summary.slides.iter().enumerate() {
        assert_eq!(slide.number, idx + 1);
    }
}

#[test]
fn test_background_schedule_survives_writing() {
    let bytes = PptxWriter::new().to_bytes(&build_deck()).unwrap();
    let summary = PptxParser::new().parse(Cursor::new(bytes)).unwrap();

    let dark = [1, 3, 5, 8, 10, 11];
    for slide in &summary.slides {
        let expected = if dark.contains(&slide.number) {
            DARK_BG
        } else {
            LIGHT_BG
        };
        assert_eq!(slide.background, Some(expected), "slide {}", slide.number);
    }
}

#[test]
fn test_predictions_table_read_back() {
    let bytes = PptxWriter::new().to_bytes(&build_deck()).unwrap();
    let summary = PptxParser::new().parse(Cursor::new(bytes)).unwrap();

    let slide = &summary.slides[8];
    assert_eq!(slide.count(ShapeKind::Table), 1);

    let table = slide.tables()[0];
    assert_eq!(table.rows, 4);
    assert_eq!(table.columns, 2);
    assert_eq!(table.row(0), Some(vec!["The Bet", "The Stakes"]));
    assert_eq!(
        table.row(1),
        Some(vec![
            "The Talent Filter",
            "By 2027, no F500 will promote an AI lead who cannot explain their eval metrics."
        ])
    );
    assert_eq!(
        table.row(2),
        Some(vec![
            "The Budget Flip",
            "By 2028, enterprises will spend 3x more on Evaluation than on Foundation Models."
        ])
    );
    assert_eq!(
        table.row(3),
        Some(vec![
            "The New Unicorn",
            "The next $10B AI company won't be a model lab. It will be an Eval Infra company."
        ])
    );
}

#[test]
fn test_read_back_matches_in_memory_summary() {
    let deck = build_deck();
    let bytes = PptxWriter::new().to_bytes(&deck).unwrap();
    let read_back = PptxParser::new().parse(Cursor::new(bytes)).unwrap();

    let expected = deck.summary();
    assert_eq!(read_back.slide_count(), expected.slide_count());
    for (read, wanted) in read_back.slides.iter().zip(&expected.slides) {
        assert_eq!(read, wanted, "slide {}", wanted.number);
    }
}

#[test]
fn test_split_combining_mark_reads_back_as_summarized() {
    let mut content = DeckContent::builtin().unwrap();
    content.opening.subtitle = vec![
        Span {
            text: "Herme".into(),
            accent: false,
        },
        Span {
            text: "\u{300}s".into(),
            accent: true,
        },
    ];
    let deck = DeckAssembler::new().assemble(&content);

    let bytes = PptxWriter::new().to_bytes(&deck).unwrap();
    let read_back = PptxParser::new().parse(Cursor::new(bytes)).unwrap();

    let expected = deck.summary();
    assert_eq!(read_back.slides[0], expected.slides[0]);
    assert!(read_back.all_text().contains(&"Herme\u{300}s"));
}

#[test]
fn test_building_twice_is_identical() {
    let first = build_deck();
    let second = build_deck();
    assert_eq!(first.summary(), second.summary());

    let writer = PptxWriter::new();
    assert_eq!(writer.to_bytes(&first).unwrap(), writer.to_bytes(&second).unwrap());
}

#[test]
fn test_missing_directory_leaves_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("deck.pptx");

    assert!(PptxWriter::new().save(&build_deck(), &path).is_err());
    assert!(!path.exists());
    assert!(!dir.path().join("missing").exists());
}

#[test]
fn test_directory_destination_leaves_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("deck.pptx");
    std::fs::create_dir(&target).unwrap();

    assert!(PptxWriter::new().save(&build_deck(), &target).is_err());
    assert!(target.is_dir());
    assert_eq!(std::fs::read_dir(&target).unwrap().count(), 0);

    // Only the directory itself remains; the temporary file is gone.
    let entries: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec![std::ffi::OsString::from("deck.pptx")]);
}

#[test]
fn test_summary_lists_opening_text() {
    let bytes = PptxWriter::new().to_bytes(&build_deck()).unwrap();
    let summary = PptxParser::new().parse(Cursor::new(bytes)).unwrap();

    let texts = summary.all_text();
    assert!(texts.contains(&"The AI Revolution is Over.\nThe Evaluation Revolution Just Started."));
    assert!(texts.contains(&"When generation gets cheap, evaluation becomes the edge."));
}
