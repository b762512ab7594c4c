//! Slide-by-slide layout of the Taste Infrastructure deck.
//!
//! Geometry is in inches and font sizes in points, both fixed. Text comes
//! from [`DeckContent`].

use crate::content::{
    ArbitrageSlide, ClaimSlide, CredibilitySlide, DeckContent, EconomicsSlide, EnterpriseSlide,
    GatekeeperSlide, InversionSlide, JudgmentSlide, OpeningSlide, PredictionsSlide,
    ReferencesSlide, WarningSlide,
};
use crate::palette::{
    Tone, ACCENT, CODE_BG, CODE_EDGE, MIST, PANEL, PANEL_EDGE, SOFT_GRAY, TEXT_GRAY,
    TEXT_ON_DARK, TEXT_ON_LIGHT,
};
use crate::types::{
    Alignment, AutoShape, Connector, DashStyle, Deck, Emu, Fill, Frame, Line, Point, Run, Slide,
    Table, TextBody, TextBox,
};

/// Number of slides the deck always has.
pub const SLIDE_COUNT: usize = 12;

/// Builds the deck from its text content.
#[derive(Debug, Clone, Default)]
pub struct DeckAssembler;

impl DeckAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Lay out all twelve slides in presentation order.
    pub fn assemble(&self, content: &DeckContent) -> Deck {
        let mut deck = Deck::new(&content.title, &content.author);

        let slides = [
            opening(&content.opening),
            warning(&content.warning),
            inversion(&content.inversion),
            judgment(&content.judgment),
            economics(&content.economics),
            enterprise(&content.enterprise),
            arbitrage(&content.arbitrage),
            gatekeeper(&content.gatekeeper),
            predictions(&content.predictions),
            credibility(&content.credibility),
            claim(&content.claim),
            references(&content.references),
        ];

        for (idx, slide) in slides.into_iter().enumerate() {
            log::debug!(
                "Assembled slide {} with {} shapes",
                idx + 1,
                slide.shapes().len()
            );
            deck.add_slide(slide);
        }

        deck
    }
}

/// Small gray section marker in the top-left corner.
fn section_label(text: &str) -> TextBox {
    TextBox::new(Frame::inches(1.0, 0.5, 5.0, 0.5), text)
        .size(12.0)
        .color(TEXT_GRAY)
}

/// Bold slide headline under the section label.
fn headline(frame: Frame, text: &str, size: f64, tone: Tone) -> TextBox {
    TextBox::new(frame, text)
        .size(size)
        .color(tone.text())
        .bold(true)
}

/// Chart axes shared by the two graph slides.
fn axes(slide: &mut Slide) {
    slide.push(
        Connector::straight(Point::inches(1.5, 2.5), Point::inches(1.5, 6.0))
            .line(Line::solid(TEXT_GRAY)),
    );
    slide.push(
        Connector::straight(Point::inches(1.5, 6.0), Point::inches(10.0, 6.0))
            .line(Line::solid(TEXT_GRAY)),
    );
}

fn opening(c: &OpeningSlide) -> Slide {
    let tone = Tone::Dark;
    let mut slide = Slide::new(tone.background());

    slide.push(
        TextBox::new(Frame::inches(1.0, 1.0, 10.0, 0.5), &c.label)
            .size(14.0)
            .color(TEXT_GRAY),
    );
    slide.push(headline(
        Frame::inches(1.0, 1.8, 11.0, 2.0),
        &c.title,
        44.0,
        tone,
    ));

    let runs = c
        .subtitle
        .iter()
        .map(|span| {
            let run = Run::new(&span.text);
            if span.accent {
                run.color(ACCENT)
            } else {
                run
            }
        })
        .collect();
    slide.push(
        TextBox::rich(Frame::inches(1.0, 4.0, 11.0, 1.0), runs)
            .size(24.0)
            .color(TEXT_ON_DARK),
    );

    slide.push(
        TextBox::new(Frame::inches(1.0, 5.5, 8.0, 1.0), &c.byline)
            .size(14.0)
            .color(TEXT_GRAY),
    );
    slide.push(
        TextBox::new(Frame::inches(1.0, 6.5, 4.0, 0.5), &c.date)
            .size(14.0)
            .color(TEXT_GRAY),
    );

    slide
}

fn warning(c: &WarningSlide) -> Slide {
    let tone = Tone::Light;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));

    // Dark callout on a light slide
    slide.push(
        AutoShape::rectangle(Frame::inches(1.0, 2.2, 11.3, 2.0))
            .fill(Fill::Solid(Tone::Dark.background()))
            .line(Line::solid(ACCENT).width(Emu::points(3.0)))
            .text(TextBody::single(&c.callout).map_all(|p| {
                p.color(SOFT_GRAY).size(16.0).align(Alignment::Center)
            })),
    );

    slide.push(
        TextBox::new(Frame::inches(1.0, 5.0, 5.0, 2.0), &c.villain)
            .size(18.0)
            .color(TEXT_ON_LIGHT),
    );

    slide.push(
        AutoShape::rectangle(Frame::inches(6.5, 5.0, 5.8, 1.5))
            .fill(Fill::Solid(ACCENT))
            .line(Line::none())
            .text(TextBody::single(&c.hero).map_all(|p| {
                p.color(TEXT_ON_DARK).bold(true).align(Alignment::Center)
            })),
    );

    slide
}

fn inversion(c: &InversionSlide) -> Slide {
    let tone = Tone::Dark;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));

    axes(&mut slide);

    slide.push(
        Connector::curved(Point::inches(1.5, 3.0), Point::inches(10.0, 5.8)).line(
            Line::solid(TEXT_GRAY)
                .dash(DashStyle::Dash)
                .width(Emu::points(2.0)),
        ),
    );
    slide.push(
        TextBox::new(Frame::inches(10.1, 5.6, 3.0, 0.5), &c.generation_label)
            .size(12.0)
            .color(TEXT_GRAY),
    );

    slide.push(
        Connector::curved(Point::inches(1.5, 3.2), Point::inches(10.0, 3.0))
            .line(Line::solid(ACCENT).width(Emu::points(4.0))),
    );
    slide.push(
        TextBox::new(Frame::inches(10.1, 2.8, 3.0, 0.5), &c.evaluation_label)
            .size(12.0)
            .color(ACCENT)
            .bold(true),
    );

    slide.push(
        TextBox::new(Frame::inches(5.0, 3.5, 3.0, 1.0), &c.danger_zone)
            .size(12.0)
            .color(ACCENT)
            .align(Alignment::Center),
    );

    slide.push(
        TextBox::new(Frame::inches(1.0, 6.5, 11.0, 1.0), &c.points)
            .size(16.0)
            .color(TEXT_ON_DARK),
    );

    slide
}

fn judgment(c: &JudgmentSlide) -> Slide {
    let tone = Tone::Light;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 11.0, 1.2),
        &c.title,
        32.0,
        tone,
    ));
    slide.push(
        TextBox::new(Frame::inches(1.0, 2.5, 10.0, 1.0), &c.tagline)
            .size(20.0)
            .color(ACCENT)
            .bold(true),
    );

    slide.push(
        AutoShape::rectangle(Frame::inches(1.0, 4.0, 5.0, 2.0))
            .fill(Fill::Solid(MIST))
            .line(Line::none())
            .text(
                TextBody::from_paragraphs(&c.human)
                    .map_paragraph(0, |p| p.size(14.0))
                    .map_paragraph(1, |p| p.size(24.0).bold(true).color(TEXT_ON_LIGHT)),
            ),
    );

    slide.push(
        AutoShape::rectangle(Frame::inches(6.5, 4.0, 5.0, 2.0))
            .fill(Fill::Solid(ACCENT))
            .line(Line::none())
            .text(
                TextBody::from_paragraphs(&c.system)
                    .map_paragraph(0, |p| p.size(14.0).color(TEXT_ON_DARK))
                    .map_paragraph(1, |p| p.size(24.0).bold(true).color(TEXT_ON_DARK))
                    .map_paragraph(2, |p| p.color(TEXT_ON_DARK)),
            ),
    );

    slide.push(
        TextBox::new(Frame::inches(1.0, 6.2, 11.0, 1.0), &c.quote)
            .size(16.0)
            .color(TEXT_GRAY)
            .italic(true),
    );

    slide
}

/// Dark panel with an accent heading paragraph.
fn panel(frame: Frame, paragraphs: &[String]) -> AutoShape {
    AutoShape::rectangle(frame)
        .fill(Fill::Solid(PANEL))
        .line(Line::solid(PANEL_EDGE))
        .text(
            TextBody::from_paragraphs(paragraphs)
                .map_paragraph(0, |p| p.bold(true).color(ACCENT)),
        )
}

fn economics(c: &EconomicsSlide) -> Slide {
    let tone = Tone::Dark;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));
    slide.push(
        TextBox::new(Frame::inches(1.0, 2.2, 10.0, 0.5), &c.lead)
            .size(18.0)
            .color(TEXT_ON_DARK),
    );

    slide.push(panel(Frame::inches(1.0, 3.5, 5.0, 2.5), &c.rule));
    slide.push(panel(Frame::inches(6.5, 3.5, 5.0, 2.5), &c.constraints));

    slide
}

fn enterprise(c: &EnterpriseSlide) -> Slide {
    let tone = Tone::Light;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));

    let columns = [
        (1.0, &c.nightmare_heading, &c.nightmare),
        (6.5, &c.math_heading, &c.math),
    ];
    for (left, heading, body) in columns {
        slide.push(
            TextBox::new(Frame::inches(left, 2.5, 5.0, 0.5), heading)
                .size(16.0)
                .color(ACCENT)
                .bold(true),
        );
        slide.push(
            TextBox::new(Frame::inches(left, 3.2, 5.0, 2.0), body)
                .size(14.0)
                .color(TEXT_ON_LIGHT),
        );
    }

    slide
}

fn arbitrage(c: &ArbitrageSlide) -> Slide {
    let tone = Tone::Light;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));

    axes(&mut slide);

    // Falling line
    slide.push(
        Connector::straight(Point::inches(1.5, 2.5), Point::inches(10.0, 5.8))
            .line(Line::solid(TEXT_GRAY).dash(DashStyle::Dash)),
    );
    slide.push(
        TextBox::new(Frame::inches(10.1, 5.6, 2.0, 0.5), &c.tech_label)
            .size(10.0)
            .color(TEXT_GRAY),
    );

    // Rising line
    slide.push(
        Connector::straight(Point::inches(1.5, 5.8), Point::inches(10.0, 2.5))
            .line(Line::solid(ACCENT).width(Emu::points(4.0))),
    );
    slide.push(
        TextBox::new(Frame::inches(10.1, 2.3, 2.0, 0.5), &c.judgment_label)
            .size(10.0)
            .color(ACCENT)
            .bold(true),
    );

    slide.push(
        AutoShape::oval(Frame::inches(5.5, 3.8, 0.4, 0.4))
            .fill(Fill::NoFill)
            .line(Line::solid(ACCENT)),
    );
    slide.push(
        TextBox::new(Frame::inches(5.0, 3.2, 2.0, 0.5), &c.crossover)
            .size(12.0)
            .color(ACCENT)
            .bold(true),
    );

    for (left, text) in [(1.0, &c.cto), (5.0, &c.investor), (9.0, &c.founder)] {
        slide.push(
            TextBox::new(Frame::inches(left, 6.5, 3.0, 0.8), text)
                .size(12.0)
                .color(TEXT_ON_LIGHT)
                .bold(true),
        );
    }

    slide
}

fn gatekeeper(c: &GatekeeperSlide) -> Slide {
    let tone = Tone::Dark;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        30.0,
        tone,
    ));

    slide.push(
        AutoShape::rectangle(Frame::inches(1.0, 2.2, 11.3, 4.0))
            .fill(Fill::Solid(CODE_BG))
            .line(Line::solid(CODE_EDGE))
            .text(
                TextBody::from_paragraphs(&c.funnel)
                    .map_all(|p| p.font_name("Courier New").size(14.0).color(SOFT_GRAY)),
            ),
    );

    slide.push(
        TextBox::new(Frame::inches(1.0, 6.4, 11.0, 0.8), &c.litmus)
            .size(14.0)
            .color(ACCENT),
    );

    slide
}

fn predictions(c: &PredictionsSlide) -> Slide {
    let tone = Tone::Light;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));

    let rows = std::iter::once(&c.header)
        .chain(&c.bets)
        .map(|row| row.to_vec())
        .collect();
    slide.push(
        Table::new(Frame::inches(1.0, 2.5, 11.3, 3.0), rows)
            .column_widths(&[Emu::inches(3.0), Emu::inches(8.3)])
            .map_cells(|p| p.size(14.0).color(TEXT_ON_LIGHT)),
    );

    slide
}

fn credibility(c: &CredibilitySlide) -> Slide {
    let tone = Tone::Dark;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        36.0,
        tone,
    ));
    slide.push(
        TextBox::new(Frame::inches(1.0, 2.0, 11.0, 1.0), &c.intro)
            .size(16.0)
            .color(SOFT_GRAY),
    );

    slide.push(
        AutoShape::rectangle(Frame::inches(1.0, 3.2, 5.5, 3.0))
            .fill(Fill::NoFill)
            .line(Line::solid(ACCENT))
            .text(
                TextBody::from_paragraphs(&c.save)
                    .map_paragraph(0, |p| p.bold(true).color(ACCENT))
                    .map_paragraph(1, |p| p.color(TEXT_ON_DARK))
                    .map_paragraph(2, |p| p.color(TEXT_ON_DARK))
                    .map_paragraph(3, |p| p.color(TEXT_ON_DARK)),
            ),
    );

    slide.push(
        AutoShape::rectangle(Frame::inches(6.8, 3.2, 5.5, 3.0))
            .fill(Fill::NoFill)
            .line(Line::solid(TEXT_GRAY))
            .text(
                TextBody::from_paragraphs(&c.background)
                    .map_paragraph(0, |p| p.bold(true).color(TEXT_GRAY))
                    .map_paragraphs_from(1, |p| p.color(TEXT_ON_DARK)),
            ),
    );

    slide
}

fn claim(c: &ClaimSlide) -> Slide {
    let tone = Tone::Dark;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));

    slide.push(
        TextBox::new(Frame::inches(1.5, 2.0, 10.3, 2.0), &c.statement)
            .size(32.0)
            .color(TEXT_ON_DARK)
            .align(Alignment::Center),
    );
    slide.push(
        TextBox::new(Frame::inches(1.5, 3.8, 10.3, 1.5), &c.call)
            .size(80.0)
            .color(ACCENT)
            .bold(true)
            .align(Alignment::Center),
    );
    slide.push(
        TextBox::new(Frame::inches(1.5, 6.0, 10.3, 1.0), &c.contact)
            .size(16.0)
            .color(TEXT_GRAY)
            .align(Alignment::Center),
    );

    slide
}

fn references(c: &ReferencesSlide) -> Slide {
    let tone = Tone::Light;
    let mut slide = Slide::new(tone.background());

    slide.push(section_label(&c.label));
    slide.push(headline(
        Frame::inches(1.0, 1.0, 10.0, 1.0),
        &c.title,
        32.0,
        tone,
    ));
    slide.push(
        TextBox::new(
            Frame::inches(1.0, 2.5, 10.0, 4.0),
            c.references.join("\n"),
        )
        .size(18.0)
        .color(TEXT_ON_LIGHT),
    );

    slide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{DARK_BG, LIGHT_BG};
    use crate::types::{Shape, ShapeKind};

    fn deck() -> Deck {
        let content = DeckContent::builtin().unwrap();
        DeckAssembler::new().assemble(&content)
    }

    #[test]
    fn test_twelve_slides() {
        assert_eq!(deck().slide_count(), SLIDE_COUNT);
    }

    #[test]
    fn test_background_schedule() {
        let dark = [1, 3, 5, 8, 10, 11];
        for (idx, slide) in deck().slides().iter().enumerate() {
            let number = idx + 1;
            let expected = if dark.contains(&number) {
                DARK_BG
            } else {
                LIGHT_BG
            };
            assert_eq!(slide.background(), expected, "slide {}", number);
        }
    }

    #[test]
    fn test_shape_counts_per_slide() {
        let counts: Vec<usize> = deck().slides().iter().map(|s| s.shapes().len()).collect();
        assert_eq!(counts, vec![5, 5, 10, 6, 5, 6, 13, 4, 3, 5, 4, 3]);
    }

    #[test]
    fn test_predictions_table() {
        let deck = deck();
        let table = deck.slides()[8]
            .shapes()
            .iter()
            .find_map(|s| match s {
                Shape::Table(t) => Some(t),
                _ => None,
            })
            .unwrap();

        assert_eq!(table.row_count(), 4);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.columns, vec![Emu::inches(3.0), Emu::inches(8.3)]);

        let text = |r, c| table.cell(r, c).map(TextBody::text).unwrap();
        assert_eq!(text(0, 0), "The Bet");
        assert_eq!(text(0, 1), "The Stakes");
        assert_eq!(text(1, 0), "The Talent Filter");
        assert_eq!(
            text(1, 1),
            "By 2027, no F500 will promote an AI lead who cannot explain their eval metrics."
        );
        assert_eq!(text(2, 0), "The Budget Flip");
        assert_eq!(
            text(2, 1),
            "By 2028, enterprises will spend 3x more on Evaluation than on Foundation Models."
        );
        assert_eq!(text(3, 0), "The New Unicorn");
        assert_eq!(
            text(3, 1),
            "The next $10B AI company won't be a model lab. It will be an Eval Infra company."
        );

        let font = &table.rows[3][1].paragraphs[0].font;
        assert_eq!(font.size, Some(14.0));
        assert_eq!(font.color, Some(TEXT_ON_LIGHT));
    }

    #[test]
    fn test_opening_subtitle_accent_run() {
        let deck = deck();
        let subtitle = match &deck.slides()[0].shapes()[2] {
            Shape::TextBox(tb) => tb,
            other => panic!("expected text box, got {:?}", other.kind()),
        };
        let paragraph = &subtitle.body.paragraphs[0];
        assert_eq!(paragraph.font.size, Some(24.0));
        assert_eq!(paragraph.runs.len(), 2);
        assert_eq!(paragraph.runs[0].font.color, None);
        assert_eq!(paragraph.runs[1].font.color, Some(ACCENT));
    }

    #[test]
    fn test_arbitrage_graph_shapes() {
        let deck = deck();
        let slide = &deck.slides()[6];
        let kinds: Vec<ShapeKind> = slide.shapes().iter().map(Shape::kind).collect();
        assert_eq!(kinds.iter().filter(|k| **k == ShapeKind::Connector).count(), 4);
        assert_eq!(kinds.iter().filter(|k| **k == ShapeKind::Oval).count(), 1);

        let rising = slide
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::Connector(c) => Some(c),
                _ => None,
            })
            .last()
            .unwrap();
        assert!(rising.flip_v());
        assert_eq!(rising.line.width, Some(Emu::points(4.0)));
    }

    #[test]
    fn test_gatekeeper_funnel_is_monospace() {
        let deck = deck();
        let body = deck.slides()[7]
            .shapes()
            .iter()
            .find_map(|s| match s {
                Shape::AutoShape(a) => a.body.as_ref(),
                _ => None,
            })
            .unwrap();
        assert_eq!(body.paragraphs.len(), 11);
        assert!(body
            .paragraphs
            .iter()
            .all(|p| p.font.name.as_deref() == Some("Courier New")));
    }

    fn box_bodies(slide: &Slide) -> Vec<&TextBody> {
        slide
            .shapes()
            .iter()
            .filter_map(|s| match s {
                Shape::AutoShape(a) => a.body.as_ref(),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_only_warning_boxes_are_centered() {
        let deck = deck();

        let warning = box_bodies(&deck.slides()[1]);
        assert_eq!(warning.len(), 2);
        for body in warning {
            assert!(body
                .paragraphs
                .iter()
                .all(|p| p.align == Some(Alignment::Center)));
        }

        for idx in [3, 4, 7, 9] {
            let bodies = box_bodies(&deck.slides()[idx]);
            assert!(!bodies.is_empty(), "slide {}", idx + 1);
            for body in bodies {
                assert!(
                    body.paragraphs.iter().all(|p| p.align.is_none()),
                    "slide {}",
                    idx + 1
                );
            }
        }
    }

    #[test]
    fn test_judgment_quote_is_italic() {
        let deck = deck();
        let quote = match deck.slides()[3].shapes().last() {
            Some(Shape::TextBox(tb)) => tb,
            other => panic!("expected text box, got {:?}", other),
        };
        assert_eq!(quote.body.paragraphs[0].font.italic, Some(true));
        assert_eq!(quote.body.paragraphs[0].font.size, Some(16.0));
    }

    #[test]
    fn test_references_keep_blank_edge_lines() {
        let deck = deck();
        let list = match deck.slides()[11].shapes().last() {
            Some(Shape::TextBox(tb)) => tb,
            other => panic!("expected text box, got {:?}", other),
        };
        let text = list.body.text();
        assert!(text.starts_with("\nKahneman (2011)"));
        assert!(text.ends_with("Constitutional AI\n"));
    }

    #[test]
    fn test_short_box_content_does_not_panic() {
        let mut content = DeckContent::builtin().unwrap();
        content.judgment.system = vec!["Only a caption".to_string()];
        content.credibility.save.clear();
        let deck = DeckAssembler::new().assemble(&content);
        assert_eq!(deck.slide_count(), SLIDE_COUNT);
    }

    #[test]
    fn test_deck_metadata_from_content() {
        let deck = deck();
        assert_eq!(deck.title(), "Taste Infrastructure");
        assert_eq!(deck.author(), "Simone Leonelli");
    }
}
