//! Colors shared by every slide of the deck.

use crate::types::Rgb;

/// Amber accent (`#F59E0B`).
pub const ACCENT: Rgb = Rgb::new(245, 158, 11);

pub const DARK_BG: Rgb = Rgb::new(26, 26, 26);
pub const LIGHT_BG: Rgb = Rgb::WHITE;

/// Body text on dark slides.
pub const TEXT_ON_DARK: Rgb = Rgb::WHITE;
/// Body text on light slides.
pub const TEXT_ON_LIGHT: Rgb = Rgb::BLACK;
pub const TEXT_GRAY: Rgb = Rgb::new(128, 128, 128);

/// Secondary text on dark panels.
pub const SOFT_GRAY: Rgb = Rgb::new(200, 200, 200);
pub const MIST: Rgb = Rgb::new(240, 240, 240);
pub const PANEL: Rgb = Rgb::new(50, 50, 50);
pub const PANEL_EDGE: Rgb = Rgb::new(100, 100, 100);
pub const CODE_BG: Rgb = Rgb::new(40, 40, 40);
pub const CODE_EDGE: Rgb = Rgb::new(60, 60, 60);

/// Background tone of a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Dark,
    Light,
}

impl Tone {
    pub fn background(self) -> Rgb {
        match self {
            Tone::Dark => DARK_BG,
            Tone::Light => LIGHT_BG,
        }
    }

    /// Default text color on this background.
    pub fn text(self) -> Rgb {
        match self {
            Tone::Dark => TEXT_ON_DARK,
            Tone::Light => TEXT_ON_LIGHT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tone_colors() {
        assert_eq!(Tone::Dark.background().hex(), "1A1A1A");
        assert_eq!(Tone::Light.background().hex(), "FFFFFF");
        assert_eq!(Tone::Dark.text(), Rgb::WHITE);
        assert_eq!(Tone::Light.text(), Rgb::BLACK);
        assert_eq!(ACCENT.hex(), "F59E0B");
    }
}
