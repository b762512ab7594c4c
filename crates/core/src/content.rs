//! Editable text of the deck.
//!
//! Slide layout lives in code; every piece of text lives here, one typed
//! section per slide. The built-in content is embedded as JSON and can be
//! replaced by a file with the same shape.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The built-in deck text.
pub const BUILTIN_CONTENT_JSON: &str = include_str!("../content/taste_infrastructure.json");

/// All text shown in the deck, plus document metadata.
///
/// A `\n` inside a string is a line break within one paragraph; a list of
/// strings is one paragraph per entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeckContent {
    /// Document title stored in the package properties.
    pub title: String,
    /// Document author stored in the package properties.
    pub author: String,
    pub opening: OpeningSlide,
    pub warning: WarningSlide,
    pub inversion: InversionSlide,
    pub judgment: JudgmentSlide,
    pub economics: EconomicsSlide,
    pub enterprise: EnterpriseSlide,
    pub arbitrage: ArbitrageSlide,
    pub gatekeeper: GatekeeperSlide,
    pub predictions: PredictionsSlide,
    pub credibility: CredibilitySlide,
    pub claim: ClaimSlide,
    pub references: ReferencesSlide,
}

/// A piece of rich text; accent spans are drawn in the accent color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Span {
    pub text: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub accent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpeningSlide {
    pub label: String,
    pub title: String,
    pub subtitle: Vec<Span>,
    pub byline: String,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WarningSlide {
    pub label: String,
    pub title: String,
    pub callout: String,
    pub villain: String,
    pub hero: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InversionSlide {
    pub label: String,
    pub title: String,
    pub generation_label: String,
    pub evaluation_label: String,
    pub danger_zone: String,
    pub points: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JudgmentSlide {
    pub label: String,
    pub title: String,
    pub tagline: String,
    /// Caption, figure, source.
    pub human: Vec<String>,
    /// Caption, figure, source.
    pub system: Vec<String>,
    pub quote: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EconomicsSlide {
    pub label: String,
    pub title: String,
    pub lead: String,
    /// Heading first.
    pub rule: Vec<String>,
    /// Heading first.
    pub constraints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnterpriseSlide {
    pub label: String,
    pub title: String,
    pub nightmare_heading: String,
    pub nightmare: String,
    pub math_heading: String,
    pub math: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArbitrageSlide {
    pub label: String,
    pub title: String,
    pub tech_label: String,
    pub judgment_label: String,
    pub crossover: String,
    pub cto: String,
    pub investor: String,
    pub founder: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatekeeperSlide {
    pub label: String,
    pub title: String,
    pub funnel: Vec<String>,
    pub litmus: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PredictionsSlide {
    pub label: String,
    pub title: String,
    pub header: [String; 2],
    pub bets: Vec<[String; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredibilitySlide {
    pub label: String,
    pub title: String,
    pub intro: String,
    /// Heading first.
    pub save: Vec<String>,
    /// Heading first.
    pub background: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClaimSlide {
    pub label: String,
    pub statement: String,
    pub call: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferencesSlide {
    pub label: String,
    pub title: String,
    pub references: Vec<String>,
}

impl DeckContent {
    /// The embedded content of the Taste Infrastructure deck.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CONTENT_JSON)
    }

    /// Parse and validate content from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        let content: DeckContent = serde_json::from_str(json)?;
        content.validate()?;
        Ok(content)
    }

    /// Read, parse and validate a content file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("Loading deck content from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Pretty-printed JSON in the same shape `from_json` accepts.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject content that would leave a slide without its key element.
    pub fn validate(&self) -> Result<()> {
        if self.opening.subtitle.iter().all(|s| s.text.trim().is_empty()) {
            return Err(Error::InvalidContent(
                "opening.subtitle must contain text".to_string(),
            ));
        }

        if self.predictions.bets.is_empty() {
            return Err(Error::InvalidContent(
                "predictions.bets must contain at least one row".to_string(),
            ));
        }

        if self.claim.call.trim().is_empty() {
            return Err(Error::InvalidContent("claim.call must not be empty".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_content_parses() {
        let content = DeckContent::builtin().unwrap();
        assert_eq!(content.title, "Taste Infrastructure");
        assert_eq!(content.opening.label, "Manifesto — Studio W230");
        assert_eq!(content.predictions.header, ["The Bet", "The Stakes"]);
        assert_eq!(content.predictions.bets.len(), 3);
        assert_eq!(content.predictions.bets[1][0], "The Budget Flip");
        assert_eq!(content.gatekeeper.funnel.len(), 11);
        assert_eq!(content.references.references.len(), 6);
        assert_eq!(content.references.references[0], "");
        assert_eq!(content.references.references[5], "");
    }

    #[test]
    fn test_opening_subtitle_has_accent_span() {
        let content = DeckContent::builtin().unwrap();
        let spans = &content.opening.subtitle;
        assert_eq!(spans.len(), 2);
        assert!(!spans[0].accent);
        assert!(spans[1].accent);
        assert_eq!(spans[1].text, "evaluation becomes the edge.");
    }

    #[test]
    fn test_json_round_trip_preserves_content() {
        let content = DeckContent::builtin().unwrap();
        let json = content.to_json_pretty().unwrap();
        assert_eq!(DeckContent::from_json(&json).unwrap(), content);
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(BUILTIN_CONTENT_JSON).unwrap();
        value["claim"]["cal"] = serde_json::Value::String("typo".to_string());
        let err = DeckContent::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, Error::ContentParseError(_)));
    }

    #[test]
    fn test_empty_bets_rejected() {
        let mut content = DeckContent::builtin().unwrap();
        content.predictions.bets.clear();
        assert!(matches!(content.validate(), Err(Error::InvalidContent(_))));
    }

    #[test]
    fn test_blank_subtitle_rejected() {
        let mut content = DeckContent::builtin().unwrap();
        content.opening.subtitle = vec![Span {
            text: "  ".to_string(),
            accent: true,
        }];
        assert!(matches!(content.validate(), Err(Error::InvalidContent(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = DeckContent::from_path("/nonexistent/deck-content.json").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
