//! Replacement colors for combinations that miss the AA threshold.

use serde::Serialize;

use crate::color::{parse_hex, ColorResult, Rgb};
use crate::contrast::{contrast_ratio, round_ratio, TextSize};
use crate::palette::Palette;

pub const MAX_SUGGESTIONS: usize = 3;

const DARKER_TEXT_CANDIDATES: &[&str] = &[
    "neutral-700",
    "neutral-800",
    "neutral-900",
    "neutral-950",
    "gray-700",
    "gray-800",
    "gray-900",
    "gray-950",
];

const LIGHTER_BACKGROUND_CANDIDATES: &[&str] =
    &["white", "neutral-50", "neutral-100", "gray-50", "gray-100"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Text,
    Background,
}

/// A palette token that fixes the pair when swapped into the `kind` slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub candidate_token: String,
    pub candidate_hex: String,
    pub resulting_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SuggestionOutcome {
    Compliant {
        current_ratio: f64,
    },
    NeedsImprovement {
        current_ratio: f64,
        required_ratio: f64,
        suggestions: Vec<Suggestion>,
    },
}

impl SuggestionOutcome {
    pub fn suggestions(&self) -> &[Suggestion] {
        match self {
            Self::Compliant { .. } => &[],
            Self::NeedsImprovement { suggestions, .. } => suggestions,
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, Self::Compliant { .. })
    }
}

/// First-fit search: darker text on the same background, then a lighter
/// background under the same text.
pub fn suggest(
    text_hex: &str,
    background_hex: &str,
    size: TextSize,
    palette: &Palette,
) -> ColorResult<SuggestionOutcome> {
    let text = parse_hex(text_hex)?;
    let background = parse_hex(background_hex)?;
    let required = size.required_ratio();
    let current = contrast_ratio(text, background);
    if current >= required {
        return Ok(SuggestionOutcome::Compliant {
            current_ratio: round_ratio(current),
        });
    }

    let text_swaps = DARKER_TEXT_CANDIDATES
        .iter()
        .map(|token| (SuggestionKind::Text, *token));
    let background_swaps = LIGHTER_BACKGROUND_CANDIDATES
        .iter()
        .map(|token| (SuggestionKind::Background, *token));

    let suggestions = text_swaps
        .chain(background_swaps)
        .filter_map(|(kind, token)| {
            let candidate = candidate_color(palette, token)?;
            let ratio = match kind {
                SuggestionKind::Text => contrast_ratio(candidate, background),
                SuggestionKind::Background => contrast_ratio(text, candidate),
            };
            (ratio >= required).then(|| Suggestion {
                kind,
                candidate_token: token.to_string(),
                candidate_hex: candidate.to_hex(),
                resulting_ratio: round_ratio(ratio),
            })
        })
        .take(MAX_SUGGESTIONS)
        .collect();

    Ok(SuggestionOutcome::NeedsImprovement {
        current_ratio: round_ratio(current),
        required_ratio: required,
        suggestions,
    })
}

fn candidate_color(palette: &Palette, token: &str) -> Option<Rgb> {
    match palette.resolve(token) {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::trace!(token, %err, "skipping suggestion candidate");
            None
        }
    }
}
