//! WCAG 2.1 contrast ratios and AA compliance verdicts.
//!
//! Ratios follow `(L_lighter + 0.05) / (L_darker + 0.05)` over relative
//! luminance, so every ratio lies in [1.0, 21.0] regardless of argument order.

use serde::{Deserialize, Serialize};

use crate::color::{parse_hex, relative_luminance, ColorResult, Rgb};

pub const MIN_RATIO: f64 = 1.0;
pub const MAX_RATIO: f64 = 21.0;

const AA_NORMAL_TEXT_RATIO: f64 = 4.5;
const AA_LARGE_TEXT_RATIO: f64 = 3.0;
const LARGE_TEXT_MIN_PX: f32 = 18.0;
const LARGE_BOLD_TEXT_MIN_PX: f32 = 14.0;
const BOLD_FONT_WEIGHT: u16 = 700;

/// Text size class that selects the AA threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextSize {
    #[default]
    Normal,
    Large,
}

impl TextSize {
    pub fn from_large_flag(is_large: bool) -> Self {
        if is_large {
            Self::Large
        } else {
            Self::Normal
        }
    }

    pub fn required_ratio(self) -> f64 {
        match self {
            Self::Normal => AA_NORMAL_TEXT_RATIO,
            Self::Large => AA_LARGE_TEXT_RATIO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceLevel {
    #[serde(rename = "AA")]
    Aa,
    Fail,
}

impl std::fmt::Display for ComplianceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aa => f.write_str("AA"),
            Self::Fail => f.write_str("Fail"),
        }
    }
}

/// Verdict for one ratio against one threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Compliance {
    pub passes: bool,
    /// Rounded to two decimals for reporting.
    pub ratio: f64,
    pub required: f64,
    pub level: ComplianceLevel,
}

pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast_ratio_hex(a: &str, b: &str) -> ColorResult<f64> {
    Ok(contrast_ratio(parse_hex(a)?, parse_hex(b)?))
}

pub fn round_ratio(ratio: f64) -> f64 {
    (ratio * 100.0).round() / 100.0
}

/// Judge `ratio` against the AA threshold for `size`. The unrounded ratio
/// decides the verdict.
pub fn check_wcag_compliance(ratio: f64, size: TextSize) -> Compliance {
    let required = size.required_ratio();
    let passes = ratio >= required;
    Compliance {
        passes,
        ratio: round_ratio(ratio),
        required,
        level: if passes {
            ComplianceLevel::Aa
        } else {
            ComplianceLevel::Fail
        },
    }
}

/// WCAG large text: 18px and up, or 14px and up at bold weight.
///
/// Callers decide whether to use this; the auditor takes the text size as
/// an explicit parameter.
pub fn is_large_text(font_size_px: f32, font_weight: u16) -> bool {
    font_size_px >= LARGE_TEXT_MIN_PX
        || (font_size_px >= LARGE_BOLD_TEXT_MIN_PX && font_weight >= BOLD_FONT_WEIGHT)
}
