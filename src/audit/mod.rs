//! Contrast audit over a registry of text/background usages.
//!
//! Auditing is a pure function of the combination list and the injected
//! palette. Formatting lives in [`render`]; nothing here prints.

use serde::Serialize;

use crate::contrast::{
    check_wcag_compliance, contrast_ratio, Compliance, TextSize, MAX_RATIO, MIN_RATIO,
};
use crate::palette::{Combination, Palette, PaletteError};

pub mod render;
pub mod suggest;

pub use suggest::{suggest, Suggestion, SuggestionKind, SuggestionOutcome};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditResult {
    pub text_token: String,
    pub background_token: String,
    pub context: String,
    pub text_hex: Option<String>,
    pub background_hex: Option<String>,
    /// Rounded to two decimals.
    pub ratio: Option<f64>,
    pub normal_text: Option<Compliance>,
    pub large_text: Option<Compliance>,
    pub passes: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AuditResult {
    fn flagged(combination: &Combination, error: String) -> Self {
        Self {
            text_token: combination.text.clone(),
            background_token: combination.background.clone(),
            context: combination.context.clone(),
            text_hex: None,
            background_hex: None,
            ratio: None,
            normal_text: None,
            large_text: None,
            passes: false,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuditSummary {
    pub total: usize,
    pub passing: usize,
    pub failing: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AuditReport {
    results: Vec<AuditResult>,
}

impl AuditReport {
    pub fn results(&self) -> &[AuditResult] {
        &self.results
    }

    pub fn passing(&self) -> impl Iterator<Item = &AuditResult> {
        self.results.iter().filter(|result| result.passes)
    }

    pub fn failing(&self) -> impl Iterator<Item = &AuditResult> {
        self.results.iter().filter(|result| !result.passes)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn all_pass(&self) -> bool {
        self.results.iter().all(|result| result.passes)
    }

    pub fn summary(&self) -> AuditSummary {
        let passing = self.passing().count();
        AuditSummary {
            total: self.results.len(),
            passing,
            failing: self.results.len() - passing,
        }
    }
}

pub fn audit_combinations(combinations: &[Combination], palette: &Palette) -> AuditReport {
    let results = combinations
        .iter()
        .map(|combination| audit_one(combination, palette))
        .collect();
    AuditReport { results }
}

fn audit_one(combination: &Combination, palette: &Palette) -> AuditResult {
    let missing = [&combination.text, &combination.background]
        .into_iter()
        .find(|token| !palette.contains(token));
    if let Some(token) = missing {
        tracing::debug!(
            token = token.as_str(),
            context = combination.context.as_str(),
            "unresolvable color token"
        );
        return AuditResult::flagged(combination, format!("Color not found: {token}"));
    }

    let resolved = palette
        .resolve(&combination.text)
        .and_then(|text| Ok((text, palette.resolve(&combination.background)?)));
    let (text, background) = match resolved {
        Ok(pair) => pair,
        Err(err) => return AuditResult::flagged(combination, describe_palette_error(&err)),
    };

    let ratio = contrast_ratio(text, background);
    debug_assert!(
        (MIN_RATIO..=MAX_RATIO + 1e-9).contains(&ratio),
        "contrast ratio out of bounds: {ratio}"
    );

    let normal_text = check_wcag_compliance(ratio, TextSize::Normal);
    let large_text = check_wcag_compliance(ratio, TextSize::Large);
    AuditResult {
        text_token: combination.text.clone(),
        background_token: combination.background.clone(),
        context: combination.context.clone(),
        text_hex: Some(text.to_hex()),
        background_hex: Some(background.to_hex()),
        ratio: Some(normal_text.ratio),
        normal_text: Some(normal_text),
        large_text: Some(large_text),
        passes: normal_text.passes,
        error: None,
    }
}

fn describe_palette_error(err: &PaletteError) -> String {
    match err {
        PaletteError::InvalidColor { token, source } => {
            format!("Invalid color for {token}: {source}")
        }
        other => other.to_string(),
    }
}
