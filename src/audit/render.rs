use std::fmt::Write as _;

use super::{suggest, AuditReport, AuditResult, SuggestionKind};
use crate::contrast::TextSize;
use crate::palette::Palette;

const RULE_WIDTH: usize = 72;

/// Human-readable audit report: summary, failures with suggested fixes,
/// then passing combinations.
pub fn render_text(report: &AuditReport, palette: &Palette, size: TextSize) -> String {
    let summary = report.summary();
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "WCAG 2.1 AA contrast audit");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "Total: {}  Passing: {}  Failing: {}",
        summary.total, summary.passing, summary.failing
    );

    if summary.failing > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "FAILING ({})", summary.failing);
        for result in report.failing() {
            write_failure(&mut out, result, palette, size);
        }
    }

    if summary.passing > 0 {
        let _ = writeln!(out);
        let _ = writeln!(out, "PASSING ({})", summary.passing);
        for result in report.passing() {
            let ratio = result.ratio.unwrap_or_default();
            let _ = writeln!(
                out,
                "  ok  {:.2}:1  {} on {}  ({})",
                ratio, result.text_token, result.background_token, result.context
            );
        }
    }

    if report.all_pass() {
        let _ = writeln!(out);
        let _ = writeln!(out, "All combinations meet WCAG 2.1 AA.");
    }
    out
}

fn write_failure(out: &mut String, result: &AuditResult, palette: &Palette, size: TextSize) {
    let _ = writeln!(out, "  {}", result.context);
    if let Some(error) = &result.error {
        let _ = writeln!(out, "    error: {error}");
        return;
    }

    let (Some(text_hex), Some(background_hex)) = (&result.text_hex, &result.background_hex)
    else {
        return;
    };
    let _ = writeln!(
        out,
        "    text: {} ({text_hex})  background: {} ({background_hex})",
        result.text_token, result.background_token
    );
    if let (Some(normal), Some(large)) = (result.normal_text, result.large_text) {
        let _ = writeln!(
            out,
            "    ratio: {:.2}:1  normal text (>= {}): {}  large text (>= {}): {}",
            normal.ratio, normal.required, normal.level, large.required, large.level
        );
    }

    match suggest(text_hex, background_hex, size, palette) {
        Ok(outcome) => {
            for suggestion in outcome.suggestions() {
                let slot = match suggestion.kind {
                    SuggestionKind::Text => "text",
                    SuggestionKind::Background => "background",
                };
                let _ = writeln!(
                    out,
                    "    try {slot} {} ({}) -> {:.2}:1",
                    suggestion.candidate_token, suggestion.candidate_hex, suggestion.resulting_ratio
                );
            }
        }
        Err(err) => {
            tracing::debug!(%err, context = result.context.as_str(), "no suggestions");
        }
    }
}

pub fn render_json(report: &AuditReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::audit_combinations;
    use crate::palette::{builtin_combinations, revised_combinations, Combination};

    #[test]
    fn text_report_lists_failures_with_suggestions() {
        let report = audit_combinations(&builtin_combinations(), Palette::builtin());
        let text = render_text(&report, Palette::builtin(), TextSize::Normal);

        assert!(text.contains("Total: 53  Passing: 46  Failing: 7"), "{text}");
        assert!(text.contains("Blue icon text on white"));
        assert!(text.contains("text: blue-500 (#3b82f6)"));
        assert!(text.contains("ratio: 3.68:1"));
        assert!(text.contains("try text neutral-700 (#404040) -> 10.37:1"));
        assert!(!text.contains("All combinations meet"));

        let failing_at = text.find("FAILING").expect("failing section");
        let passing_at = text.find("PASSING").expect("passing section");
        assert!(failing_at < passing_at);
    }

    #[test]
    fn text_report_for_revised_registry_has_no_failures() {
        let report = audit_combinations(&revised_combinations(), Palette::builtin());
        let text = render_text(&report, Palette::builtin(), TextSize::Normal);
        assert!(!text.contains("FAILING"));
        assert!(text.contains("All combinations meet WCAG 2.1 AA."));
    }

    #[test]
    fn text_report_shows_lookup_errors() {
        let report = audit_combinations(
            &[Combination::new("brand-500", "white", "Brand headline")],
            Palette::builtin(),
        );
        let text = render_text(&report, Palette::builtin(), TextSize::Normal);
        assert!(text.contains("Brand headline"));
        assert!(text.contains("error: Color not found: brand-500"));
    }

    #[test]
    fn json_report_serializes_results() {
        let report = audit_combinations(
            &[
                Combination::new("black", "white", "reference"),
                Combination::new("ghost", "white", "missing"),
            ],
            Palette::builtin(),
        );
        let json = render_json(&report).expect("serializable");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        let results = value["results"].as_array().expect("results array");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["ratio"], 21.0);
        assert_eq!(results[0]["normal_text"]["level"], "AA");
        assert!(results[0].get("error").is_none());
        assert_eq!(results[1]["error"], "Color not found: ghost");
        assert_eq!(results[1]["passes"], false);
    }
}
