use docksight::audit::render::render_text;
use docksight::audit::{audit_combinations, suggest, SuggestionKind};
use docksight::contrast::TextSize;
use docksight::palette::{builtin_combinations, revised_combinations, Palette, CONTRAST_FIXES};

#[test]
fn builtin_registry_fails_only_the_documented_pairs() {
    let palette = Palette::builtin();
    let report = audit_combinations(&builtin_combinations(), palette);
    let failing: Vec<_> = report
        .failing()
        .map(|result| (result.text_token.as_str(), result.background_token.as_str()))
        .collect();

    assert_eq!(failing.len(), CONTRAST_FIXES.len());
    assert!(failing.contains(&("blue-500", "white")));
    assert!(report.results().iter().all(|result| result.error.is_none()));
}

#[test]
fn every_failure_has_a_working_suggestion() {
    let palette = Palette::builtin();
    let report = audit_combinations(&builtin_combinations(), palette);
    for result in report.failing() {
        let text = result.text_hex.as_deref().expect("resolved text");
        let background = result.background_hex.as_deref().expect("resolved background");
        let outcome = suggest(text, background, TextSize::Normal, palette).expect("valid hex");
        let first = outcome
            .suggestions()
            .first()
            .unwrap_or_else(|| panic!("no suggestion for {}", result.context));
        assert!(first.resulting_ratio >= 4.5, "{first:?}");
        assert!(matches!(
            first.kind,
            SuggestionKind::Text | SuggestionKind::Background
        ));
    }
}

#[test]
fn revised_registry_renders_a_clean_report() {
    let palette = Palette::builtin();
    let report = audit_combinations(&revised_combinations(), palette);
    assert!(report.all_pass());
    assert_eq!(report.len(), builtin_combinations().len());

    let text = render_text(&report, palette, TextSize::Normal);
    assert!(text.contains("Failing: 0"));
    assert!(text.ends_with("All combinations meet WCAG 2.1 AA.\n"));
}
