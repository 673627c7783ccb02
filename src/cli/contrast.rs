//! Contrast command implementation

use anyhow::{Context, Result};

use docksight::audit::suggest;
use docksight::color::{parse_hex, Rgb};
use docksight::contrast::{check_wcag_compliance, contrast_ratio, TextSize};
use docksight::palette::Palette;

/// Check one pair and print the ratio, both verdicts and any suggestions.
pub fn contrast_command(text: &str, background: &str, large_text: bool) -> Result<()> {
    let palette = Palette::builtin();
    let text_color = resolve_color(text, palette)?;
    let background_color = resolve_color(background, palette)?;
    let ratio = contrast_ratio(text_color, background_color);

    println!("{} on {}", text_color.to_hex(), background_color.to_hex());
    for size in [TextSize::Normal, TextSize::Large] {
        let verdict = check_wcag_compliance(ratio, size);
        let label = match size {
            TextSize::Normal => "Normal text",
            TextSize::Large => "Large text",
        };
        println!(
            "  {label} (>= {}): {:.2}:1 {}",
            verdict.required, verdict.ratio, verdict.level
        );
    }

    let size = TextSize::from_large_flag(large_text);
    let outcome = suggest(
        &text_color.to_hex(),
        &background_color.to_hex(),
        size,
        palette,
    )?;
    if !outcome.is_compliant() {
        if outcome.suggestions().is_empty() {
            println!("\nNo palette replacement reaches {}:1.", size.required_ratio());
        } else {
            println!("\nSuggestions:");
        }
        for suggestion in outcome.suggestions() {
            println!(
                "  {:?} {} ({}) -> {:.2}:1",
                suggestion.kind,
                suggestion.candidate_token,
                suggestion.candidate_hex,
                suggestion.resulting_ratio
            );
        }
    }
    Ok(())
}

/// Hex values start with `#`; anything else is a palette token.
fn resolve_color(input: &str, palette: &Palette) -> Result<Rgb> {
    if input.starts_with('#') {
        return Ok(parse_hex(input)?);
    }
    palette
        .resolve(input)
        .with_context(|| format!("{input} is neither a hex color nor a palette token"))
}
