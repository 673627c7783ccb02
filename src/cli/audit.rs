//! Audit command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;

use docksight::audit::audit_combinations;
use docksight::audit::render::{render_json, render_text};
use docksight::contrast::TextSize;
use docksight::palette::{
    builtin_combinations, load_configured_palette, load_palette_overrides, revised_combinations,
    Palette,
};

pub struct AuditOptions {
    pub large_text: bool,
    pub json: bool,
    pub revised: bool,
    pub palette: Option<PathBuf>,
}

/// Run the audit and print it. Returns whether every combination passed.
pub fn audit_command(options: &AuditOptions) -> Result<bool> {
    let palette = match &options.palette {
        Some(path) => {
            let overrides = load_palette_overrides(path).with_context(|| {
                format!("failed to load palette overrides from {}", path.display())
            })?;
            Palette::builtin().with_overrides(&overrides)
        }
        None => load_configured_palette().context("failed to load configured palette")?,
    };

    let combinations = if options.revised {
        revised_combinations()
    } else {
        builtin_combinations()
    };
    let report = audit_combinations(&combinations, &palette);

    if options.json {
        println!("{}", render_json(&report)?);
    } else {
        let size = TextSize::from_large_flag(options.large_text);
        print!("{}", render_text(&report, &palette, size));
    }

    let summary = report.summary();
    tracing::info!(
        total = summary.total,
        failing = summary.failing,
        revised = options.revised,
        "audit complete"
    );
    Ok(report.all_pass())
}
