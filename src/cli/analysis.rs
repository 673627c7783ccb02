//! Commands that work on a saved analysis result

use anyhow::{Context, Result};
use std::path::Path;

use docksight::api::AnalysisResult;
use docksight::chart::AffinityChart;
use docksight::config::AppConfig;
use docksight::export::{today, ExportFormat, ExportService};
use docksight::ligand::LigandSummary;
use docksight::report::ScientificReport;
use docksight::view::{render_view, LayoutMode, ViewMode};

fn load_analysis(path: &Path) -> Result<AnalysisResult> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not an analysis result", path.display()))
}

/// Write the ligand table into `dir` under the dated export filename
pub fn export_command(
    analysis_path: &Path,
    format: ExportFormat,
    dir: &Path,
    config: &AppConfig,
) -> Result<()> {
    let analysis = load_analysis(analysis_path)?;
    let service = ExportService::with_dir(dir);
    let path = service.save(
        &analysis.ranked_ligands,
        format,
        today(),
        &config.strength_thresholds,
    )?;
    println!(
        "Exported {} ligands to {}",
        analysis.ranked_ligands.len(),
        path.display()
    );
    Ok(())
}

pub fn report_command(analysis_path: &Path, config: &AppConfig) -> Result<()> {
    let analysis = load_analysis(analysis_path)?;
    let report = ScientificReport::generate(&analysis.ranked_ligands, &config.strength_thresholds)
        .context("analysis has no ranked ligands to report on")?;
    println!("{}", report.to_text());
    Ok(())
}

pub fn view_command(
    analysis_path: &Path,
    mode: ViewMode,
    layout: LayoutMode,
    config: &AppConfig,
) -> Result<()> {
    let analysis = load_analysis(analysis_path)?;
    let thresholds = &config.strength_thresholds;
    let Some(summary) = LigandSummary::from_ligands(&analysis.ranked_ligands, thresholds) else {
        println!("No ligands in this analysis.");
        return Ok(());
    };

    println!("{}\n", summary.share_text());
    println!(
        "{}",
        render_view(mode, layout, &analysis.ranked_ligands, thresholds)
    );
    Ok(())
}

pub fn chart_command(analysis_path: &Path, config: &AppConfig) -> Result<()> {
    let analysis = load_analysis(analysis_path)?;
    let Some(chart) =
        AffinityChart::from_ligands(&analysis.ranked_ligands, &config.strength_thresholds)
    else {
        println!("No ligands in this analysis.");
        return Ok(());
    };

    println!("{}", chart.to_json().context("failed to serialize chart")?);
    Ok(())
}
