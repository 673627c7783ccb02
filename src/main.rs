use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use docksight::export::ExportFormat;
use docksight::view::{LayoutMode, ViewMode};

mod cli;

#[derive(Parser)]
#[command(name = "docksight")]
#[command(about = "Docking results toolkit: contrast audits, ligand exports and reports")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit the UI color combinations against WCAG 2.1 AA
    Audit {
        /// Judge suggested replacements against the large-text threshold (3:1)
        #[arg(long)]
        large_text: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,

        /// Audit the combinations after the contrast fixes are applied
        #[arg(long)]
        revised: bool,

        /// Palette overrides file (defaults to the configured palette.json)
        #[arg(long)]
        palette: Option<PathBuf>,
    },

    /// Check one text/background pair (hex colors or palette tokens)
    Contrast {
        text: String,
        background: String,

        /// Use the large-text threshold (3:1)
        #[arg(long)]
        large_text: bool,
    },

    /// Write the ranked ligand table of an analysis to a CSV or TSV file
    Export {
        /// Analysis result JSON as returned by the backend
        analysis: PathBuf,

        #[arg(long, default_value = "csv")]
        format: ExportFormat,

        /// Output directory (defaults to export_dir from config.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Print the scientific report for an analysis
    Report {
        analysis: PathBuf,
    },

    /// Show the ranked ligands of an analysis as cards or a table
    View {
        analysis: PathBuf,

        #[arg(long, default_value = "cards")]
        mode: ViewMode,

        #[arg(long, default_value = "grid")]
        layout: LayoutMode,
    },

    /// Print the binding affinity bar-chart data of an analysis as JSON
    Chart {
        analysis: PathBuf,
    },

    /// List past analyses stored by the backend
    History {
        /// Free-text search over ligand names and notes
        #[arg(long)]
        search: Option<String>,

        /// Only analyses carrying this tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        project: Option<String>,

        #[arg(long)]
        limit: Option<u32>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    docksight::logging::init_with(cli.verbose);

    let config = docksight::config::load_app_config();
    tracing::debug!(api = config.api_base_url.as_str(), "configuration loaded");

    match cli.command {
        Commands::Audit {
            large_text,
            json,
            revised,
            palette,
        } => {
            let options = cli::audit::AuditOptions {
                large_text,
                json,
                revised,
                palette,
            };
            let all_pass = cli::audit::audit_command(&options)?;
            if !all_pass {
                std::process::exit(1);
            }
        }
        Commands::Contrast {
            text,
            background,
            large_text,
        } => {
            cli::contrast::contrast_command(&text, &background, large_text)?;
        }
        Commands::Export {
            analysis,
            format,
            out,
        } => {
            let dir = out.unwrap_or_else(|| config.export_dir());
            cli::analysis::export_command(&analysis, format, &dir, &config)?;
        }
        Commands::Report { analysis } => {
            cli::analysis::report_command(&analysis, &config)?;
        }
        Commands::View {
            analysis,
            mode,
            layout,
        } => {
            cli::analysis::view_command(&analysis, mode, layout, &config)?;
        }
        Commands::Chart { analysis } => {
            cli::analysis::chart_command(&analysis, &config)?;
        }
        Commands::History {
            search,
            tags,
            project,
            limit,
        } => {
            cli::history::history_command(&config, search, tags, project, limit)?;
        }
    }

    Ok(())
}
