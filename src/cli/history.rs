//! History command implementation

use anyhow::{Context, Result};

use docksight::api::types::DEFAULT_HISTORY_LIMIT;
use docksight::api::{AnalysisQuery, ApiClient};
use docksight::config::AppConfig;

/// List stored analyses, newest first as the backend returns them
pub fn history_command(
    config: &AppConfig,
    search: Option<String>,
    tags: Vec<String>,
    project: Option<String>,
    limit: Option<u32>,
) -> Result<()> {
    let client = ApiClient::connect(config.api_base_url.as_str())?;
    let query = AnalysisQuery {
        search,
        tags,
        project,
        limit: Some(limit.unwrap_or(DEFAULT_HISTORY_LIMIT)),
        ..AnalysisQuery::default()
    };
    let list = client.list_analyses(&query).with_context(|| {
        format!("failed to load analysis history from {}", config.api_base_url)
    })?;

    if list.analyses.is_empty() {
        println!("No analyses found.");
        return Ok(());
    }

    println!("Analyses ({}):\n", list.total.unwrap_or(list.analyses.len()));
    for entry in &list.analyses {
        println!(
            "  {} {} - {} ligands",
            entry.analysis_id,
            entry.timestamp.as_deref().unwrap_or("unknown time"),
            entry.ligand_count
        );

        if let Some(top) = &entry.top_candidate {
            let name = top.name.as_deref().unwrap_or("unknown");
            match top.affinity {
                Some(affinity) => println!("    Top candidate: {name} ({affinity} kcal/mol)"),
                None => println!("    Top candidate: {name}"),
            }
        }

        if !entry.project.is_empty() {
            println!("    Project: {}", entry.project);
        }
        if !entry.tags.is_empty() {
            println!("    Tags: {}", entry.tags.join(", "));
        }
    }
    Ok(())
}
