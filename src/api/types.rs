use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ligand::{deserialize_optional_affinity, Ligand};

fn default_status() -> String {
    "completed".to_string()
}

/// A full analysis as returned by `POST /api/analyze` or
/// `GET /api/analyses/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub ranked_ligands: Vec<Ligand>,
    #[serde(default)]
    pub interactions: serde_json::Value,
    #[serde(default)]
    pub visualizations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_report_md: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attestation: Option<Attestation>,
    #[serde(default)]
    pub pdbqt_files: BTreeMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub notes: String,
}

impl AnalysisResult {
    /// Generated report text, whichever field the backend filled.
    pub fn report_text(&self) -> &str {
        self.report
            .as_deref()
            .filter(|text| !text.is_empty())
            .or(self.final_report_md.as_deref())
            .unwrap_or_default()
    }

    pub fn top_candidate(&self) -> Option<&Ligand> {
        self.ranked_ligands.first()
    }

    pub fn pdbqt_for(&self, ligand_name: &str) -> Option<&str> {
        self.pdbqt_files.get(ligand_name).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub transaction_signature: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_affinity")]
    pub affinity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexAttestation {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub transaction_signature: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMetadata {
    #[serde(default)]
    pub uploaded_files: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// One row of the analysis history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisIndexEntry {
    pub analysis_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub ligand_count: usize,
    #[serde(default)]
    pub top_candidate: Option<TopCandidate>,
    #[serde(default)]
    pub attestation: IndexAttestation,
    #[serde(default)]
    pub metadata: IndexMetadata,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisList {
    #[serde(default)]
    pub analyses: Vec<AnalysisIndexEntry>,
    #[serde(default)]
    pub total: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_affinity")]
    pub affinity: Option<f64>,
    #[serde(default)]
    pub analysis_id: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisStats {
    #[serde(default)]
    pub total_analyses: usize,
    #[serde(default)]
    pub total_ligands_tested: usize,
    #[serde(default)]
    pub verified_analyses: usize,
    #[serde(default)]
    pub best_overall_candidate: Option<BestCandidate>,
    #[serde(default)]
    pub total_projects: usize,
    #[serde(default)]
    pub total_tags: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagList {
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<String>,
}

/// Body of `PATCH /api/analyses/{id}/metadata`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataUpdate {
    pub tags: Vec<String>,
    pub project: String,
    pub notes: String,
}

/// Filters for `GET /api/analyses`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisQuery {
    pub search: Option<String>,
    pub tags: Vec<String>,
    pub project: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<u32>,
}

pub const DEFAULT_HISTORY_LIMIT: u32 = 50;

impl Default for AnalysisQuery {
    fn default() -> Self {
        Self {
            search: None,
            tags: Vec::new(),
            project: None,
            start_date: None,
            end_date: None,
            limit: Some(DEFAULT_HISTORY_LIMIT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_result_tolerates_sparse_payloads() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{
                "ranked_ligands": [
                    { "ligand_name": "L1", "binding_affinity": "-9.1" },
                    { "ligand_name": "L2", "binding_affinity": -7.4 }
                ],
                "final_report_md": "Report body",
                "attestation": { "success": true, "network": "devnet" }
            }"#,
        )
        .expect("valid payload");
        assert_eq!(result.status, "completed");
        assert_eq!(result.ranked_ligands.len(), 2);
        assert_eq!(result.top_candidate(), Some(&Ligand::new("L1", -9.1)));
        assert_eq!(result.report_text(), "Report body");
        assert!(result.attestation.as_ref().is_some_and(|a| a.success));
        assert!(result.pdbqt_for("L1").is_none());
    }

    #[test]
    fn report_field_wins_over_markdown_fallback() {
        let result: AnalysisResult = serde_json::from_str(
            r#"{ "report": "primary", "final_report_md": "fallback", "pdbqt_files": { "L1": "ATOM" } }"#,
        )
        .expect("valid payload");
        assert_eq!(result.report_text(), "primary");
        assert_eq!(result.pdbqt_for("L1"), Some("ATOM"));
    }

    #[test]
    fn index_entry_and_stats_parse_backend_shapes() {
        let list: AnalysisList = serde_json::from_str(
            r#"{ "analyses": [{
                "analysis_id": "analysis_20240101_abc",
                "timestamp": "2024-01-01T12:00:00",
                "ligand_count": 3,
                "top_candidate": { "name": "L1", "affinity": "-9.5" },
                "attestation": { "verified": false, "transaction_signature": null, "network": "devnet" },
                "metadata": { "uploaded_files": ["a.pdbqt"], "status": "complete" },
                "tags": ["kinase"], "project": "EGFR", "notes": ""
            }] }"#,
        )
        .expect("valid list");
        let entry = &list.analyses[0];
        assert_eq!(entry.ligand_count, 3);
        assert_eq!(
            entry.top_candidate.as_ref().and_then(|top| top.affinity),
            Some(-9.5)
        );
        assert_eq!(entry.metadata.uploaded_files, ["a.pdbqt"]);

        let stats: AnalysisStats = serde_json::from_str(
            r#"{ "total_analyses": 0, "total_ligands_tested": 0, "verified_analyses": 0,
                 "best_overall_candidate": null, "total_projects": 0, "total_tags": 0 }"#,
        )
        .expect("valid stats");
        assert_eq!(stats, AnalysisStats::default());
    }

    #[test]
    fn default_query_uses_history_limit() {
        assert_eq!(AnalysisQuery::default().limit, Some(50));
    }
}
