//! Side-by-side comparison of ligands shared across analyses.

use std::collections::HashSet;

use serde::Serialize;

use crate::api::AnalysisResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub ligand_name: String,
    /// One affinity per analysis, in analysis order.
    pub affinities: Vec<f64>,
    /// Last minus first; negative means binding improved.
    pub improvement: f64,
}

impl ComparisonRow {
    /// Signed change such as `-1.20 kcal/mol`, or `None` when unchanged.
    pub fn improvement_label(&self) -> Option<String> {
        if self.improvement == 0.0 {
            return None;
        }
        let sign = if self.improvement > 0.0 { "+" } else { "" };
        Some(format!("{sign}{:.2} kcal/mol", self.improvement))
    }
}

/// Ligand names present in every analysis, in the first analysis's order.
pub fn overlapping_ligands(analyses: &[AnalysisResult]) -> Vec<String> {
    let [first, rest @ ..] = analyses else {
        return Vec::new();
    };
    if rest.is_empty() {
        return Vec::new();
    }

    let others: Vec<HashSet<&str>> = rest
        .iter()
        .map(|analysis| {
            analysis
                .ranked_ligands
                .iter()
                .map(|ligand| ligand.ligand_name.as_str())
                .collect()
        })
        .collect();

    let mut seen = HashSet::new();
    first
        .ranked_ligands
        .iter()
        .map(|ligand| ligand.ligand_name.as_str())
        .filter(|name| seen.insert(*name))
        .filter(|name| others.iter().all(|set| set.contains(name)))
        .map(str::to_string)
        .collect()
}

pub fn comparison_rows(analyses: &[AnalysisResult]) -> Vec<ComparisonRow> {
    overlapping_ligands(analyses)
        .into_iter()
        .map(|ligand_name| {
            let affinities: Vec<f64> = analyses
                .iter()
                .filter_map(|analysis| {
                    analysis
                        .ranked_ligands
                        .iter()
                        .find(|ligand| ligand.ligand_name == ligand_name)
                        .map(|ligand| ligand.binding_affinity)
                })
                .collect();
            let improvement = match (affinities.first(), affinities.last()) {
                (Some(first), Some(last)) if affinities.len() > 1 => last - first,
                _ => 0.0,
            };
            ComparisonRow {
                ligand_name,
                affinities,
                improvement,
            }
        })
        .collect()
}
