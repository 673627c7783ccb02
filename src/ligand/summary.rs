use serde::Serialize;

use super::{BindingStrength, Ligand, StrengthThresholds};

/// Headline metrics for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LigandSummary {
    pub total: usize,
    pub top_candidate: Ligand,
    pub average_affinity: f64,
    pub strong: usize,
    pub moderate: usize,
    pub weak: usize,
}

impl LigandSummary {
    /// `None` for an empty list; there is nothing to summarize.
    pub fn from_ligands(ligands: &[Ligand], thresholds: &StrengthThresholds) -> Option<Self> {
        let top_candidate = ligands.first()?.clone();
        let total = ligands.len();
        let sum: f64 = ligands.iter().map(|ligand| ligand.binding_affinity).sum();

        let (mut strong, mut moderate, mut weak) = (0, 0, 0);
        for ligand in ligands {
            match thresholds.classify(ligand.binding_affinity) {
                BindingStrength::Strong => strong += 1,
                BindingStrength::Moderate => moderate += 1,
                BindingStrength::Weak => weak += 1,
            }
        }

        Some(Self {
            total,
            top_candidate,
            average_affinity: sum / total as f64,
            strong,
            moderate,
            weak,
        })
    }

    pub fn share_text(&self) -> String {
        format!(
            "Analysis complete: {} ligands analyzed. Top candidate: {} (ΔG: {} kcal/mol)",
            self.total, self.top_candidate.ligand_name, self.top_candidate.binding_affinity
        )
    }
}
