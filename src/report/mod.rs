//! Copy-ready text for the generated scientific report.

use std::fmt::Write as _;

use crate::ligand::{ranked, Ligand, StrengthThresholds};

const RESULTS_HEADER: &str = "Rank\tCompound\tΔG (kcal/mol)\tBinding Strength";

const METHODS: &str = "Methods:\n\
Molecular docking simulations were performed using AutoDock Vina. Ligand structures were \
prepared in PDBQT format, and binding affinities (ΔG) were calculated for each ligand-protein \
complex. Compounds were ranked by predicted binding affinity in ascending order, where more \
negative values indicate stronger binding.";

const CITATION: &str = "Molecular docking analysis performed using DockSight AI (v0.1.0) with \
AutoDock Vina. Analysis verified on Solana blockchain for reproducibility.";

/// One independently copyable part of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSection {
    ResultsTable,
    KeyFindings,
    Methods,
    Discussion,
    Citation,
}

impl ReportSection {
    pub const ALL: [ReportSection; 5] = [
        Self::ResultsTable,
        Self::KeyFindings,
        Self::Methods,
        Self::Discussion,
        Self::Citation,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScientificReport {
    results_table: String,
    key_findings: String,
    discussion: String,
}

impl ScientificReport {
    /// `None` for an empty ligand list.
    pub fn generate(ligands: &[Ligand], thresholds: &StrengthThresholds) -> Option<Self> {
        let top = ligands.first()?;
        let last = ligands.last()?;

        let mut results_table = format!("{RESULTS_HEADER}\n");
        for row in ranked(ligands, thresholds) {
            let _ = writeln!(
                results_table,
                "{}\t{}\t{}\t{}",
                row.rank, row.ligand.ligand_name, row.ligand.binding_affinity, row.strength
            );
        }

        let key_findings = format!(
            "Key Findings:\n\
             • {} exhibited the strongest binding affinity ({} kcal/mol)\n\
             • Total of {} compounds evaluated\n\
             • Binding affinities ranged from {} to {} kcal/mol\n\
             • Top candidates warrant experimental validation",
            top.ligand_name,
            top.binding_affinity,
            ligands.len(),
            top.binding_affinity,
            last.binding_affinity
        );

        let runner_up = ligands
            .get(1)
            .map(|second| {
                format!(
                    " Additionally, {} showed competitive binding ({} kcal/mol) and may serve \
                     as an alternative scaffold.",
                    second.ligand_name, second.binding_affinity
                )
            })
            .unwrap_or_default();
        let discussion = format!(
            "Discussion:\n\
             The computational screening identified {} as the most promising candidate with a \
             binding affinity of {} kcal/mol, suggesting favorable interactions with the target \
             protein binding site.{runner_up} These computational predictions require \
             experimental validation.",
            top.ligand_name, top.binding_affinity
        );

        Some(Self {
            results_table,
            key_findings,
            discussion,
        })
    }

    pub fn section(&self, section: ReportSection) -> &str {
        match section {
            ReportSection::ResultsTable => &self.results_table,
            ReportSection::KeyFindings => &self.key_findings,
            ReportSection::Methods => METHODS,
            ReportSection::Discussion => &self.discussion,
            ReportSection::Citation => CITATION,
        }
    }

    pub fn to_text(&self) -> String {
        ReportSection::ALL
            .iter()
            .map(|section| self.section(*section).trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
