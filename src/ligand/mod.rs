//! Docked ligands and their binding-strength classification.

use std::fmt;

use serde::{de, Deserialize, Deserializer, Serialize};

pub mod compare;
pub mod summary;

pub use summary::LigandSummary;

/// A small molecule with its predicted binding free energy (kcal/mol).
/// More negative means stronger binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ligand {
    pub ligand_name: String,
    #[serde(deserialize_with = "deserialize_affinity")]
    pub binding_affinity: f64,
}

impl Ligand {
    pub fn new(ligand_name: impl Into<String>, binding_affinity: f64) -> Self {
        Self {
            ligand_name: ligand_name.into(),
            binding_affinity,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAffinity {
    Number(f64),
    Text(String),
}

impl RawAffinity {
    fn into_value<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .ok_or_else(|| E::custom(format!("invalid binding affinity {text:?}"))),
        }
    }
}

fn deserialize_affinity<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    RawAffinity::deserialize(deserializer)?.into_value()
}

pub(crate) fn deserialize_optional_affinity<'de, D>(
    deserializer: D,
) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawAffinity>::deserialize(deserializer)?
        .map(RawAffinity::into_value)
        .transpose()
}

/// Affinity cutoffs in kcal/mol. `strong` must not exceed `moderate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthThresholds {
    pub strong: f64,
    pub moderate: f64,
}

pub const DEFAULT_STRENGTH_THRESHOLDS: StrengthThresholds = StrengthThresholds {
    strong: -9.0,
    moderate: -7.0,
};

impl StrengthThresholds {
    pub fn is_ordered(&self) -> bool {
        self.strong.is_finite() && self.moderate.is_finite() && self.strong <= self.moderate
    }

    pub fn classify(&self, affinity: f64) -> BindingStrength {
        if affinity <= self.strong {
            BindingStrength::Strong
        } else if affinity <= self.moderate {
            BindingStrength::Moderate
        } else {
            BindingStrength::Weak
        }
    }
}

impl Default for StrengthThresholds {
    fn default() -> Self {
        DEFAULT_STRENGTH_THRESHOLDS
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BindingStrength {
    Strong,
    Moderate,
    Weak,
}

impl BindingStrength {
    pub fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Moderate => "Moderate",
            Self::Weak => "Weak",
        }
    }
}

impl fmt::Display for BindingStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    PrimaryCandidate,
    Alternative,
    FurtherStudy,
}

impl Recommendation {
    /// `rank` is 1-based.
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => Self::PrimaryCandidate,
            2 => Self::Alternative,
            _ => Self::FurtherStudy,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PrimaryCandidate => "Primary candidate",
            Self::Alternative => "Alternative",
            Self::FurtherStudy => "Further study",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A ligand annotated with its 1-based rank and derived labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedLigand<'a> {
    pub rank: usize,
    pub ligand: &'a Ligand,
    pub strength: BindingStrength,
    pub recommendation: Recommendation,
}

/// Annotate ligands in the order given; the backend already sorts them.
pub fn ranked<'a>(
    ligands: &'a [Ligand],
    thresholds: &StrengthThresholds,
) -> impl Iterator<Item = RankedLigand<'a>> + 'a {
    let thresholds = *thresholds;
    ligands.iter().enumerate().map(move |(index, ligand)| {
        let rank = index + 1;
        RankedLigand {
            rank,
            ligand,
            strength: thresholds.classify(ligand.binding_affinity),
            recommendation: Recommendation::for_rank(rank),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_classify_inclusively() {
        let thresholds = DEFAULT_STRENGTH_THRESHOLDS;
        assert_eq!(thresholds.classify(-10.4), BindingStrength::Strong);
        assert_eq!(thresholds.classify(-9.0), BindingStrength::Strong);
        assert_eq!(thresholds.classify(-8.99), BindingStrength::Moderate);
        assert_eq!(thresholds.classify(-7.0), BindingStrength::Moderate);
        assert_eq!(thresholds.classify(-6.9), BindingStrength::Weak);
        assert_eq!(thresholds.classify(0.0), BindingStrength::Weak);
    }

    #[test]
    fn alternate_cutoffs_are_explicit_thresholds() {
        let dashboard = StrengthThresholds {
            strong: -8.0,
            moderate: -6.0,
        };
        assert_eq!(dashboard.classify(-8.5), BindingStrength::Strong);
        assert_eq!(DEFAULT_STRENGTH_THRESHOLDS.classify(-8.5), BindingStrength::Moderate);
    }

    #[test]
    fn ordering_check_rejects_inverted_or_non_finite_cutoffs() {
        assert!(DEFAULT_STRENGTH_THRESHOLDS.is_ordered());
        assert!(StrengthThresholds { strong: -7.0, moderate: -7.0 }.is_ordered());
        assert!(!StrengthThresholds { strong: -5.0, moderate: -7.0 }.is_ordered());
        assert!(!StrengthThresholds { strong: f64::NAN, moderate: -7.0 }.is_ordered());
    }

    #[test]
    fn recommendation_follows_rank() {
        assert_eq!(Recommendation::for_rank(1).label(), "Primary candidate");
        assert_eq!(Recommendation::for_rank(2).label(), "Alternative");
        assert_eq!(Recommendation::for_rank(3).label(), "Further study");
        assert_eq!(Recommendation::for_rank(40).to_string(), "Further study");
    }

    #[test]
    fn affinity_deserializes_from_number_or_string() {
        let ligands: Vec<Ligand> = serde_json::from_str(
            r#"[
                { "ligand_name": "aspirin", "binding_affinity": -7.2 },
                { "ligand_name": "ibuprofen", "binding_affinity": " -6.5 " }
            ]"#,
        )
        .expect("valid ligands");
        assert_eq!(ligands[0], Ligand::new("aspirin", -7.2));
        assert_eq!(ligands[1], Ligand::new("ibuprofen", -6.5));
    }

    #[test]
    fn non_numeric_affinity_is_rejected() {
        let result: Result<Ligand, _> =
            serde_json::from_str(r#"{ "ligand_name": "x", "binding_affinity": "strong" }"#);
        let err = result.expect_err("non-numeric affinity");
        assert!(err.to_string().contains("invalid binding affinity"), "{err}");
    }

    #[test]
    fn ranked_annotates_in_input_order() {
        let ligands = vec![
            Ligand::new("L1", -9.5),
            Ligand::new("L2", -8.0),
            Ligand::new("L3", -5.0),
        ];
        let rows: Vec<_> = ranked(&ligands, &DEFAULT_STRENGTH_THRESHOLDS).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].rank, 1);
        assert_eq!(rows[0].strength, BindingStrength::Strong);
        assert_eq!(rows[1].recommendation, Recommendation::Alternative);
        assert_eq!(rows[2].strength, BindingStrength::Weak);
        assert_eq!(rows[2].ligand.ligand_name, "L3");
    }
}
