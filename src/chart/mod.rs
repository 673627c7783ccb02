//! Bar-chart dataset for comparing ligand binding affinities.

use std::fmt;

use serde::Serialize;

use crate::color::Rgb;
use crate::ligand::{ranked, BindingStrength, Ligand, StrengthThresholds};

pub const CHART_TITLE: &str = "Binding Affinity Comparison";
pub const DATASET_LABEL: &str = "Binding Affinity (kcal/mol)";
pub const X_AXIS_TITLE: &str = "Ligand";
pub const Y_AXIS_TITLE: &str = "ΔG (kcal/mol)";
pub const BORDER_WIDTH: u32 = 2;

const BAR_ALPHA: f64 = 0.8;
const BORDER_ALPHA: f64 = 1.0;

// green-500, yellow-500, red-500
const STRONG_COLOR: Rgb = Rgb::new(34, 197, 94);
const MODERATE_COLOR: Rgb = Rgb::new(234, 179, 8);
const WEAK_COLOR: Rgb = Rgb::new(239, 68, 68);

/// A CSS `rgba(...)` color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub color: Rgb,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(color: Rgb, alpha: f64) -> Self {
        Self {
            color,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Self::new(self.color, alpha)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rgba({}, {}, {}, {})",
            self.color.r, self.color.g, self.color.b, self.alpha
        )
    }
}

pub fn bar_color(strength: BindingStrength) -> Rgba {
    let color = match strength {
        BindingStrength::Strong => STRONG_COLOR,
        BindingStrength::Moderate => MODERATE_COLOR,
        BindingStrength::Weak => WEAK_COLOR,
    };
    Rgba::new(color, BAR_ALPHA)
}

pub fn tooltip_label(affinity: f64) -> String {
    format!("ΔG: {affinity} kcal/mol")
}

/// Y-axis tick text, one decimal place.
pub fn tick_label(value: f64) -> String {
    format!("{value:.1}")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
    pub border_color: Vec<String>,
    pub border_width: u32,
}

/// Chart data in the shape the bar-chart widget consumes, with the
/// per-bar tooltip text precomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AffinityChart {
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
    pub tooltips: Vec<String>,
}

impl AffinityChart {
    /// `None` when there is nothing to plot.
    pub fn from_ligands(ligands: &[Ligand], thresholds: &StrengthThresholds) -> Option<Self> {
        if ligands.is_empty() {
            return None;
        }

        let mut labels = Vec::with_capacity(ligands.len());
        let mut data = Vec::with_capacity(ligands.len());
        let mut bars = Vec::with_capacity(ligands.len());
        for row in ranked(ligands, thresholds) {
            labels.push(row.ligand.ligand_name.clone());
            data.push(row.ligand.binding_affinity);
            bars.push(bar_color(row.strength));
        }

        let tooltips = data.iter().copied().map(tooltip_label).collect();
        let dataset = ChartDataset {
            label: DATASET_LABEL.to_string(),
            data,
            background_color: bars.iter().map(Rgba::to_string).collect(),
            border_color: bars
                .iter()
                .map(|bar| bar.with_alpha(BORDER_ALPHA).to_string())
                .collect(),
            border_width: BORDER_WIDTH,
        };
        tracing::debug!(bars = labels.len(), "built affinity chart");

        Some(Self {
            title: CHART_TITLE.to_string(),
            x_axis_title: X_AXIS_TITLE.to_string(),
            y_axis_title: Y_AXIS_TITLE.to_string(),
            labels,
            datasets: vec![dataset],
            tooltips,
        })
    }

    /// Lowest and highest affinity, for axis bounds.
    pub fn affinity_range(&self) -> Option<(f64, f64)> {
        self.datasets
            .first()?
            .data
            .iter()
            .copied()
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((low, high)) => Some((low.min(value), high.max(value))),
            })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ligand::DEFAULT_STRENGTH_THRESHOLDS;

    fn sample() -> Vec<Ligand> {
        vec![
            Ligand::new("ZINC000123", -9.5),
            Ligand::new("L2", -9.0),
            Ligand::new("L3", -7.0),
            Ligand::new("L4", -6.2),
        ]
    }

    #[test]
    fn bars_are_colored_by_binding_strength() {
        let chart = AffinityChart::from_ligands(&sample(), &DEFAULT_STRENGTH_THRESHOLDS)
            .expect("ligands present");
        let dataset = &chart.datasets[0];
        assert_eq!(chart.labels, ["ZINC000123", "L2", "L3", "L4"]);
        assert_eq!(dataset.data, [-9.5, -9.0, -7.0, -6.2]);
        assert_eq!(
            dataset.background_color,
            [
                "rgba(34, 197, 94, 0.8)",
                "rgba(34, 197, 94, 0.8)",
                "rgba(234, 179, 8, 0.8)",
                "rgba(239, 68, 68, 0.8)",
            ]
        );
        assert_eq!(dataset.border_color[0], "rgba(34, 197, 94, 1)");
        assert_eq!(dataset.border_color[3], "rgba(239, 68, 68, 1)");
        assert_eq!(dataset.border_width, 2);
        assert_eq!(dataset.label, "Binding Affinity (kcal/mol)");
    }

    #[test]
    fn cutoffs_follow_configured_thresholds() {
        let dashboard = StrengthThresholds {
            strong: -8.0,
            moderate: -6.0,
        };
        let chart = AffinityChart::from_ligands(&sample(), &dashboard).expect("ligands present");
        assert_eq!(chart.datasets[0].background_color[1], "rgba(34, 197, 94, 0.8)");
        assert_eq!(chart.datasets[0].background_color[3], "rgba(234, 179, 8, 0.8)");
    }

    #[test]
    fn tooltip_and_tick_text() {
        assert_eq!(tooltip_label(-9.5), "ΔG: -9.5 kcal/mol");
        assert_eq!(tooltip_label(-7.0), "ΔG: -7 kcal/mol");
        assert_eq!(tick_label(-7.0), "-7.0");
        assert_eq!(tick_label(-8.26), "-8.3");

        let chart = AffinityChart::from_ligands(&sample(), &DEFAULT_STRENGTH_THRESHOLDS)
            .expect("ligands present");
        assert_eq!(chart.tooltips[0], "ΔG: -9.5 kcal/mol");
        assert_eq!(chart.affinity_range(), Some((-9.5, -6.2)));
    }

    #[test]
    fn empty_list_has_no_chart() {
        assert!(AffinityChart::from_ligands(&[], &DEFAULT_STRENGTH_THRESHOLDS).is_none());
    }

    #[test]
    fn json_uses_widget_field_names() {
        let chart = AffinityChart::from_ligands(&sample()[..1], &DEFAULT_STRENGTH_THRESHOLDS)
            .expect("ligands present");
        let value: serde_json::Value =
            serde_json::from_str(&chart.to_json().expect("serializable")).expect("valid json");
        assert_eq!(value["title"], "Binding Affinity Comparison");
        assert_eq!(value["yAxisTitle"], "ΔG (kcal/mol)");
        assert_eq!(value["datasets"][0]["backgroundColor"][0], "rgba(34, 197, 94, 0.8)");
        assert_eq!(value["datasets"][0]["borderWidth"], 2);
    }
}
