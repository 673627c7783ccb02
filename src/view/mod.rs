//! Result presentation modes: ligand cards or a table, laid out as a grid
//! or a list. Each mode resolves to one render function per pass.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::ligand::{BindingStrength, Ligand, Recommendation, StrengthThresholds};

const GRID_COLUMNS: usize = 3;
const GRID_GUTTER: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("unknown view mode: {input}; expected cards or table")]
    UnknownViewMode { input: String },
    #[error("unknown layout mode: {input}; expected grid or list")]
    UnknownLayoutMode { input: String },
}

/// Renders one ligand given its 1-based rank.
pub type ItemRenderer = fn(&Ligand, usize, &StrengthThresholds) -> String;

/// Arranges rendered items into the final block of text.
pub type LayoutRenderer = fn(&[String]) -> String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Cards,
    Table,
}

impl ViewMode {
    pub fn renderer(self) -> ItemRenderer {
        match self {
            Self::Cards => render_card,
            Self::Table => render_table_row,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cards => "cards",
            Self::Table => "table",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cards" => Ok(Self::Cards),
            "table" => Ok(Self::Table),
            _ => Err(ViewError::UnknownViewMode {
                input: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    Grid,
    List,
}

impl LayoutMode {
    pub fn renderer(self) -> LayoutRenderer {
        match self {
            Self::Grid => arrange_grid,
            Self::List => arrange_list,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutMode {
    type Err = ViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(Self::Grid),
            "list" => Ok(Self::List),
            _ => Err(ViewError::UnknownLayoutMode {
                input: s.to_string(),
            }),
        }
    }
}

pub fn render_ligands(
    mode: ViewMode,
    ligands: &[Ligand],
    thresholds: &StrengthThresholds,
) -> Vec<String> {
    let render = mode.renderer();
    ligands
        .iter()
        .enumerate()
        .map(|(index, ligand)| render(ligand, index + 1, thresholds))
        .collect()
}

pub fn render_view(
    mode: ViewMode,
    layout: LayoutMode,
    ligands: &[Ligand],
    thresholds: &StrengthThresholds,
) -> String {
    let items = render_ligands(mode, ligands, thresholds);
    (layout.renderer())(&items)
}

fn labels(
    ligand: &Ligand,
    rank: usize,
    thresholds: &StrengthThresholds,
) -> (BindingStrength, Recommendation) {
    (
        thresholds.classify(ligand.binding_affinity),
        Recommendation::for_rank(rank),
    )
}

fn render_card(ligand: &Ligand, rank: usize, thresholds: &StrengthThresholds) -> String {
    let (strength, recommendation) = labels(ligand, rank, thresholds);
    format!(
        "#{rank} {} ({} kcal/mol, {strength}, {recommendation})",
        ligand.ligand_name, ligand.binding_affinity
    )
}

fn render_table_row(ligand: &Ligand, rank: usize, thresholds: &StrengthThresholds) -> String {
    let (strength, recommendation) = labels(ligand, rank, thresholds);
    format!(
        "{rank} | {} | {} | {strength} | {recommendation}",
        ligand.ligand_name, ligand.binding_affinity
    )
}

fn arrange_list(items: &[String]) -> String {
    items.join("\n")
}

fn arrange_grid(items: &[String]) -> String {
    let width = items.iter().map(|item| item.chars().count()).max().unwrap_or(0);
    items
        .chunks(GRID_COLUMNS)
        .map(|row| {
            row.iter()
                .map(|item| format!("{item:<width$}"))
                .collect::<Vec<_>>()
                .join(GRID_GUTTER)
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ligand::DEFAULT_STRENGTH_THRESHOLDS;

    fn sample() -> Vec<Ligand> {
        vec![
            Ligand::new("L1", -9.5),
            Ligand::new("L2", -7.5),
            Ligand::new("L3", -5.0),
            Ligand::new("L4", -4.0),
        ]
    }

    #[test]
    fn modes_parse_from_their_names() {
        assert_eq!("cards".parse::<ViewMode>(), Ok(ViewMode::Cards));
        assert_eq!("table".parse::<ViewMode>(), Ok(ViewMode::Table));
        assert_eq!("grid".parse::<LayoutMode>(), Ok(LayoutMode::Grid));
        assert_eq!("list".parse::<LayoutMode>(), Ok(LayoutMode::List));
        assert!(matches!(
            "tiles".parse::<ViewMode>(),
            Err(ViewError::UnknownViewMode { .. })
        ));
        assert!(matches!(
            "masonry".parse::<LayoutMode>(),
            Err(ViewError::UnknownLayoutMode { .. })
        ));
        assert_eq!(ViewMode::Table.to_string(), "table");
    }

    #[test]
    fn each_view_mode_renders_every_item() {
        let ligands = sample();
        let cards = render_ligands(ViewMode::Cards, &ligands, &DEFAULT_STRENGTH_THRESHOLDS);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0], "#1 L1 (-9.5 kcal/mol, Strong, Primary candidate)");

        let rows = render_ligands(ViewMode::Table, &ligands, &DEFAULT_STRENGTH_THRESHOLDS);
        assert_eq!(rows[1], "2 | L2 | -7.5 | Moderate | Alternative");
        assert_eq!(rows[3], "4 | L4 | -4 | Weak | Further study");
    }

    #[test]
    fn renderer_is_a_single_function_per_mode() {
        let cards: ItemRenderer = ViewMode::Cards.renderer();
        let ligand = Ligand::new("L1", -9.5);
        assert_eq!(
            cards(&ligand, 1, &DEFAULT_STRENGTH_THRESHOLDS),
            render_card(&ligand, 1, &DEFAULT_STRENGTH_THRESHOLDS)
        );
    }

    #[test]
    fn layouts_arrange_rows() {
        let ligands = sample();
        let list = render_view(
            ViewMode::Table,
            LayoutMode::List,
            &ligands,
            &DEFAULT_STRENGTH_THRESHOLDS,
        );
        assert_eq!(list.lines().count(), 4);

        let grid = render_view(
            ViewMode::Cards,
            LayoutMode::Grid,
            &ligands,
            &DEFAULT_STRENGTH_THRESHOLDS,
        );
        let lines: Vec<&str> = grid.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("#1 L1"));
        assert!(lines[0].contains("#3 L3"));
        assert!(lines[1].starts_with("#4 L4"));
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render_ligands(ViewMode::Cards, &[], &DEFAULT_STRENGTH_THRESHOLDS).is_empty());
        assert_eq!(arrange_grid(&[]), "");
    }
}
