use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::NaiveDate;
use thiserror::Error;

use crate::ligand::{ranked, Ligand, StrengthThresholds};

const FILE_PREFIX: &str = "docksight_results_";
pub const EXPORT_COLUMNS: [&str; 5] = [
    "Rank",
    "Compound",
    "Binding Affinity (kcal/mol)",
    "Binding Strength",
    "Recommendation",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("no ligands to export")]
    NoLigands,
    #[error("unknown export format: {input}")]
    UnknownFormat { input: String },
    #[error("failed to write export file: {path}")]
    Write { path: PathBuf, source: io::Error },
}

pub type ExportResult<T> = std::result::Result<T, ExportError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
        }
    }

    pub fn delimiter(self) -> char {
        match self {
            Self::Csv => ',',
            Self::Tsv => '\t',
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Tsv => "text/tab-separated-values",
        }
    }

    fn escape(self, field: &str) -> String {
        match self {
            Self::Csv => {
                if field.contains([',', '"', '\n', '\r']) {
                    format!("\"{}\"", field.replace('"', "\"\""))
                } else {
                    field.to_string()
                }
            }
            Self::Tsv => field.replace(['\t', '\n', '\r'], " "),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            _ => Err(ExportError::UnknownFormat {
                input: s.to_string(),
            }),
        }
    }
}

/// Header plus one row per ligand, joined with `\n`, no trailing newline.
pub fn render_table(
    ligands: &[Ligand],
    format: ExportFormat,
    thresholds: &StrengthThresholds,
) -> String {
    let delimiter = format.delimiter().to_string();
    let header = EXPORT_COLUMNS
        .iter()
        .map(|column| format.escape(column))
        .collect::<Vec<_>>()
        .join(&delimiter);

    let rows = ranked(ligands, thresholds).map(|row| {
        [
            row.rank.to_string(),
            format.escape(&row.ligand.ligand_name),
            row.ligand.binding_affinity.to_string(),
            row.strength.label().to_string(),
            row.recommendation.label().to_string(),
        ]
        .join(&delimiter)
    });

    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_filename(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{FILE_PREFIX}{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Writes ligand tables into a target directory.
#[derive(Debug, Clone)]
pub struct ExportService {
    dir: PathBuf,
}

impl ExportService {
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn target_path(&self, format: ExportFormat, date: NaiveDate) -> PathBuf {
        self.dir.join(export_filename(format, date))
    }

    pub fn save(
        &self,
        ligands: &[Ligand],
        format: ExportFormat,
        date: NaiveDate,
        thresholds: &StrengthThresholds,
    ) -> ExportResult<PathBuf> {
        if ligands.is_empty() {
            return Err(ExportError::NoLigands);
        }
        let target = self.target_path(format, date);
        let contents = render_table(ligands, format, thresholds);
        save_overwrite(&target, contents.as_bytes())?;
        tracing::info!(
            path = %target.display(),
            rows = ligands.len(),
            format = format.extension(),
            "exported ligand table"
        );
        Ok(target)
    }
}

fn save_overwrite(destination: &Path, contents: &[u8]) -> ExportResult<()> {
    let write_error = |source| ExportError::Write {
        path: destination.to_path_buf(),
        source,
    };
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(destination, contents).map_err(write_error)
}
