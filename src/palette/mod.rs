use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::{parse_hex, ColorError, Rgb};
use crate::config::{app_config_path, config_env_dirs, ConfigPathError, APP_DIR};

mod builtin;

pub use builtin::{
    builtin_combinations, revised_combinations, ContrastFix, FixTarget, CONTRAST_FIXES,
};

const PALETTE_CONFIG_FILE: &str = "palette.json";

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("unknown color token: {token}")]
    UnknownColorToken { token: String },
    #[error("color token {token} has an invalid value")]
    InvalidColor {
        token: String,
        #[source]
        source: ColorError,
    },
    #[error("missing HOME environment variable")]
    MissingHomeDirectory,
    #[error("failed to read palette config: {path}")]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("failed to parse palette config")]
    ParseConfig(#[from] serde_json::Error),
}

pub type PaletteResult<T> = std::result::Result<T, PaletteError>;

/// Named design tokens mapped to hex strings. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    tokens: BTreeMap<String, String>,
}

impl Palette {
    /// The shipped design-token palette, built on first use.
    pub fn builtin() -> &'static Palette {
        static BUILTIN: OnceLock<Palette> = OnceLock::new();
        BUILTIN.get_or_init(|| Palette::from_entries(builtin::PALETTE_TOKENS.iter().copied()))
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            tokens: entries
                .into_iter()
                .map(|(name, hex)| (name.into(), hex.into()))
                .collect(),
        }
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.tokens.get(token).map(String::as_str)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains_key(token)
    }

    pub fn resolve(&self, token: &str) -> PaletteResult<Rgb> {
        let hex = self
            .get(token)
            .ok_or_else(|| PaletteError::UnknownColorToken {
                token: token.to_string(),
            })?;
        parse_hex(hex).map_err(|source| PaletteError::InvalidColor {
            token: token.to_string(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tokens
            .iter()
            .map(|(name, hex)| (name.as_str(), hex.as_str()))
    }

    /// Copy of this palette with valid overrides applied on top.
    pub fn with_overrides(&self, overrides: &PaletteOverrides) -> Palette {
        let mut tokens = self.tokens.clone();
        for (name, hex) in &overrides.tokens {
            if let Err(err) = parse_hex(hex) {
                tracing::warn!(
                    token = name.as_str(),
                    value = hex.as_str(),
                    %err,
                    "invalid palette override; expected #RGB or #RRGGBB"
                );
                continue;
            }
            tokens.insert(name.clone(), hex.clone());
        }
        Palette { tokens }
    }
}

/// One audited UI usage: a text token drawn on a background token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    pub text: String,
    #[serde(rename = "bg")]
    pub background: String,
    pub context: String,
}

impl Combination {
    pub fn new(
        text: impl Into<String>,
        background: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            background: background.into(),
            context: context.into(),
        }
    }
}

/// Contents of `palette.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaletteOverrides {
    #[serde(default)]
    pub tokens: BTreeMap<String, String>,
}

pub fn load_palette_overrides(path: &Path) -> PaletteResult<PaletteOverrides> {
    let serialized = fs::read_to_string(path).map_err(|source| PaletteError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&serialized)?)
}

/// Built-in palette merged with the user's `palette.json`, if there is one.
pub fn load_configured_palette() -> PaletteResult<Palette> {
    let (xdg_config_home, home) = config_env_dirs();
    load_configured_palette_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_configured_palette_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> PaletteResult<Palette> {
    let path = palette_config_path_with(xdg_config_home, home)?;
    if !path.exists() {
        return Ok(Palette::builtin().clone());
    }
    let overrides = load_palette_overrides(&path)?;
    tracing::debug!(
        path = %path.display(),
        count = overrides.tokens.len(),
        "loaded palette overrides"
    );
    Ok(Palette::builtin().with_overrides(&overrides))
}

fn palette_config_path_with(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> PaletteResult<PathBuf> {
    app_config_path(APP_DIR, PALETTE_CONFIG_FILE, xdg_config_home, home).map_err(|error| {
        match error {
            ConfigPathError::MissingHomeDirectory => PaletteError::MissingHomeDirectory,
        }
    })
}
