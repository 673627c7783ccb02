use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::ligand::{StrengthThresholds, DEFAULT_STRENGTH_THRESHOLDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConfigPathError {
    MissingHomeDirectory,
}

pub(crate) const APP_DIR: &str = "docksight";
const APP_CONFIG_FILE: &str = "config.json";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Application-level settings from `config.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_strength_thresholds")]
    pub strength_thresholds: StrengthThresholds,
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            strength_thresholds: default_strength_thresholds(),
            export_dir: None,
        }
    }
}

impl AppConfig {
    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_strength_thresholds() -> StrengthThresholds {
    DEFAULT_STRENGTH_THRESHOLDS
}

pub fn load_app_config() -> AppConfig {
    let (xdg_config_home, home) = config_env_dirs();
    load_app_config_with(xdg_config_home.as_deref(), home.as_deref())
}

fn load_app_config_with(xdg_config_home: Option<&Path>, home: Option<&Path>) -> AppConfig {
    let path = match app_config_path(APP_DIR, APP_CONFIG_FILE, xdg_config_home, home) {
        Ok(p) => p,
        Err(_) => return AppConfig::default(),
    };
    if !path.exists() {
        return AppConfig::default();
    }
    let config = match std::fs::read_to_string(&path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
            tracing::warn!(?err, ?path, "failed to parse config.json; using defaults");
            AppConfig::default()
        }),
        Err(err) => {
            tracing::warn!(?err, ?path, "failed to read config.json; using defaults");
            AppConfig::default()
        }
    };
    sanitize_thresholds(config)
}

fn sanitize_thresholds(mut config: AppConfig) -> AppConfig {
    if !config.strength_thresholds.is_ordered() {
        tracing::warn!(
            strong = config.strength_thresholds.strong,
            moderate = config.strength_thresholds.moderate,
            "strength_thresholds.strong must not exceed moderate; using defaults"
        );
        config.strength_thresholds = DEFAULT_STRENGTH_THRESHOLDS;
    }
    config
}

pub(crate) fn config_env_dirs() -> (Option<PathBuf>, Option<PathBuf>) {
    (
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

pub(crate) fn app_config_path(
    app_dir: &str,
    file_name: &str,
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    let mut path = config_root(xdg_config_home, home)?;
    path.push(app_dir);
    path.push(file_name);
    Ok(path)
}

fn config_root(
    xdg_config_home: Option<&Path>,
    home: Option<&Path>,
) -> Result<PathBuf, ConfigPathError> {
    if let Some(xdg) = xdg_config_home.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(xdg.to_path_buf());
    }

    let home = home.ok_or(ConfigPathError::MissingHomeDirectory)?;
    Ok(home.join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let mut root = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        root.push(format!("docksight-config-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    fn write_config(root: &Path, contents: &str) {
        let path = app_config_path(APP_DIR, APP_CONFIG_FILE, Some(root), None).unwrap();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn app_config_path_prefers_xdg_config_home() {
        let path = app_config_path(
            "docksight",
            "palette.json",
            Some(Path::new("/tmp/config-root")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/config-root/docksight/palette.json"));
    }

    #[test]
    fn app_config_path_falls_back_to_home_dot_config() {
        let path = app_config_path(
            "docksight",
            "palette.json",
            Some(Path::new("")),
            Some(Path::new("/tmp/home")),
        )
        .expect("path should resolve");

        assert_eq!(path, PathBuf::from("/tmp/home/.config/docksight/palette.json"));
    }

    #[test]
    fn app_config_path_errors_when_home_missing_and_xdg_unset() {
        let error = app_config_path("docksight", "palette.json", None, None).unwrap_err();
        assert_eq!(error, ConfigPathError::MissingHomeDirectory);
    }

    #[test]
    fn missing_config_uses_defaults() {
        with_temp_root(|root| {
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
            assert_eq!(config.strength_thresholds, DEFAULT_STRENGTH_THRESHOLDS);
            assert_eq!(config.export_dir(), PathBuf::from("."));
        });
    }

    #[test]
    fn config_fields_override_defaults() {
        with_temp_root(|root| {
            write_config(
                root,
                r#"{
                    "api_base_url": "https://dock.example.org",
                    "strength_thresholds": { "strong": -8.0, "moderate": -6.0 },
                    "export_dir": "/tmp/exports"
                }"#,
            );
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.api_base_url, "https://dock.example.org");
            assert_eq!(config.strength_thresholds.strong, -8.0);
            assert_eq!(config.strength_thresholds.moderate, -6.0);
            assert_eq!(config.export_dir(), PathBuf::from("/tmp/exports"));
        });
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        with_temp_root(|root| {
            write_config(root, "{ not json");
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        });
    }

    #[test]
    fn inverted_thresholds_fall_back_to_defaults() {
        with_temp_root(|root| {
            write_config(
                root,
                r#"{ "strength_thresholds": { "strong": -5.0, "moderate": -7.0 } }"#,
            );
            let config = load_app_config_with(Some(root), None);
            assert_eq!(config.strength_thresholds, DEFAULT_STRENGTH_THRESHOLDS);
        });
    }
}
