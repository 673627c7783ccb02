//! Per-session key/value storage shared between pages.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::api::AnalysisResult;
use crate::route::Route;

pub const ANALYSIS_KEY: &str = "analysisResult";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to encode session value {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to decode session value {key}: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type SessionResult<T> = std::result::Result<T, SessionError>;

/// Values are kept as JSON text, the way browser session storage holds them.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: HashMap<String, String>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_item(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn remove_item(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store<T: Serialize>(&mut self, key: &str, value: &T) -> SessionResult<()> {
        let encoded = serde_json::to_string(value).map_err(|source| SessionError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.set_item(key, encoded);
        Ok(())
    }

    pub fn load<T: DeserializeOwned>(&self, key: &str) -> SessionResult<Option<T>> {
        let Some(raw) = self.get_item(key) else {
            return Ok(None);
        };
        serde_json::from_str(raw)
            .map(Some)
            .map_err(|source| SessionError::Decode {
                key: key.to_string(),
                source,
            })
    }

    pub fn store_analysis(&mut self, analysis: &AnalysisResult) -> SessionResult<()> {
        tracing::debug!(
            analysis_id = analysis.analysis_id.as_deref().unwrap_or(""),
            "storing current analysis"
        );
        self.store(ANALYSIS_KEY, analysis)
    }

    pub fn current_analysis(&self) -> SessionResult<Option<AnalysisResult>> {
        self.load(ANALYSIS_KEY)
    }

    /// The results page needs a stored analysis; without one the user is
    /// sent back to the upload page.
    pub fn resolve(&self, route: Route) -> Route {
        match route {
            Route::Analyze if self.get_item(ANALYSIS_KEY).is_none() => {
                tracing::debug!("no stored analysis, redirecting to upload");
                Route::Upload
            }
            other => other,
        }
    }
}
