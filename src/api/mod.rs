//! Client for the DockSight analysis backend.

use thiserror::Error;

pub mod client;
pub mod request;
pub mod types;

pub use client::{ApiClient, ApiResponse, HttpTransport, Transport};
pub use request::{ApiRequest, Method, RequestBody, UploadFile};
pub use types::{
    AnalysisIndexEntry, AnalysisList, AnalysisQuery, AnalysisResult, AnalysisStats,
    MetadataUpdate, ProjectList, TagList,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Please select at least one file")]
    NoFiles,
    #[error("Invalid file type: {name}. Only .pdbqt and .log files are allowed.")]
    UnsupportedFile { name: String },
    #[error("compare needs at least 2 analyses, got {count}")]
    TooFewAnalyses { count: usize },
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to decode backend response")]
    Decode(#[from] serde_json::Error),
    #[error("request to {url} failed")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
