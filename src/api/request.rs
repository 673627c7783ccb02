use std::borrow::Cow;
use std::path::Path;

use super::types::{AnalysisQuery, MetadataUpdate};
use super::{ApiError, ApiResult};

const UPLOAD_FIELD: &str = "files";
const ACCEPTED_EXTENSIONS: &[&str] = &["pdbqt", "log"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Only AutoDock Vina outputs (`.pdbqt`, `.log`) are accepted.
    pub fn is_supported(&self) -> bool {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                ACCEPTED_EXTENSIONS
                    .iter()
                    .any(|accepted| ext.eq_ignore_ascii_case(accepted))
            })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart {
        field: &'static str,
        files: Vec<UploadFile>,
    },
}

/// A backend call, independent of how it is sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }
}

pub fn analyze(files: Vec<UploadFile>) -> ApiResult<ApiRequest> {
    if files.is_empty() {
        return Err(ApiError::NoFiles);
    }
    if let Some(file) = files.iter().find(|file| !file.is_supported()) {
        return Err(ApiError::UnsupportedFile {
            name: file.name.clone(),
        });
    }
    let mut request = ApiRequest::new(Method::Post, "/api/analyze");
    request.body = RequestBody::Multipart {
        field: UPLOAD_FIELD,
        files,
    };
    Ok(request)
}

pub fn list_analyses(query: &AnalysisQuery) -> ApiRequest {
    let mut request = ApiRequest::new(Method::Get, "/api/analyses");
    if let Some(limit) = query.limit {
        request = request.with_query("limit", limit.to_string());
    }
    let optional = [
        ("search", &query.search),
        ("project", &query.project),
        ("start_date", &query.start_date),
        ("end_date", &query.end_date),
    ];
    for (key, value) in optional {
        if let Some(value) = value.as_deref().filter(|value| !value.is_empty()) {
            request = request.with_query(key, value);
        }
    }
    if !query.tags.is_empty() {
        request = request.with_query("tags", query.tags.join(","));
    }
    request
}

/// `/api/analyses/{id}` with `id` percent-encoded as a single path segment.
fn analysis_path(id: &str) -> String {
    let segment: Cow<'_, str> = match id {
        "." => "%2E".into(),
        ".." => "%2E%2E".into(),
        _ => urlencoding::encode(id),
    };
    format!("/api/analyses/{segment}")
}

pub fn get_analysis(id: &str) -> ApiRequest {
    ApiRequest::new(Method::Get, analysis_path(id))
}

pub fn delete_analysis(id: &str) -> ApiRequest {
    ApiRequest::new(Method::Delete, analysis_path(id))
}

pub fn update_metadata(id: &str, update: &MetadataUpdate) -> ApiResult<ApiRequest> {
    let path = format!("{}/metadata", analysis_path(id));
    let mut request = ApiRequest::new(Method::Patch, path);
    request.body = RequestBody::Json(serde_json::to_value(update)?);
    Ok(request)
}

pub fn tags() -> ApiRequest {
    ApiRequest::new(Method::Get, "/api/analyses/tags")
}

pub fn projects() -> ApiRequest {
    ApiRequest::new(Method::Get, "/api/analyses/projects")
}

pub fn stats_summary() -> ApiRequest {
    ApiRequest::new(Method::Get, "/api/analyses/stats/summary")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_pairs(request: &ApiRequest) -> Vec<(&str, &str)> {
        request
            .query
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
            .collect()
    }

    #[test]
    fn analyze_requires_files_with_supported_extensions() {
        assert!(matches!(analyze(Vec::new()), Err(ApiError::NoFiles)));
        assert!(matches!(
            analyze(vec![UploadFile::new("pose.pdb", Vec::new())]),
            Err(ApiError::UnsupportedFile { ref name }) if name == "pose.pdb"
        ));

        let request = analyze(vec![
            UploadFile::new("ligand_out.PDBQT", b"MODEL 1".to_vec()),
            UploadFile::new("vina.log", b"mode |".to_vec()),
        ])
        .expect("valid upload");
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/api/analyze");
        assert!(matches!(
            request.body,
            RequestBody::Multipart { field: "files", ref files } if files.len() == 2
        ));
    }

    #[test]
    fn list_query_includes_only_set_filters() {
        let request = list_analyses(&AnalysisQuery::default());
        assert_eq!(request.path, "/api/analyses");
        assert_eq!(query_pairs(&request), [("limit", "50")]);

        let request = list_analyses(&AnalysisQuery {
            search: Some("egfr".to_string()),
            tags: vec!["kinase".to_string(), "screen-2".to_string()],
            project: Some(String::new()),
            start_date: Some("2024-01-01".to_string()),
            end_date: None,
            limit: None,
        });
        assert_eq!(
            query_pairs(&request),
            [
                ("search", "egfr"),
                ("start_date", "2024-01-01"),
                ("tags", "kinase,screen-2")
            ]
        );
    }

    #[test]
    fn per_analysis_paths() {
        assert_eq!(get_analysis("a1").path, "/api/analyses/a1");
        assert_eq!(delete_analysis("a1").method, Method::Delete);
        assert_eq!(stats_summary().path, "/api/analyses/stats/summary");
        assert_eq!(tags().path, "/api/analyses/tags");
        assert_eq!(projects().path, "/api/analyses/projects");
    }

    #[test]
    fn analysis_ids_stay_inside_their_path_segment() {
        assert_eq!(get_analysis("a/b").path, "/api/analyses/a%2Fb");
        assert_eq!(delete_analysis("x?force=1").path, "/api/analyses/x%3Fforce%3D1");
        assert_eq!(get_analysis("..").path, "/api/analyses/%2E%2E");
        assert_eq!(
            update_metadata("../stats", &MetadataUpdate::default())
                .expect("serializable")
                .path,
            "/api/analyses/..%2Fstats/metadata"
        );
        assert_eq!(
            get_analysis("analysis_20240501_ab-12").path,
            "/api/analyses/analysis_20240501_ab-12"
        );
    }

    #[test]
    fn metadata_update_is_a_json_patch() {
        let update = MetadataUpdate {
            tags: vec!["hit".to_string()],
            project: "EGFR".to_string(),
            notes: "rerun with flexible residues".to_string(),
        };
        let request = update_metadata("a1", &update).expect("serializable");
        assert_eq!(request.method, Method::Patch);
        assert_eq!(request.path, "/api/analyses/a1/metadata");
        let RequestBody::Json(body) = request.body else {
            panic!("expected json body");
        };
        assert_eq!(body["project"], "EGFR");
        assert_eq!(body["tags"][0], "hit");
    }
}
