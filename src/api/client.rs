use reqwest::blocking::multipart::{Form, Part};
use serde::de::DeserializeOwned;

use super::request::{self, ApiRequest, Method, RequestBody, UploadFile};
use super::types::{
    AnalysisList, AnalysisQuery, AnalysisResult, AnalysisStats, MetadataUpdate, ProjectList,
    TagList,
};
use super::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a prepared request and returns the raw response.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse>;
}

/// Blocking HTTP transport against a backend base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = base_url.into();
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|source| ApiError::Http {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{path}", self.base_url.trim_end_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn send(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let url = self.url_for(&request.path);
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        };
        tracing::debug!(
            method = request.method.as_str(),
            url = url.as_str(),
            "backend request"
        );

        let mut builder = self.client.request(method, &url).query(&request.query);
        builder = match &request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Multipart { field, files } => {
                let form = files.iter().fold(Form::new(), |form, file| {
                    form.part(
                        *field,
                        Part::bytes(file.bytes.clone()).file_name(file.name.clone()),
                    )
                });
                builder.multipart(form)
            }
        };

        let http_error = |source| ApiError::Http {
            url: url.clone(),
            source,
        };
        let response = builder.send().map_err(http_error)?;
        let status = response.status().as_u16();
        let body = response.text().map_err(http_error)?;
        Ok(ApiResponse { status, body })
    }
}

/// Typed access to the analysis endpoints.
#[derive(Debug)]
pub struct ApiClient<T> {
    transport: T,
}

impl ApiClient<HttpTransport> {
    pub fn connect(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self::new(HttpTransport::new(base_url)?))
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn analyze(&self, files: Vec<UploadFile>) -> ApiResult<AnalysisResult> {
        self.fetch(&request::analyze(files)?)
    }

    pub fn list_analyses(&self, query: &AnalysisQuery) -> ApiResult<AnalysisList> {
        self.fetch(&request::list_analyses(query))
    }

    pub fn get_analysis(&self, id: &str) -> ApiResult<AnalysisResult> {
        self.fetch(&request::get_analysis(id))
    }

    /// Fetch every analysis named in a comparison, in order.
    pub fn compare(&self, ids: &[String]) -> ApiResult<Vec<AnalysisResult>> {
        if ids.len() < 2 {
            return Err(ApiError::TooFewAnalyses { count: ids.len() });
        }
        ids.iter().map(|id| self.get_analysis(id)).collect()
    }

    pub fn delete_analysis(&self, id: &str) -> ApiResult<()> {
        self.execute(&request::delete_analysis(id)).map(drop)
    }

    pub fn update_metadata(&self, id: &str, update: &MetadataUpdate) -> ApiResult<()> {
        self.execute(&request::update_metadata(id, update)?).map(drop)
    }

    pub fn tags(&self) -> ApiResult<TagList> {
        self.fetch(&request::tags())
    }

    pub fn projects(&self) -> ApiResult<ProjectList> {
        self.fetch(&request::projects())
    }

    pub fn stats(&self) -> ApiResult<AnalysisStats> {
        self.fetch(&request::stats_summary())
    }

    fn execute(&self, request: &ApiRequest) -> ApiResult<ApiResponse> {
        let response = self.transport.send(request)?;
        if !response.is_success() {
            tracing::warn!(
                method = request.method.as_str(),
                path = request.path.as_str(),
                status = response.status,
                "backend request failed"
            );
            return Err(ApiError::Status {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    fn fetch<R: DeserializeOwned>(&self, request: &ApiRequest) -> ApiResult<R> {
        let response = self.execute(request)?;
        Ok(serde_json::from_str(&response.body)?)
    }
}
