use crate::models::{ApiMessage, NewReport, Report, Statistics};

/// Error type for backend operations
#[derive(Debug)]
pub enum ApiError {
    NetworkError(String),
    JsonError(String),
    /// 403: the session does not own the report
    Forbidden(String),
    NotFound(String),
    ServerError { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            ApiError::JsonError(msg) => write!(f, "JSON error: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    /// Classifies a non-success response from its status and raw body
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ApiMessage>(body)
            .ok()
            .and_then(|m| m.text().map(str::to_string))
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            403 => ApiError::Forbidden(message),
            404 => ApiError::NotFound(message),
            _ => ApiError::ServerError { status, message },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Backend operations the client depends on
#[allow(async_fn_in_trait)]
pub trait ReportBackend {
    async fn fetch_reports(&self) -> ApiResult<Vec<Report>>;
    async fn add_report(&self, report: NewReport) -> ApiResult<ApiMessage>;
    async fn delete_report(&self, report_id: i64) -> ApiResult<ApiMessage>;
    async fn fetch_statistics(&self) -> ApiResult<Statistics>;
}

/// Paths of the backend endpoints
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub reports: String,
    pub add_report: String,
    pub delete_report: String,
    pub statistics: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            reports: "/get_reports".to_string(),
            add_report: "/add_report".to_string(),
            delete_report: "/delete_report".to_string(),
            statistics: "/statistics".to_string(),
        }
    }
}

/// HTTP client for the report backend
#[derive(Clone)]
pub struct ReportApiClient {
    base_url: String,
    endpoints: Endpoints,
    client: reqwest::Client,
}

impl ReportApiClient {
    /// Create a new client against `base_url` (e.g. `http://127.0.0.1:5000`)
    pub fn new(base_url: String, endpoints: Endpoints) -> ApiResult<Self> {
        let builder = reqwest::Client::builder();

        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .cookie_store(true)
            .user_agent("PollutionReporter/0.1.0");

        let client = builder
            .build()
            .map_err(|e| ApiError::NetworkError(format!("Client build failed: {}", e)))?;

        Ok(Self {
            base_url,
            endpoints,
            client,
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn delete_url(&self, report_id: i64) -> String {
        self.url(&format!(
            "{}/{}",
            self.endpoints.delete_report.trim_end_matches('/'),
            report_id
        ))
    }

    /// Sends the session cookie along; native builds use the cookie store instead
    fn with_session(request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();
        request
    }

    async fn read_message(response: reqwest::Response) -> ApiResult<ApiMessage> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::NetworkError(format!("Failed to read body: {}", e)))?;

        if !status.is_success() {
            return Err(ApiError::from_status(status.as_u16(), &body));
        }
        if body.trim().is_empty() {
            return Ok(ApiMessage::default());
        }
        serde_json::from_str(&body)
            .map_err(|e| ApiError::JsonError(format!("Failed to parse response: {}", e)))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        log::debug!("GET {}", url);

        let response = Self::with_session(self.client.get(&url))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::JsonError(format!("Failed to parse response: {}", e)))
    }
}

impl ReportBackend for ReportApiClient {
    async fn fetch_reports(&self) -> ApiResult<Vec<Report>> {
        let reports: Vec<Report> = self.get_json(&self.endpoints.reports).await?;
        log::info!("Fetched {} reports", reports.len());
        Ok(reports)
    }

    async fn add_report(&self, report: NewReport) -> ApiResult<ApiMessage> {
        let mut form = reqwest::multipart::Form::new();
        for (name, value) in report.text_fields() {
            form = form.text(name, value);
        }
        let image_count = report.images.len();
        for image in report.images {
            let part = reqwest::multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)
                .map_err(|e| ApiError::NetworkError(format!("Invalid image part: {}", e)))?;
            form = form.part("images", part);
        }

        let url = self.url(&self.endpoints.add_report);
        log::debug!("POST {} with {} images", url, image_count);

        let response = Self::with_session(self.client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(format!("Submit request failed: {}", e)))?;

        Self::read_message(response).await
    }

    async fn delete_report(&self, report_id: i64) -> ApiResult<ApiMessage> {
        let url = self.delete_url(report_id);
        log::debug!("DELETE {}", url);

        let response = Self::with_session(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| ApiError::NetworkError(format!("Delete request failed: {}", e)))?;

        Self::read_message(response).await
    }

    async fn fetch_statistics(&self) -> ApiResult<Statistics> {
        self.get_json(&self.endpoints.statistics).await
    }
}
