use std::sync::Arc;
use std::time::Duration;

use board_logging::{board_debug, board_error, board_info, board_trace, board_warn, redact_token};
use futures_util::StreamExt;
use jobboard_core::{JobSummary, LoadError, LoadErrorKind, QueryKey, ResultPage};
use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

use crate::credentials::TokenStore;
use crate::normalize::{normalize_page, normalize_record, NormalizeError};

pub const DEFAULT_API_BASE_URL: &str = "https://ambition-pad-backend-1.onrender.com/api/v1";

const BROWSE_FALLBACK_MESSAGE: &str = "Failed to fetch jobs";
const DETAIL_FALLBACK_MESSAGE: &str = "Failed to fetch job details";
const FEATURED_FALLBACK_MESSAGE: &str = "Failed to fetch featured jobs";
const AUTH_EXPIRED_MESSAGE: &str = "Session expired, please sign in again";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API root, e.g. `https://host/api/v1`.
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
    /// First path segment of the single-job endpoint (`job` or `alljobs`).
    pub detail_segment: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            max_bytes: 5 * 1024 * 1024,
            detail_segment: "job".to_string(),
        }
    }
}

/// Construction failures; these are configuration problems, not load errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid API base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("API base url cannot take a path: {0}")]
    CannotBeABase(String),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Callback invoked when the API rejects the stored credentials (HTTP 401).
pub type AuthExpiredHandler = Arc<dyn Fn() + Send + Sync>;

#[async_trait::async_trait]
pub trait JobApi: Send + Sync {
    async fn browse_jobs(&self, key: &QueryKey, page: u32) -> Result<ResultPage, LoadError>;

    async fn job_by_id(&self, id: &str) -> Result<JobSummary, LoadError>;

    async fn featured_jobs(
        &self,
        country: Option<&str>,
        limit: usize,
    ) -> Result<Vec<JobSummary>, LoadError>;
}

pub struct ReqwestJobApi {
    settings: ClientSettings,
    base_url: Url,
    client: reqwest::Client,
    tokens: Arc<dyn TokenStore>,
    on_auth_expired: Option<AuthExpiredHandler>,
}

impl ReqwestJobApi {
    pub fn new(settings: ClientSettings, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(&settings.base_url).map_err(|source| ClientError::InvalidBaseUrl {
                url: settings.base_url.clone(),
                source,
            })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::CannotBeABase(settings.base_url.clone()));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()?;

        Ok(Self {
            settings,
            base_url,
            client,
            tokens,
            on_auth_expired: None,
        })
    }

    /// Registers the process-wide reaction to a 401 (typically: send the user
    /// to the sign-in page). Stored credentials are cleared before it runs.
    pub fn with_auth_expired_handler(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_auth_expired = Some(Arc::new(handler));
        self
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, LoadError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                LoadError::new(
                    LoadErrorKind::Network,
                    format!("API base url cannot take a path: {}", self.base_url),
                )
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url, fallback_message: &str) -> Result<Vec<u8>, LoadError> {
        let mut request = self.client.get(url.clone());
        if let Some(token) = self.tokens.load() {
            board_trace!("GET {} with bearer token {}", url, redact_token(&token));
            request = request.bearer_auth(token);
        } else {
            board_trace!("GET {}", url);
        }

        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = self.read_body(response).await?;

        if status == StatusCode::UNAUTHORIZED {
            self.handle_auth_expired();
            return Err(LoadError::new(
                LoadErrorKind::AuthExpired,
                server_message(&body).unwrap_or_else(|| AUTH_EXPIRED_MESSAGE.to_string()),
            ));
        }
        if !status.is_success() {
            board_debug!("GET {} failed with {}", url, status);
            return Err(LoadError::new(
                LoadErrorKind::HttpStatus(status.as_u16()),
                server_message(&body).unwrap_or_else(|| fallback_message.to_string()),
            ));
        }
        Ok(body)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, LoadError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(too_large(max_bytes, content_len));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(too_large(max_bytes, next_len));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }

    fn handle_auth_expired(&self) {
        board_info!("API rejected credentials; clearing stored token");
        if let Err(err) = self.tokens.clear() {
            board_error!("Failed to clear stored token: {}", err);
        }
        if let Some(handler) = &self.on_auth_expired {
            handler();
        }
    }
}

#[async_trait::async_trait]
impl JobApi for ReqwestJobApi {
    async fn browse_jobs(&self, key: &QueryKey, page: u32) -> Result<ResultPage, LoadError> {
        let mut url = self.endpoint(&["browsejobs"])?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            query.append_pair("q", &key.text);
            if !key.tags.is_empty() {
                query.append_pair("tags", &key.tags.join(","));
            }
        }

        let body = self.get(url.clone(), BROWSE_FALLBACK_MESSAGE).await?;
        let result = normalize_page(&body, page).map_err(|err| malformed(&url, err))?;
        board_info!(
            "Loaded page {} for {:?}: {} jobs (total {:?})",
            result.page,
            key.text,
            result.items.len(),
            result.total_count
        );
        Ok(result)
    }

    async fn job_by_id(&self, id: &str) -> Result<JobSummary, LoadError> {
        let url = self.endpoint(&[self.settings.detail_segment.as_str(), id])?;
        let body = match self.get(url.clone(), DETAIL_FALLBACK_MESSAGE).await {
            Ok(body) => body,
            Err(err) if err.kind == LoadErrorKind::HttpStatus(404) => {
                return Err(not_found(id));
            }
            Err(err) => return Err(err),
        };
        normalize_record(&body)
            .map_err(|err| malformed(&url, err))?
            .ok_or_else(|| not_found(id))
    }

    async fn featured_jobs(
        &self,
        country: Option<&str>,
        limit: usize,
    ) -> Result<Vec<JobSummary>, LoadError> {
        let mut url = match country.map(str::trim).filter(|c| !c.is_empty()) {
            Some(country) => self.endpoint(&["featuredjobs", country])?,
            None => self.endpoint(&["featuredjobs"])?,
        };
        url.query_pairs_mut().append_pair("limit", &limit.to_string());

        let body = self.get(url.clone(), FEATURED_FALLBACK_MESSAGE).await?;
        let mut jobs = normalize_page(&body, 1)
            .map_err(|err| malformed(&url, err))?
            .items;
        jobs.truncate(limit);
        Ok(jobs)
    }
}

fn malformed(url: &Url, err: NormalizeError) -> LoadError {
    board_warn!("Malformed response from {}: {}", url, err);
    LoadError::new(LoadErrorKind::MalformedResponse, err.to_string())
}

fn not_found(id: &str) -> LoadError {
    LoadError::new(
        LoadErrorKind::NotFound,
        format!("The job with ID {id} does not exist or has been removed."),
    )
}

fn too_large(max_bytes: u64, actual: u64) -> LoadError {
    LoadError::new(
        LoadErrorKind::MalformedResponse,
        format!("response too large (max {max_bytes}, actual {actual})"),
    )
}

/// Human-readable `message` field of an error body, when the server sent one.
fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

fn map_reqwest_error(err: reqwest::Error) -> LoadError {
    if err.is_timeout() {
        return LoadError::new(LoadErrorKind::Timeout, err.to_string());
    }
    LoadError::new(LoadErrorKind::Network, err.to_string())
}
