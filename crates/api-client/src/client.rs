//! HTTP client for the masjid records API.
//!
//! The records API owns every member, payment, imam, income and expense
//! record as well as the recycle bin and user accounts. This client only
//! reads and forwards; all ledger figures are computed by `masjid-core`.

use std::time::Duration;

use log::debug;
use masjid_core::errors::{Error, Result, ValidationError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Default timeout for API requests.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default base URL of the records API.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Responses come either bare or wrapped as `{ "data": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(inner) => inner,
        }
    }
}

/// HTTP client for the records API.
///
/// Cloning is cheap; the underlying connection pool is shared.
///
/// # Example
///
/// ```ignore
/// let client = MasjidApiClient::new("http://localhost:5000/api")?.with_token(&token)?;
/// let members = client.list_members().await?;
/// ```
#[derive(Debug, Clone)]
pub struct MasjidApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl MasjidApiClient {
    /// Create a client without credentials.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Unexpected(format!("Failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header: None,
        })
    }

    /// A copy of this client that sends `token` as a bearer token.
    pub fn with_token(&self, token: &str) -> Result<Self> {
        let auth_header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| Error::Unauthorized("Malformed access token".to_string()))?;
        Ok(Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            auth_header: Some(auth_header),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    /// Make a GET request and parse the (possibly enveloped) response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!("[MasjidApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::Collaborator(format!("Request failed: {}", e)))?;

        parse_response(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("[MasjidApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Collaborator(format!("Request failed: {}", e)))?;

        parse_response(response).await
    }

    pub(crate) async fn put<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!("[MasjidApi] PUT {}", url);

        let response = self
            .client
            .put(&url)
            .headers(self.headers())
            .json(body)
            .send()
            .await
            .map_err(|e| Error::Collaborator(format!("Request failed: {}", e)))?;

        parse_response(response).await
    }

    /// POST without a body, ignoring whatever the API answers on success.
    pub(crate) async fn post_empty(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!("[MasjidApi] POST {}", url);

        let response = self
            .client
            .post(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::Collaborator(format!("Request failed: {}", e)))?;

        check_status(response).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        let url = self.url(path);
        debug!("[MasjidApi] DELETE {}", url);

        let response = self
            .client
            .delete(&url)
            .headers(self.headers())
            .send()
            .await
            .map_err(|e| Error::Collaborator(format!("Request failed: {}", e)))?;

        check_status(response).await
    }
}

async fn read_body(response: reqwest::Response) -> Result<(StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| Error::Collaborator(format!("Failed to read response: {}", e)))?;
    Ok((status, body))
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let (status, body) = read_body(response).await?;
    decode_body(status, &body)
}

async fn check_status(response: reqwest::Response) -> Result<()> {
    let (status, body) = read_body(response).await?;
    if status.is_success() {
        Ok(())
    } else {
        Err(error_for_status(status, &body))
    }
}

/// Decodes a response body, unwrapping a `{ "data": ... }` envelope.
pub(crate) fn decode_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> Result<T> {
    if !status.is_success() {
        return Err(error_for_status(status, body));
    }
    serde_json::from_str::<Envelope<T>>(body)
        .map(Envelope::into_inner)
        .map_err(|e| {
            Error::Collaborator(format!(
                "Failed to parse response: {} - {}",
                e,
                body.chars().take(200).collect::<String>()
            ))
        })
}

/// Maps an error status to the matching core error, keeping the API's message.
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|err| err.message.or(err.error))
        .unwrap_or_else(|| {
            let snippet: String = body.chars().take(200).collect();
            if snippet.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                snippet
            }
        });

    match status {
        StatusCode::UNAUTHORIZED => Error::Unauthorized(message),
        StatusCode::FORBIDDEN => Error::Forbidden(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Validation(ValidationError::InvalidInput(message))
        }
        _ => Error::Collaborator(format!("API error {}: {}", status, message)),
    }
}
