//! HTTP client for the Quorum discussions API

use std::fmt;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use crate::auth::SESSION_COOKIE;
use crate::cache::FetchDiscussions;
use crate::models::{
    Discussion, DiscussionId, DiscussionWithAuthor, NewDiscussion, UpdateDiscussion,
};

/// Client-side view of an API failure.
///
/// The optimistic mutation layer never branches on the variant; every
/// failure triggers the same rollback. The taxonomy exists for callers
/// that present errors to the user.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid client configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

/// The remote create operation, kept behind a trait so the mutation layer
/// is testable without a network
#[async_trait]
pub trait CreateDiscussion: Send + Sync {
    /// Perform exactly one create request; no retry, no error inspection
    async fn create_discussion(&self, input: &NewDiscussion) -> ApiResult<Discussion>;
}

/// reqwest-backed client speaking the discussions wire contract
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session_token: String,
    client: reqwest::Client,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("session_token", &"[REDACTED]")
            .finish()
    }
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session_token: impl Into<String>) -> ApiResult<Self> {
        let base_url = normalize_endpoint(base_url.into())?;
        let session_token = session_token.into().trim().to_string();
        if session_token.is_empty() {
            return Err(ApiError::InvalidConfiguration(
                "session token must not be empty".to_string(),
            ));
        }
        Ok(Self {
            base_url,
            session_token,
            client: reqwest::Client::builder().build()?,
        })
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .header(
                "Cookie",
                format!("{SESSION_COOKIE}={}", self.session_token),
            )
            .header("Accept", "application/json")
    }

    pub async fn list_discussions(&self) -> ApiResult<Vec<DiscussionWithAuthor>> {
        let response = self
            .request(reqwest::Method::GET, "/discussions")
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_discussion(&self, id: &DiscussionId) -> ApiResult<DiscussionWithAuthor> {
        let response = self
            .request(reqwest::Method::GET, &format!("/discussions/{id}"))
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_discussion(&self, input: &NewDiscussion) -> ApiResult<Discussion> {
        let response = self
            .request(reqwest::Method::POST, "/discussions")
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_discussion(
        &self,
        id: &DiscussionId,
        input: &UpdateDiscussion,
    ) -> ApiResult<Discussion> {
        let response = self
            .request(reqwest::Method::PATCH, &format!("/discussions/{id}"))
            .json(input)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete_discussion(&self, id: &DiscussionId) -> ApiResult<Discussion> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/discussions/{id}"))
            .send()
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl CreateDiscussion for ApiClient {
    async fn create_discussion(&self, input: &NewDiscussion) -> ApiResult<Discussion> {
        Self::create_discussion(self, input).await
    }
}

#[async_trait]
impl FetchDiscussions for ApiClient {
    async fn fetch_discussions(&self) -> ApiResult<Vec<DiscussionWithAuthor>> {
        self.list_discussions().await
    }
}

async fn decode<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(error_from_response(status, &body));
    }
    Ok(response.json::<T>().await?)
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
}

/// Map a non-2xx response onto the closed [`ApiError`] taxonomy.
///
/// The server reports failures as a JSON `{message}` envelope; anything
/// else is carried through as raw text.
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| body.trim().to_string());

    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized(message),
        StatusCode::FORBIDDEN => ApiError::Forbidden(message),
        StatusCode::NOT_FOUND => ApiError::NotFound(message),
        _ if message.is_empty() => ApiError::Api(format!("HTTP {}", status.as_u16())),
        _ => ApiError::Api(format!("{message} ({})", status.as_u16())),
    }
}

fn normalize_endpoint(raw: String) -> ApiResult<String> {
    let endpoint = raw.trim();
    if endpoint.is_empty() {
        return Err(ApiError::InvalidConfiguration(
            "endpoint must not be empty".to_string(),
        ));
    }
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(ApiError::InvalidConfiguration(
            "endpoint must include http:// or https://".to_string(),
        ))
    }
}
