//! Reqwest-backed recommendation source adapter.
//!
//! This adapter owns transport details only: endpoint resolution, query
//! encoding, HTTP status mapping, and JSON decoding into domain read models.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use tracing::debug;

use super::dto::{HistoryResponseDto, RecommendResponseDto};
use crate::domain::ports::{RecommendationSource, RecommendationSourceError};
use crate::domain::{RecommendationSet, SubmissionHistory, UserHandle};

const RECOMMEND_PATH: &str = "recommend";
const HISTORY_PATH: &str = "history";
const HANDLE_QUERY_PARAM: &str = "username";

/// Errors raised while building the adapter.
#[derive(Debug, thiserror::Error)]
pub enum HttpSourceBuildError {
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// An endpoint could not be resolved against the base URL.
    #[error("failed to resolve endpoint `{path}` against {base}: {source}")]
    Endpoint {
        /// Base URL the endpoint was joined onto.
        base: Url,
        /// Relative endpoint path.
        path: &'static str,
        /// Underlying parse failure.
        source: url::ParseError,
    },
}

/// Recommendation source that issues HTTP GET requests against one backend.
#[derive(Debug, Clone)]
pub struct HttpRecommendationSource {
    client: Client,
    recommend_endpoint: Url,
    history_endpoint: Url,
}

impl HttpRecommendationSource {
    /// Build an adapter for the backend rooted at `base_url`.
    ///
    /// Endpoints are resolved relative to `base_url`, so a path prefix such as
    /// `https://host/api/` is kept. `timeout` bounds each whole request; `None`
    /// leaves reqwest's default (no timeout).
    ///
    /// ```rust,ignore
    /// let source = HttpRecommendationSource::new(base_url, None)?;
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed or the
    /// base URL cannot carry relative endpoints.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, HttpSourceBuildError> {
        let base = with_trailing_slash(base_url);
        let recommend_endpoint = resolve(&base, RECOMMEND_PATH)?;
        let history_endpoint = resolve(&base, HISTORY_PATH)?;

        let mut builder = Client::builder();
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        Ok(Self {
            client: builder.build()?,
            recommend_endpoint,
            history_endpoint,
        })
    }

    /// Resolved recommend endpoint.
    pub fn recommend_endpoint(&self) -> &Url {
        &self.recommend_endpoint
    }

    /// Resolved history endpoint.
    pub fn history_endpoint(&self) -> &Url {
        &self.history_endpoint
    }

    async fn get(
        &self,
        endpoint: &Url,
        handle: &UserHandle,
    ) -> Result<(StatusCode, Vec<u8>), RecommendationSourceError> {
        debug!(%endpoint, handle = %handle, "sending backend request");
        let response: Response = self
            .client
            .get(endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[(HANDLE_QUERY_PARAM, handle.as_ref())])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(%endpoint, status = status.as_u16(), bytes = body.len(), "backend responded");
        Ok((status, body.to_vec()))
    }
}

#[async_trait]
impl RecommendationSource for HttpRecommendationSource {
    async fn recommend(
        &self,
        handle: &UserHandle,
    ) -> Result<RecommendationSet, RecommendationSourceError> {
        let (status, body) = self.get(&self.recommend_endpoint, handle).await?;
        if !status.is_success() {
            return Err(map_recommend_status(status, &body));
        }
        parse_recommendations(&body)
    }

    async fn history(
        &self,
        handle: &UserHandle,
    ) -> Result<SubmissionHistory, RecommendationSourceError> {
        let (status, body) = self.get(&self.history_endpoint, handle).await?;
        if !status.is_success() {
            return Err(unexpected_status(status, &body));
        }
        parse_history(&body)
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn resolve(base: &Url, path: &'static str) -> Result<Url, HttpSourceBuildError> {
    base.join(path)
        .map_err(|source| HttpSourceBuildError::Endpoint {
            base: base.clone(),
            path,
            source,
        })
}

fn parse_recommendations(body: &[u8]) -> Result<RecommendationSet, RecommendationSourceError> {
    let decoded: RecommendResponseDto = serde_json::from_slice(body).map_err(|error| {
        RecommendationSourceError::decode(format!("invalid recommend payload: {error}"))
    })?;
    decoded
        .into_domain()
        .map_err(RecommendationSourceError::decode)
}

fn parse_history(body: &[u8]) -> Result<SubmissionHistory, RecommendationSourceError> {
    let decoded: HistoryResponseDto = serde_json::from_slice(body).map_err(|error| {
        RecommendationSourceError::decode(format!("invalid history payload: {error}"))
    })?;
    Ok(decoded.into_domain())
}

fn map_transport_error(error: reqwest::Error) -> RecommendationSourceError {
    RecommendationSourceError::transport(error.to_string())
}

fn map_recommend_status(status: StatusCode, body: &[u8]) -> RecommendationSourceError {
    match status {
        StatusCode::BAD_REQUEST => RecommendationSourceError::invalid_handle(),
        StatusCode::NOT_FOUND => RecommendationSourceError::no_data(),
        _ => unexpected_status(status, body),
    }
}

fn unexpected_status(status: StatusCode, body: &[u8]) -> RecommendationSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        preview
    };
    RecommendationSourceError::unexpected_status(status.as_u16(), message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
