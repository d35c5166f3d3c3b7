//! Recommendation client service.
//!
//! Wraps the [`RecommendationSource`] port and classifies every outcome into
//! the client taxonomy ([`FetchError`]). Exactly one port call is made per
//! operation; nothing is retried or cached.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::ports::{RecommendationSource, RecommendationSourceError};
use crate::domain::{FetchError, RecommendationSet, SubmissionHistory, UserHandle};

/// Client for the recommend and history read operations.
#[derive(Clone)]
pub struct RecommendationClient {
    source: Arc<dyn RecommendationSource>,
}

impl RecommendationClient {
    /// Create a client backed by `source`.
    pub fn new(source: Arc<dyn RecommendationSource>) -> Self {
        Self { source }
    }

    /// Validate `handle` against the backend and fetch its recommendations.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidHandle`] when the backend rejects the handle.
    /// - [`FetchError::NoData`] when the handle has no submissions.
    /// - [`FetchError::ServerError`] for every other failure.
    pub async fn validate_and_fetch_recommendations(
        &self,
        handle: &UserHandle,
    ) -> Result<RecommendationSet, FetchError> {
        debug!(handle = %handle, "requesting recommendations");
        self.source
            .recommend(handle)
            .await
            .map_err(|error| Self::classify("recommend", handle, error))
    }

    /// Fetch the submission history for `handle`.
    ///
    /// The history endpoint does not distinguish client errors, so every
    /// failure is a [`FetchError::ServerError`].
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ServerError`] for any failure.
    pub async fn fetch_history(&self, handle: &UserHandle) -> Result<SubmissionHistory, FetchError> {
        debug!(handle = %handle, "requesting history");
        self.source.history(handle).await.map_err(|error| {
            let detail = error.to_string();
            warn!(handle = %handle, operation = "history", %detail, "fetch failed");
            FetchError::server_error(detail)
        })
    }

    fn classify(
        operation: &'static str,
        handle: &UserHandle,
        error: RecommendationSourceError,
    ) -> FetchError {
        let classified = FetchError::from(error);
        match &classified {
            FetchError::ServerError { detail } => {
                warn!(handle = %handle, operation, %detail, "fetch failed");
            }
            other => debug!(handle = %handle, operation, error = %other, "fetch rejected"),
        }
        classified
    }
}
