//! Driven port for the recommendation backend's two read endpoints.
//!
//! The domain owns the response contract; adapters own transport, status
//! mapping, and decoding.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{RecommendationSet, SubmissionHistory, UserHandle};

define_port_error! {
    /// Errors surfaced while calling the recommendation backend.
    pub enum RecommendationSourceError {
        /// The backend rejected the handle (HTTP 400 on recommend).
        InvalidHandle =>
            "backend rejected the handle",
        /// The handle exists but has no submissions (HTTP 404 on recommend).
        NoData =>
            "backend has no submissions for the handle",
        /// The backend answered with a status this endpoint does not classify.
        UnexpectedStatus { status: u16, message: String } =>
            "backend answered status {status}: {message}",
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "backend transport failed: {message}",
        /// A success response could not be decoded.
        Decode { message: String } =>
            "backend response decode failed: {message}",
    }
}

/// Port for reading recommendations and submission history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecommendationSource: Send + Sync {
    /// Validate `handle` and fetch its recommendations in one round-trip.
    ///
    /// # Examples
    ///
    /// ```
    /// use recommender_frontend::domain::UserHandle;
    /// use recommender_frontend::domain::ports::{
    ///     FixtureRecommendationSource, RecommendationSource,
    /// };
    ///
    /// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    /// let handle = UserHandle::new("tourist")?;
    /// let set = runtime.block_on(FixtureRecommendationSource.recommend(&handle))?;
    /// assert!(set.recommendations.is_empty());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    async fn recommend(
        &self,
        handle: &UserHandle,
    ) -> Result<RecommendationSet, RecommendationSourceError>;

    /// Fetch the submission history for `handle`.
    async fn history(
        &self,
        handle: &UserHandle,
    ) -> Result<SubmissionHistory, RecommendationSourceError>;
}

/// Fixture implementation returning empty payloads for every handle.
///
/// Stands in for a backend that knows every handle but has nothing to
/// recommend and no recorded submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureRecommendationSource;

#[async_trait]
impl RecommendationSource for FixtureRecommendationSource {
    async fn recommend(
        &self,
        _handle: &UserHandle,
    ) -> Result<RecommendationSet, RecommendationSourceError> {
        Ok(RecommendationSet::default())
    }

    async fn history(
        &self,
        _handle: &UserHandle,
    ) -> Result<SubmissionHistory, RecommendationSourceError> {
        Ok(SubmissionHistory::default())
    }
}
