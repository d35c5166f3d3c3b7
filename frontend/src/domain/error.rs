//! Client-side fetch error taxonomy.
//!
//! Every variant is recovered at the controller that produced it and shown as
//! an inline message; none of them end the session.

use crate::domain::ports::RecommendationSourceError;

/// Message shown for a blank handle.
pub const INPUT_VALIDATION_MESSAGE: &str = "Please enter a username.";
/// Message shown when the backend rejects the handle.
pub const INVALID_HANDLE_MESSAGE: &str = "Invalid username. Please try again.";
/// Message shown when the handle has no submissions.
pub const NO_DATA_MESSAGE: &str = "No submissions found for this user.";
/// Message shown for any other failure.
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try later.";

/// Classified outcome of a failed fetch.
///
/// `Display` yields the user-facing message; [`FetchError::ServerError`]
/// keeps the underlying cause in `detail` for logs only.
///
/// # Examples
/// ```
/// use recommender_frontend::domain::FetchError;
///
/// let error = FetchError::server_error("status 502");
/// assert_eq!(error.to_string(), "Server error. Please try later.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The handle was blank; no request was sent.
    #[error("Please enter a username.")]
    InputValidation,
    /// The backend answered 400 for the handle.
    #[error("Invalid username. Please try again.")]
    InvalidHandle,
    /// The backend answered 404: the handle has no submissions.
    #[error("No submissions found for this user.")]
    NoData,
    /// Any other status, an undecodable body, or a transport failure.
    #[error("Server error. Please try later.")]
    ServerError {
        /// Diagnostic cause, never rendered.
        detail: String,
    },
}

impl FetchError {
    /// Build a [`FetchError::ServerError`] with a diagnostic cause.
    pub fn server_error(detail: impl Into<String>) -> Self {
        Self::ServerError {
            detail: detail.into(),
        }
    }

    /// User-facing message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InputValidation => INPUT_VALIDATION_MESSAGE,
            Self::InvalidHandle => INVALID_HANDLE_MESSAGE,
            Self::NoData => NO_DATA_MESSAGE,
            Self::ServerError { .. } => SERVER_ERROR_MESSAGE,
        }
    }

    /// Return whether this error was classified as a server-class failure.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }
}

impl From<RecommendationSourceError> for FetchError {
    fn from(value: RecommendationSourceError) -> Self {
        match value {
            RecommendationSourceError::InvalidHandle => Self::InvalidHandle,
            RecommendationSourceError::NoData => Self::NoData,
            other @ (RecommendationSourceError::UnexpectedStatus { .. }
            | RecommendationSourceError::Transport { .. }
            | RecommendationSourceError::Decode { .. }) => Self::server_error(other.to_string()),
        }
    }
}
