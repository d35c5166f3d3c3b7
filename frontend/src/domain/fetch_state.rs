//! Per-mount lifecycle of one network read.
//!
//! Transitions only move forward: `Idle → Loading → {Success | Error}`.
//! Anything else is rejected so a controller can never issue a second fetch or
//! overwrite a settled result within one mount.

use std::fmt;

/// Discriminant of a [`FetchState`], used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPhase {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// The request succeeded.
    Success,
    /// The request failed.
    Error,
}

impl fmt::Display for FetchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success => "success",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Rejected lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("fetch state cannot move from {from} to {to}")]
pub struct FetchTransitionError {
    /// Phase the state was in.
    pub from: FetchPhase,
    /// Phase the caller tried to reach.
    pub to: FetchPhase,
}

/// Lifecycle state of a page-local fetch.
///
/// # Examples
/// ```
/// use recommender_frontend::domain::FetchState;
///
/// let mut state = FetchState::<Vec<u32>>::default();
/// state.begin().expect("idle state can start loading");
/// state.settle(Ok(vec![1, 2])).expect("loading state can settle");
/// assert_eq!(state.success(), Some(&vec![1, 2]));
/// assert!(state.begin().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState<T> {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The request succeeded with this payload.
    Success(T),
    /// The request failed; the message is ready to render.
    Error(String),
}

impl<T> FetchState<T> {
    /// Current phase.
    pub fn phase(&self) -> FetchPhase {
        match self {
            Self::Idle => FetchPhase::Idle,
            Self::Loading => FetchPhase::Loading,
            Self::Success(_) => FetchPhase::Success,
            Self::Error(_) => FetchPhase::Error,
        }
    }

    /// Move from `Idle` to `Loading`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchTransitionError`] unless the state is `Idle`.
    pub fn begin(&mut self) -> Result<(), FetchTransitionError> {
        match self {
            Self::Idle => {
                *self = Self::Loading;
                Ok(())
            }
            other => Err(FetchTransitionError {
                from: other.phase(),
                to: FetchPhase::Loading,
            }),
        }
    }

    /// Move from `Loading` to `Success` or `Error`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchTransitionError`] unless the state is `Loading`.
    pub fn settle(&mut self, outcome: Result<T, String>) -> Result<(), FetchTransitionError> {
        if !matches!(self, Self::Loading) {
            let to = if outcome.is_ok() {
                FetchPhase::Success
            } else {
                FetchPhase::Error
            };
            return Err(FetchTransitionError {
                from: self.phase(),
                to,
            });
        }
        *self = match outcome {
            Ok(value) => Self::Success(value),
            Err(message) => Self::Error(message),
        };
        Ok(())
    }

    /// Return whether a result has been recorded.
    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Success(_) | Self::Error(_))
    }

    /// Successful payload, if any.
    pub fn success(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    /// Error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
