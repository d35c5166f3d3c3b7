//! Domain primitives, session state, and page controllers.
//!
//! Purpose: keep every piece of client behaviour that has real control flow
//! (identity propagation, fetch lifecycles, outcome classification) free of
//! transport and terminal concerns so adapters stay thin.
//!
//! Public surface:
//! - UserHandle — validated, non-blank account handle.
//! - IdentityStore — session-wide slot holding the committed handle.
//! - Navigator / Location — route table and identity guard.
//! - FetchState — per-mount lifecycle of one network read.
//! - RecommendationClient — classifies port results into `FetchError`.
//! - pages — Entry, Recommendations, and History controllers.

pub mod client;
pub mod error;
pub mod fetch_state;
pub mod handle;
pub mod identity;
pub mod navigation;
pub mod pages;
pub mod ports;
pub mod problem;

pub use self::client::RecommendationClient;
pub use self::error::FetchError;
pub use self::fetch_state::{FetchPhase, FetchState, FetchTransitionError};
pub use self::handle::{HandleValidationError, UserHandle};
pub use self::identity::IdentityStore;
pub use self::navigation::{Location, Navigation, Navigator, RouteAccess};
pub use self::problem::{HistoryEntry, Recommendation, RecommendationSet, SubmissionHistory};
