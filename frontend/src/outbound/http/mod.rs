//! HTTP outbound adapter.
//!
//! This module provides a thin reqwest implementation of the
//! `RecommendationSource` port.

mod dto;
mod http_source;

pub use http_source::{HttpRecommendationSource, HttpSourceBuildError};
