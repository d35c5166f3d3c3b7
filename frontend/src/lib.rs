//! Terminal client for the competitive-programming problem recommender.
//!
//! The crate is split the same way as a hexagonal service:
//!
//! - [`domain`] owns the handle, identity store, navigator, fetch state
//!   machines, and page controllers, plus the `RecommendationSource` port.
//! - [`outbound`] implements the port over HTTP with reqwest.
//! - [`inbound`] drives the controllers from a line-oriented terminal shell.
//!
//! [`config`] loads runtime settings through OrthoConfig.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
