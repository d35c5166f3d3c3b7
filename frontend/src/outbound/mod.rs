//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed client for the recommendation backend.
//!
//! Adapters are thin translators between transport representations and domain
//! types. They contain no page or session logic.

pub mod http;
