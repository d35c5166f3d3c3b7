//! Inbound adapters that drive the domain from user input.
//!
//! - **terminal**: line-oriented shell rendering pages as plain text.

pub mod terminal;
