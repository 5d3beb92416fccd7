//! # Remote Module
//!
//! Blocking HTTP access to the RCSB structure database.
//!
//! - [`config`] - Endpoint templates, timeout and user agent
//! - [`client`] - The [`client::HttpSource`] seam and its `reqwest` implementation
//! - [`error`] - Transport-level failures

pub mod client;
pub mod config;
pub mod error;
