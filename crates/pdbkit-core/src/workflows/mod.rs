//! # Workflows Module
//!
//! High-level entry points that talk to the structure database.
//!
//! - **Structure Download** ([`download`]) - Fetches a coordinate file and optionally keeps
//!   a single chain of its first model.
//! - **Sequence Retrieval** ([`sequence`]) - Fetches one or all chain sequences, following
//!   the redirect of a superseded identifier to its replacement.
//!
//! Both report their steps through a [`progress::ProgressReporter`] so front ends can
//! display activity without the library knowing about terminals.

pub mod download;
pub mod progress;
pub mod sequence;
