//! # pdbkit Core Library
//!
//! Utilities for working with entries of the Protein Data Bank: residue code
//! translation, structure and sequence retrieval, header metadata extraction,
//! accelerator selection and binary persistence of results.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers:
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Structure`, `Chain`, `Atom`),
//!   residue code tables, file formats (PDB, the RCSB sequence feed, binary dumps),
//!   metadata extractors and device selection.
//!
//! - **[`remote`]: The Transport.** Endpoint configuration and the blocking HTTP
//!   client used to reach the structure database, behind the [`remote::client::HttpSource`]
//!   trait.
//!
//! - **[`workflows`]: The Public API.** Complete procedures that tie `remote` and
//!   `core` together: downloading a structure (optionally reduced to one chain) and
//!   fetching sequences while following superseded identifiers.

pub mod core;
pub mod remote;
pub mod workflows;
