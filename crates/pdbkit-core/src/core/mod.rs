//! # Core Module
//!
//! Stateless building blocks shared by the workflows and the command-line tool.
//!
//! - **Residue Codes** ([`residues`]) - One-letter / three-letter amino acid translation
//!   with caller-supplied overrides
//! - **Molecular Representation** ([`models`]) - Atoms, chains, models and structures
//! - **File I/O** ([`io`]) - PDB coordinate files, the RCSB sequence feed and binary persistence
//! - **Header Metadata** ([`metadata`]) - Crystallization pH and resolution from PDB headers
//! - **Accelerators** ([`devices`]) - Picking the most idle GPU from its memory table

pub mod devices;
pub mod io;
pub mod metadata;
pub mod models;
pub mod residues;
