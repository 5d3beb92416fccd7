//! Provides input/output functionality for the file formats handled by pdbkit.
//!
//! Structure files go through the [`traits::StructureFile`] interface, the
//! sequence feed served by RCSB is parsed by [`fasta`], and arbitrary values
//! can be saved and restored with [`persist`].

pub mod fasta;
pub mod pdb;
pub mod persist;
pub mod traits;
