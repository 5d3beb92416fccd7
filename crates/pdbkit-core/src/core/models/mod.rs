//! # Core Models Module
//!
//! Plain data structures for the coordinate section of a PDB entry.
//!
//! ## Key Components
//!
//! - [`atom`] - A single ATOM/HETATM record with its columns
//! - [`chain`] - The atoms sharing one chain identifier within a model
//! - [`structure`] - Models of a structure and the chains they contain
//!
//! ## Usage
//!
//! Structures are normally produced by [`crate::core::io::pdb::PdbFile`]; building
//! one by hand looks like:
//!
//! ```ignore
//! use pdbkit::core::models::{atom::Atom, structure::{Model, Structure}};
//!
//! let mut model = Model::new(None);
//! model.add_atom(Atom::new(1, "CA", "GLY", 'A', 1, Point3::origin()));
//! let mut structure = Structure::new();
//! structure.push_model(model);
//! ```

pub mod atom;
pub mod chain;
pub mod structure;
