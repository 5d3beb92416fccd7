pub mod config;
pub mod download;
pub mod gpu;
pub mod metadata;
pub mod residues;
pub mod sequence;
