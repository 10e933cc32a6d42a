//! PDB reading and writing.

pub mod reader;
pub mod writer;
