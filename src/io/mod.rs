//! Reading and writing structure files.
//!
//! Two formats are supported: XYZ (including the extended variant with a
//! `Lattice="..."` cell and per-atom property columns, single or
//! multi-frame) and PDB (`ATOM`/`HETATM`/`CRYST1` records). PDB files hold
//! a single configuration only.

use std::fmt;
use std::io::{BufRead, Write};

pub mod error;
pub mod pdb;
pub mod xyz;

pub use error::Error;

use crate::model::structure::{Structure, Trajectory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Xyz,
    Pdb,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Xyz => write!(f, "XYZ"),
            Format::Pdb => write!(f, "PDB"),
        }
    }
}

/// Reads a single structure; for multi-frame XYZ input this is the first
/// frame.
pub fn read_structure<R: BufRead>(reader: R, format: Format) -> Result<Structure, Error> {
    match format {
        Format::Xyz => xyz::reader::read_one(reader),
        Format::Pdb => pdb::reader::read(reader),
    }
}

/// Reads all frames of a multi-frame XYZ file.
pub fn read_trajectory<R: BufRead>(reader: R, format: Format) -> Result<Trajectory, Error> {
    match format {
        Format::Xyz => xyz::reader::read_all(reader),
        Format::Pdb => Err(Error::UnsupportedTrajectoryFormat(Format::Pdb)),
    }
}

/// Writes a single structure.
pub fn write_structure<W: Write>(
    writer: &mut W,
    structure: &Structure,
    format: Format,
) -> Result<(), Error> {
    match format {
        Format::Xyz => xyz::writer::write(writer, structure),
        Format::Pdb => pdb::writer::write(writer, structure),
    }
}
