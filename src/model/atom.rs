//! Single-atom representation.

use super::types::Element;

/// One atom: an element at a Cartesian position.
///
/// Positions are in angstroms throughout the crate, matching the file
/// formats it reads and the geometry the generated scenes draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    pub element: Element,
    /// Cartesian position in angstroms.
    pub position: [f64; 3],
}

impl Atom {
    pub fn new(element: Element, position: [f64; 3]) -> Self {
        Self { element, position }
    }
}
