//! Distance-based bond derivation.
//!
//! Two atoms are bonded when their separation is within the sum of their
//! covalent radii scaled by a tolerance factor, plus a small additive skin.
//! Candidate pairs come from a uniform cell grid sized by the largest pair
//! cutoff, so the search stays near-linear in atom count.

use std::collections::HashMap;

use crate::model::structure::{Bond, Structure};

/// Additive skin on top of the scaled radii sum, in angstroms.
const SKIN: f64 = 0.3;

/// Grid of cubic cells mapping cell coordinates to atom indices.
struct CellGrid {
    inv_cell_size: f64,
    cells: HashMap<(i32, i32, i32), Vec<usize>>,
}

impl CellGrid {
    fn build(positions: &[[f64; 3]], cell_size: f64) -> Self {
        let mut grid = Self { inv_cell_size: 1.0 / cell_size, cells: HashMap::new() };
        for (idx, pos) in positions.iter().enumerate() {
            grid.cells.entry(grid.coords(*pos)).or_default().push(idx);
        }
        grid
    }

    fn coords(&self, pos: [f64; 3]) -> (i32, i32, i32) {
        (
            (pos[0] * self.inv_cell_size).floor() as i32,
            (pos[1] * self.inv_cell_size).floor() as i32,
            (pos[2] * self.inv_cell_size).floor() as i32,
        )
    }

    /// Indices in the 27-cell neighborhood around `pos`.
    fn candidates(&self, pos: [f64; 3]) -> Vec<usize> {
        let (cx, cy, cz) = self.coords(pos);
        let mut out = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if let Some(indices) = self.cells.get(&(cx + dx, cy + dy, cz + dz)) {
                        out.extend_from_slice(indices);
                    }
                }
            }
        }
        out
    }
}

/// Derives bonds from interatomic distances.
///
/// `scale` multiplies every radii sum (1.0 keeps the tabulated cutoffs;
/// larger values bond more generously). The result holds exactly one entry
/// per unordered pair, sorted by `(i, j)`.
pub fn detect_bonds(structure: &Structure, scale: f64) -> Vec<Bond> {
    let positions: Vec<[f64; 3]> = structure.atoms.iter().map(|a| a.position).collect();
    if positions.len() < 2 {
        return Vec::new();
    }

    let radii: Vec<f64> = structure
        .atoms
        .iter()
        .map(|a| a.element.covalent_radius())
        .collect();
    let max_radius = radii.iter().cloned().fold(0.0, f64::max);
    let max_cutoff = 2.0 * max_radius * scale + SKIN;
    let grid = CellGrid::build(&positions, max_cutoff.max(1e-6));

    let mut bonds = Vec::new();
    for i in 0..positions.len() {
        for j in grid.candidates(positions[i]) {
            if j <= i {
                continue;
            }
            let cutoff = (radii[i] + radii[j]) * scale + SKIN;
            if cutoff <= 0.0 {
                continue;
            }
            let d = [
                positions[i][0] - positions[j][0],
                positions[i][1] - positions[j][1],
                positions[i][2] - positions[j][2],
            ];
            let dist_sq = d[0] * d[0] + d[1] * d[1] + d[2] * d[2];
            if dist_sq <= cutoff * cutoff {
                bonds.push(Bond::new(i, j));
            }
        }
    }
    bonds.sort_unstable();
    bonds.dedup();
    bonds
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Element;

    fn structure(atoms: Vec<Atom>) -> Structure {
        Structure { atoms, ..Structure::default() }
    }

    #[test]
    fn empty_and_single_atom_yield_no_bonds() {
        assert!(detect_bonds(&structure(vec![]), 1.0).is_empty());
        let s = structure(vec![Atom::new(Element::H, [0.0; 3])]);
        assert!(detect_bonds(&s, 1.0).is_empty());
    }

    #[test]
    fn water_has_two_oh_bonds() {
        let s = structure(vec![
            Atom::new(Element::O, [0.0, 0.0, 0.119]),
            Atom::new(Element::H, [0.0, 0.763, -0.477]),
            Atom::new(Element::H, [0.0, -0.763, -0.477]),
        ]);
        let bonds = detect_bonds(&s, 1.0);
        assert_eq!(bonds, vec![Bond::new(0, 1), Bond::new(0, 2)]);
    }

    #[test]
    fn distant_atoms_are_not_bonded() {
        let s = structure(vec![
            Atom::new(Element::C, [0.0; 3]),
            Atom::new(Element::C, [5.0, 0.0, 0.0]),
        ]);
        assert!(detect_bonds(&s, 1.0).is_empty());
    }

    #[test]
    fn scale_widens_the_cutoff() {
        // C-C at 2.0 A: cutoff at scale 1.0 is 1.82, at 1.2 it is 2.124.
        let s = structure(vec![
            Atom::new(Element::C, [0.0; 3]),
            Atom::new(Element::C, [2.0, 0.0, 0.0]),
        ]);
        assert!(detect_bonds(&s, 1.0).is_empty());
        assert_eq!(detect_bonds(&s, 1.2), vec![Bond::new(0, 1)]);
    }

    #[test]
    fn negative_scale_never_bonds() {
        // A negative cutoff must not be squared into a positive one. The
        // atoms are nearly coincident so they share a grid cell even when
        // the cell size degenerates.
        let s = structure(vec![
            Atom::new(Element::H, [0.0; 3]),
            Atom::new(Element::H, [1e-7, 0.0, 0.0]),
        ]);
        assert!(detect_bonds(&s, -1.0).is_empty());
        assert_eq!(detect_bonds(&s, 1.0), vec![Bond::new(0, 1)]);
    }

    #[test]
    fn pairs_are_unique_and_sorted() {
        // A tight H4 cluster where every pair is in range.
        let s = structure(vec![
            Atom::new(Element::H, [0.0, 0.0, 0.0]),
            Atom::new(Element::H, [0.7, 0.0, 0.0]),
            Atom::new(Element::H, [0.0, 0.7, 0.0]),
            Atom::new(Element::H, [0.0, 0.0, 0.7]),
        ]);
        let bonds = detect_bonds(&s, 1.0);
        let mut sorted = bonds.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(bonds, sorted);
        assert_eq!(bonds.len(), 6);
    }

    #[test]
    fn grid_finds_pairs_across_cell_boundaries() {
        let mut atoms = Vec::new();
        for k in 0..10 {
            atoms.push(Atom::new(Element::C, [1.4 * k as f64, 0.0, 0.0]));
        }
        let bonds = detect_bonds(&structure(atoms), 1.0);
        assert_eq!(bonds.len(), 9);
        for (k, b) in bonds.iter().enumerate() {
            assert_eq!(*b, Bond::new(k, k + 1));
        }
    }
}
