use std::collections::BTreeSet;

use thiserror::Error;

use super::atom::Atom;
use super::types::Element;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Bond {
    pub i: usize,
    pub j: usize,
}

impl Bond {
    pub fn new(idx1: usize, idx2: usize) -> Self {
        if idx1 <= idx2 {
            Self { i: idx1, j: idx2 }
        } else {
            Self { i: idx2, j: idx1 }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("atom index {index} out of range (structure has {count} atoms)")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("frame {frame} has {got} atoms, expected {expected}")]
    FrameAtomCount { frame: usize, got: usize, expected: usize },
    #[error("frame {frame} changes the element of atom {index}")]
    FrameElementChange { frame: usize, index: usize },
    #[error("trajectory has no frames")]
    EmptyTrajectory,
}

/// A single configuration of atoms, optionally periodic.
///
/// `charges` and `forces`, when present, are parallel to `atoms`. `fixed`
/// holds indices of atoms held in place by the producing calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub atoms: Vec<Atom>,
    pub cell: Option<[[f64; 3]; 3]>,
    pub fixed: Vec<usize>,
    pub charges: Option<Vec<f64>>,
    pub forces: Option<Vec<[f64; 3]>>,
}

impl Structure {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn atom_count(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_periodic(&self) -> bool {
        self.cell.is_some()
    }

    /// Elements present, in ascending atomic number order.
    pub fn unique_elements(&self) -> Vec<Element> {
        let set: BTreeSet<Element> = self.atoms.iter().map(|a| a.element).collect();
        set.into_iter().collect()
    }

    /// Extract the atoms at `indices` (in the given order) into a new
    /// structure, carrying charges, forces and fixed flags along.
    pub fn select(&self, indices: &[usize]) -> Result<Structure, StructureError> {
        let count = self.atoms.len();
        for &index in indices {
            if index >= count {
                return Err(StructureError::IndexOutOfRange { index, count });
            }
        }
        let atoms = indices.iter().map(|&i| self.atoms[i].clone()).collect();
        let charges = self
            .charges
            .as_ref()
            .map(|q| indices.iter().map(|&i| q[i]).collect());
        let forces = self
            .forces
            .as_ref()
            .map(|f| indices.iter().map(|&i| f[i]).collect());
        let fixed = indices
            .iter()
            .enumerate()
            .filter(|(_, &old)| self.fixed.contains(&old))
            .map(|(new, _)| new)
            .collect();
        Ok(Structure { atoms, cell: self.cell, fixed, charges, forces })
    }

    /// Rotation that brings the cell to its standard (lower triangular)
    /// orientation. Rows are the orthonormalized cell axes; `None` for
    /// non-periodic structures.
    pub fn standard_rotation(&self) -> Option<[[f64; 3]; 3]> {
        let cell = self.cell?;
        let e1 = normalize(cell[0]);
        let p = dot(cell[1], e1);
        let e2 = normalize([
            cell[1][0] - p * e1[0],
            cell[1][1] - p * e1[1],
            cell[1][2] - p * e1[2],
        ]);
        let e3 = [
            e1[1] * e2[2] - e1[2] * e2[1],
            e1[2] * e2[0] - e1[0] * e2[2],
            e1[0] * e2[1] - e1[1] * e2[0],
        ];
        Some([e1, e2, e3])
    }
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(v: [f64; 3]) -> [f64; 3] {
    let n = dot(v, v).sqrt();
    if n == 0.0 {
        return v;
    }
    [v[0] / n, v[1] / n, v[2] / n]
}

/// An ordered sequence of frames sharing one set of atoms.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    frames: Vec<Structure>,
}

impl Trajectory {
    /// Builds a trajectory, checking that every frame has the same atoms
    /// (count and elements) as the first.
    pub fn new(frames: Vec<Structure>) -> Result<Self, StructureError> {
        let first = frames.first().ok_or(StructureError::EmptyTrajectory)?;
        let expected = first.atom_count();
        for (frame, s) in frames.iter().enumerate().skip(1) {
            if s.atom_count() != expected {
                return Err(StructureError::FrameAtomCount {
                    frame,
                    got: s.atom_count(),
                    expected,
                });
            }
            for (index, (a, b)) in s.atoms.iter().zip(&first.atoms).enumerate() {
                if a.element != b.element {
                    return Err(StructureError::FrameElementChange { frame, index });
                }
            }
        }
        Ok(Self { frames })
    }

    #[inline]
    pub fn frames(&self) -> &[Structure] {
        &self.frames
    }

    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The shared atom set, taken from the first frame.
    #[inline]
    pub fn first(&self) -> &Structure {
        &self.frames[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn water() -> Structure {
        Structure {
            atoms: vec![
                Atom::new(Element::O, [0.0, 0.0, 0.119]),
                Atom::new(Element::H, [0.0, 0.763, -0.477]),
                Atom::new(Element::H, [0.0, -0.763, -0.477]),
            ],
            ..Structure::default()
        }
    }

    #[test]
    fn bond_normalizes_index_order() {
        assert_eq!(Bond::new(5, 2), Bond::new(2, 5));
        let b = Bond::new(7, 3);
        assert_eq!((b.i, b.j), (3, 7));
    }

    #[test]
    fn unique_elements_sorted_by_atomic_number() {
        let s = water();
        assert_eq!(s.unique_elements(), vec![Element::H, Element::O]);
    }

    #[test]
    fn select_reindexes_fixed_and_per_atom_data() {
        let mut s = water();
        s.fixed = vec![2];
        s.charges = Some(vec![-0.8, 0.4, 0.4]);
        s.forces = Some(vec![[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);

        let sub = s.select(&[2, 0]).unwrap();
        assert_eq!(sub.atom_count(), 2);
        assert_eq!(sub.atoms[0].element, Element::H);
        assert_eq!(sub.atoms[1].element, Element::O);
        assert_eq!(sub.fixed, vec![0]);
        assert_eq!(sub.charges, Some(vec![0.4, -0.8]));
        assert_eq!(sub.forces.as_ref().unwrap()[0], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn select_rejects_out_of_range_index() {
        let s = water();
        let err = s.select(&[0, 3]).unwrap_err();
        assert_eq!(err, StructureError::IndexOutOfRange { index: 3, count: 3 });
    }

    #[test]
    fn standard_rotation_identity_for_aligned_cell() {
        let mut s = water();
        s.cell = Some([[10.0, 0.0, 0.0], [0.0, 12.0, 0.0], [0.0, 0.0, 14.0]]);
        let q = s.standard_rotation().unwrap();
        for (i, row) in q.iter().enumerate() {
            for (j, v) in row.iter().enumerate() {
                let want = if i == j { 1.0 } else { 0.0 };
                assert!(approx_eq(*v, want, 1e-12));
            }
        }
    }

    #[test]
    fn standard_rotation_none_without_cell() {
        assert!(water().standard_rotation().is_none());
    }

    #[test]
    fn trajectory_validates_frames() {
        let a = water();
        let mut b = water();
        b.atoms[1].position = [0.0, 0.8, -0.5];
        let traj = Trajectory::new(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(traj.frame_count(), 2);

        let mut short = water();
        short.atoms.pop();
        let err = Trajectory::new(vec![a.clone(), short]).unwrap_err();
        assert_eq!(err, StructureError::FrameAtomCount { frame: 1, got: 2, expected: 3 });

        let mut swapped = water();
        swapped.atoms[0] = Atom::new(Element::N, [0.0, 0.0, 0.119]);
        let err = Trajectory::new(vec![a, swapped]).unwrap_err();
        assert_eq!(err, StructureError::FrameElementChange { frame: 1, index: 0 });

        assert_eq!(Trajectory::new(vec![]).unwrap_err(), StructureError::EmptyTrajectory);
    }
}
