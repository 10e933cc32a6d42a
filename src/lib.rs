//! A pure Rust toolkit for turning atomic structures into render-ready
//! scenes: Blender Python scripts for publication images and animations, and
//! standalone NGL viewer pages for interactive inspection in a browser.
//!
//! # Features
//!
//! - **Structure I/O** — Read XYZ, extended-XYZ (lattice, forces, charges,
//!   constraints) and PDB files; multi-frame XYZ trajectories
//! - **Bond perception** — Covalent-radius distance cutoffs with a uniform
//!   cell grid for large systems
//! - **Blender scenes** — Ball-and-stick, stick, space-filling and keyframed
//!   animation styles with per-element colors, bicolored bonds, cartoon
//!   shading and subdivision surfaces
//! - **Viewer pages** — Self-contained HTML using NGL, with element color
//!   schemes, atom labels, force arrows, charge coloring and a hover tooltip
//!
//! # Quick Start
//!
//! Compose a scene document from a structure and render it to a Blender
//! script:
//!
//! ```
//! use molscene::{Atom, Element, Structure};
//! use molscene::scene::{compose, detect_bonds, render, PaletteKind, StyleKind,
//!                       StyleSource, StyleSpec};
//!
//! // Build a water molecule
//! let mut structure = Structure::new();
//! structure.atoms.push(Atom::new(Element::O, [0.000,  0.000,  0.119]));
//! structure.atoms.push(Atom::new(Element::H, [0.000,  0.763, -0.477]));
//! structure.atoms.push(Atom::new(Element::H, [0.000, -0.763, -0.477]));
//!
//! // Two O-H bonds fall inside the covalent cutoff
//! assert_eq!(detect_bonds(&structure, 1.0).len(), 2);
//!
//! let spec = StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&structure));
//! let doc = compose(&[spec], PaletteKind::Default.palette())?;
//! let script = render(&doc)?;
//! assert!(script.contains("import bpy"));
//! # Ok::<(), molscene::scene::Error>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`] — Structure and trajectory file I/O (XYZ, extended XYZ, PDB)
//! - [`model`] — Atoms, elements, structures and trajectories
//! - [`scene`] — Scene composition and Blender script generation
//! - [`viewer`] — NGL viewer page generation
//!
//! # Data Types
//!
//! - [`Structure`] — Atoms with optional cell, constraints, charges and forces
//! - [`Trajectory`] — A sequence of frames with consistent atoms
//! - [`Atom`] — Single atom with element and Cartesian coordinates
//! - [`Bond`] — Unordered pair of bonded atom indices
//! - [`Element`] — Chemical element (H through Og)

pub mod io;
pub mod model;
pub mod scene;
pub mod viewer;

pub use model::atom::Atom;
pub use model::structure::{Bond, Structure, StructureError, Trajectory};
pub use model::types::{Element, ParseElementError};
