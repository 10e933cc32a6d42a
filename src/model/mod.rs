//! Core data structures representing atomic structures and trajectories.
//!
//! This module provides the foundational types that flow through `molscene`:
//!
//! - [`atom`] – Minimal atom representation with element and Cartesian coordinates.
//! - [`types`] – Periodic table elements with covalent radii.
//! - [`structure`] – Atom collections with optional cell, charges, forces and
//!   fixed-atom flags, plus multi-frame trajectories.
//!
//! The data model intentionally carries only what scene composition needs:
//! geometry and the per-atom annotations the viewers overlay ([`Structure`]),
//! and validated frame sequences for animation ([`Trajectory`]).
//!
//! [`Structure`]: structure::Structure
//! [`Trajectory`]: structure::Trajectory

pub mod atom;
pub mod structure;
pub mod types;
