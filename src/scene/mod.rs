//! Scene composition: styles, palettes, bonds and Blender script output.

mod bonds;
mod color;
mod doc;
mod error;
mod geometry;
mod palette;
mod script;
mod style;

pub use bonds::detect_bonds;
pub use color::{ParseColorError, Rgba};
pub use doc::{compose, SceneDoc, StyleEntry, StyleSource, StyleSpec};
pub use error::Error;
pub use geometry::CylinderSegment;
pub use palette::{Palette, PaletteKind};
pub use script::{render, write_script};
pub use style::{
    resolve, Cartoon, ResolvedStyle, StyleKind, StyleOverrides, Subdivision,
    BALL_AND_STICK_SCALE, DEFAULT_STICK_RADIUS, SPACE_FILLING_SCALE,
};
