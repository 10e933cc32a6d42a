//! Style parameter resolution.
//!
//! Each of the four scene styles accepts its own set of parameters.
//! Resolution is deterministic: scalar parameters take the user value when
//! present and the default otherwise; mapping parameters (`colors`, `sizes`)
//! are merged key-by-key over the defaults and then filtered to the elements
//! actually present in the structure. Caller-supplied overrides are never
//! mutated.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::color::Rgba;
use super::error::Error;
use super::palette::Palette;
use crate::model::types::Element;

/// Default stick (cylinder) radius in angstroms.
pub const DEFAULT_STICK_RADIUS: f64 = 0.12;
/// Default ball scale for ball-and-stick scenes.
pub const BALL_AND_STICK_SCALE: f64 = 0.4;
/// Default ball scale for space-filling and animation scenes.
pub const SPACE_FILLING_SCALE: f64 = 1.0;
/// Default first keyframe number.
pub const DEFAULT_START: i64 = 0;
/// Default keyframe stride.
pub const DEFAULT_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StyleKind {
    #[default]
    BallAndStick,
    Stick,
    SpaceFilling,
    Animation,
}

/// Parameter names, used to report unpermitted parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Bicolor,
    Cartoon,
    Colors,
    Radius,
    Scale,
    Sizes,
    StickColor,
    Subdivision,
    Start,
    Step,
}

impl Param {
    fn name(self) -> &'static str {
        match self {
            Param::Bicolor => "bicolor",
            Param::Cartoon => "cartoon",
            Param::Colors => "colors",
            Param::Radius => "radius",
            Param::Scale => "scale",
            Param::Sizes => "sizes",
            Param::StickColor => "stick_color",
            Param::Subdivision => "subdivision",
            Param::Start => "start",
            Param::Step => "step",
        }
    }
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::BallAndStick => "ball_and_stick",
            StyleKind::Stick => "stick",
            StyleKind::SpaceFilling => "space_filling",
            StyleKind::Animation => "animation",
        }
    }

    /// Whether the style draws spheres for atoms.
    pub fn has_balls(&self) -> bool {
        !matches!(self, StyleKind::Stick)
    }

    /// Whether the style draws bond cylinders.
    pub fn has_sticks(&self) -> bool {
        matches!(self, StyleKind::BallAndStick | StyleKind::Stick)
    }

    pub fn default_scale(&self) -> f64 {
        match self {
            StyleKind::BallAndStick => BALL_AND_STICK_SCALE,
            _ => SPACE_FILLING_SCALE,
        }
    }

    fn permits(&self, param: Param) -> bool {
        match param {
            Param::Colors | Param::Cartoon => true,
            Param::Bicolor | Param::Radius | Param::StickColor => self.has_sticks(),
            Param::Scale | Param::Sizes | Param::Subdivision => self.has_balls(),
            Param::Start | Param::Step => matches!(self, StyleKind::Animation),
        }
    }
}

impl fmt::Display for StyleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fresnel-mix outline ("cartoon") material settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cartoon {
    pub apply: bool,
    /// Fresnel IOR; controls the outline thickness.
    pub ior: f64,
    /// Outline color.
    pub color: Rgba,
}

impl Default for Cartoon {
    fn default() -> Self {
        Self { apply: false, ior: 1.45, color: Rgba::black() }
    }
}

/// Subdivision-surface modifier settings for atom spheres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subdivision {
    pub apply: bool,
    pub level: u32,
    pub render_levels: u32,
}

impl Default for Subdivision {
    fn default() -> Self {
        Self { apply: false, level: 1, render_levels: 2 }
    }
}

/// User-supplied parameter overrides. Empty maps and `None` fields mean
/// "use the default".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleOverrides {
    pub bicolor: Option<bool>,
    pub cartoon: Option<Cartoon>,
    pub colors: BTreeMap<Element, Rgba>,
    pub radius: Option<f64>,
    pub scale: Option<f64>,
    pub sizes: BTreeMap<Element, f64>,
    pub stick_color: Option<Rgba>,
    pub subdivision: Option<Subdivision>,
    pub start: Option<i64>,
    pub step: Option<i64>,
}

/// Fully resolved parameters for one style. Fields a style does not use
/// hold their defaults and are simply not emitted into its scene entry.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub kind: StyleKind,
    pub colors: BTreeMap<Element, Rgba>,
    pub sizes: BTreeMap<Element, f64>,
    pub radius: f64,
    pub scale: f64,
    pub bicolor: bool,
    pub stick_color: Rgba,
    pub cartoon: Cartoon,
    pub subdivision: Subdivision,
    pub start: i64,
    pub step: i64,
}

/// Resolves `overrides` against the defaults for `kind`.
///
/// `elements` is the set of elements present in the structure (from
/// [`Structure::unique_elements`](crate::model::structure::Structure::unique_elements));
/// the resolved `colors` and `sizes` maps cover exactly these elements.
pub fn resolve(
    kind: StyleKind,
    elements: &[Element],
    palette: &Palette,
    overrides: &StyleOverrides,
) -> Result<ResolvedStyle, Error> {
    check_permitted(kind, overrides)?;
    check_values(overrides)?;

    let mut colors = BTreeMap::new();
    let mut sizes = BTreeMap::new();
    for &element in elements {
        let color = overrides
            .colors
            .get(&element)
            .copied()
            .unwrap_or_else(|| palette.get(element));
        colors.insert(element, color);
        let size = overrides
            .sizes
            .get(&element)
            .copied()
            .unwrap_or_else(|| element.covalent_radius());
        sizes.insert(element, size);
    }

    Ok(ResolvedStyle {
        kind,
        colors,
        sizes,
        radius: overrides.radius.unwrap_or(DEFAULT_STICK_RADIUS),
        scale: overrides.scale.unwrap_or_else(|| kind.default_scale()),
        bicolor: overrides.bicolor.unwrap_or(false),
        stick_color: overrides.stick_color.unwrap_or(Rgba::grey()),
        cartoon: overrides.cartoon.unwrap_or_default(),
        subdivision: overrides.subdivision.unwrap_or_default(),
        start: overrides.start.unwrap_or(DEFAULT_START),
        step: overrides.step.unwrap_or(DEFAULT_STEP),
    })
}

fn check_permitted(kind: StyleKind, overrides: &StyleOverrides) -> Result<(), Error> {
    let supplied = [
        (Param::Bicolor, overrides.bicolor.is_some()),
        (Param::Cartoon, overrides.cartoon.is_some()),
        (Param::Colors, !overrides.colors.is_empty()),
        (Param::Radius, overrides.radius.is_some()),
        (Param::Scale, overrides.scale.is_some()),
        (Param::Sizes, !overrides.sizes.is_empty()),
        (Param::StickColor, overrides.stick_color.is_some()),
        (Param::Subdivision, overrides.subdivision.is_some()),
        (Param::Start, overrides.start.is_some()),
        (Param::Step, overrides.step.is_some()),
    ];
    for (param, given) in supplied {
        if given && !kind.permits(param) {
            return Err(Error::UnknownParameter { style: kind.as_str(), parameter: param.name() });
        }
    }
    Ok(())
}

fn check_values(overrides: &StyleOverrides) -> Result<(), Error> {
    if let Some(radius) = overrides.radius {
        if !(radius > 0.0) {
            return Err(Error::invalid_parameter("radius", format!("must be positive, got {radius}")));
        }
    }
    if let Some(scale) = overrides.scale {
        if !(scale > 0.0) {
            return Err(Error::invalid_parameter("scale", format!("must be positive, got {scale}")));
        }
    }
    for (element, &size) in &overrides.sizes {
        if !(size > 0.0) {
            return Err(Error::invalid_parameter(
                "sizes",
                format!("size for {element} must be positive, got {size}"),
            ));
        }
    }
    if let Some(step) = overrides.step {
        if step < 1 {
            return Err(Error::invalid_parameter("step", format!("must be at least 1, got {step}")));
        }
    }
    Ok(())
}
