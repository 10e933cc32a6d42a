//! Declarative scene documents.
//!
//! A [`SceneDoc`] is the JSON payload substituted into the Blender script
//! template: one entry per style, carrying atom symbols and positions,
//! resolved materials, and precomputed bond cylinders or animation frames.
//! All geometry is computed here so the template only instantiates it.

use std::collections::BTreeMap;

use serde::Serialize;

use super::bonds::detect_bonds;
use super::color::Rgba;
use super::error::Error;
use super::geometry::{half_segments, mono_segment, weighted_segments, CylinderSegment};
use super::palette::Palette;
use super::style::{resolve, Cartoon, StyleKind, StyleOverrides, Subdivision};
use crate::model::structure::{Structure, Trajectory};

/// Input data for one style.
#[derive(Debug, Clone, Copy)]
pub enum StyleSource<'a> {
    Single(&'a Structure),
    Frames(&'a Trajectory),
}

/// One style to render, with its input and parameter overrides.
#[derive(Debug, Clone)]
pub struct StyleSpec<'a> {
    pub kind: StyleKind,
    pub source: StyleSource<'a>,
    /// Atom indices to keep; `None` keeps all atoms.
    pub selection: Option<&'a [usize]>,
    pub overrides: StyleOverrides,
    /// Tolerance factor for bond detection.
    pub bond_scale: f64,
}

impl<'a> StyleSpec<'a> {
    pub fn new(kind: StyleKind, source: StyleSource<'a>) -> Self {
        Self { kind, source, selection: None, overrides: StyleOverrides::default(), bond_scale: 1.0 }
    }
}

/// The complete scene payload.
#[derive(Debug, Clone, Serialize)]
pub struct SceneDoc {
    pub styles: Vec<StyleEntry>,
}

/// One style entry in the scene document. Fields a style does not use are
/// omitted from the JSON, which is what the template keys its drawing on.
#[derive(Debug, Clone, Serialize)]
pub struct StyleEntry {
    pub style: &'static str,
    pub chemical_symbols: Vec<String>,
    pub unique_symbols: Vec<String>,
    pub positions: Vec<[f64; 3]>,
    pub colors: BTreeMap<String, Rgba>,
    pub cartoon: Cartoon,
    /// Sphere radius per element, scale already applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ball_sizes: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subdivision: Option<Subdivision>,
    /// Present only for mono-color bonded styles; keys the template's
    /// "bond" material registration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stick_color: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stick_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonds: Option<Vec<[usize; 2]>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<CylinderSegment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames: Option<Vec<Vec<[f64; 3]>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
}

/// Builds the scene document for a set of styles sharing one palette.
pub fn compose(specs: &[StyleSpec<'_>], palette: &Palette) -> Result<SceneDoc, Error> {
    let styles = specs
        .iter()
        .map(|spec| compose_entry(spec, palette))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SceneDoc { styles })
}

fn compose_entry(spec: &StyleSpec<'_>, palette: &Palette) -> Result<StyleEntry, Error> {
    let (structure, frames) = materialize(spec)?;
    if structure.atoms.is_empty() {
        return Err(Error::EmptyStructure);
    }

    let elements = structure.unique_elements();
    let resolved = resolve(spec.kind, &elements, palette, &spec.overrides)?;

    let chemical_symbols: Vec<String> =
        structure.atoms.iter().map(|a| a.element.symbol().to_string()).collect();
    let unique_symbols: Vec<String> = elements.iter().map(|e| e.symbol().to_string()).collect();
    let positions: Vec<[f64; 3]> = structure.atoms.iter().map(|a| a.position).collect();

    let colors: BTreeMap<String, _> = resolved
        .colors
        .iter()
        .map(|(e, &c)| (e.symbol().to_string(), c))
        .collect();

    let ball_sizes: BTreeMap<String, f64> = resolved
        .sizes
        .iter()
        .map(|(e, &s)| (e.symbol().to_string(), resolved.scale * s))
        .collect();

    let mut entry = StyleEntry {
        style: spec.kind.as_str(),
        chemical_symbols: chemical_symbols.clone(),
        unique_symbols,
        positions: positions.clone(),
        colors,
        cartoon: resolved.cartoon,
        ball_sizes: None,
        subdivision: None,
        stick_color: None,
        stick_radius: None,
        bonds: None,
        segments: None,
        frames: None,
        start: None,
        step: None,
    };

    if spec.kind.has_balls() {
        entry.ball_sizes = Some(ball_sizes.clone());
        entry.subdivision = Some(resolved.subdivision);
    }

    if spec.kind.has_sticks() {
        if spec.bond_scale <= 0.0 {
            return Err(Error::invalid_parameter(
                "bond_scale",
                format!("must be positive, got {}", spec.bond_scale),
            ));
        }
        let bonds = detect_bonds(&structure, spec.bond_scale);
        let mut segments = Vec::new();
        for bond in &bonds {
            let (p1, p2) = (positions[bond.i], positions[bond.j]);
            if resolved.bicolor {
                let (s1, s2) = (&chemical_symbols[bond.i], &chemical_symbols[bond.j]);
                let pair = match spec.kind {
                    StyleKind::BallAndStick => weighted_segments(
                        bond.i,
                        bond.j,
                        p1,
                        p2,
                        s1,
                        s2,
                        ball_sizes[s1],
                        ball_sizes[s2],
                    ),
                    _ => half_segments(bond.i, bond.j, p1, p2, s1, s2),
                };
                segments.extend(pair);
            } else {
                segments.push(mono_segment(bond.i, bond.j, p1, p2));
            }
        }
        if !resolved.bicolor {
            entry.stick_color = Some(resolved.stick_color);
        }
        entry.stick_radius = Some(resolved.radius);
        entry.bonds = Some(bonds.iter().map(|b| [b.i, b.j]).collect());
        entry.segments = Some(segments);
    }

    if spec.kind == StyleKind::Animation {
        entry.frames = frames;
        entry.start = Some(resolved.start);
        entry.step = Some(resolved.step);
    }

    Ok(entry)
}

/// Applies the selection and splits the source into a working structure
/// plus animation frames.
fn materialize(spec: &StyleSpec<'_>) -> Result<(Structure, Option<Vec<Vec<[f64; 3]>>>), Error> {
    match (spec.kind, spec.source) {
        (StyleKind::Animation, StyleSource::Frames(traj)) => {
            if traj.frame_count() < 2 {
                return Err(Error::NotEnoughFrames);
            }
            let mut frames = Vec::with_capacity(traj.frame_count());
            let mut first = None;
            for frame in traj.frames() {
                let selected = match spec.selection {
                    Some(indices) => frame.select(indices)?,
                    None => frame.clone(),
                };
                frames.push(selected.atoms.iter().map(|a| a.position).collect());
                if first.is_none() {
                    first = Some(selected);
                }
            }
            // frame_count >= 2 was checked above
            Ok((first.unwrap(), Some(frames)))
        }
        (StyleKind::Animation, StyleSource::Single(_)) => Err(Error::SourceMismatch {
            style: StyleKind::Animation.as_str(),
            expected: "a trajectory input",
        }),
        (kind, StyleSource::Frames(_)) => {
            Err(Error::SourceMismatch { style: kind.as_str(), expected: "a single structure" })
        }
        (_, StyleSource::Single(structure)) => {
            let selected = match spec.selection {
                Some(indices) => structure.select(indices)?,
                None => structure.clone(),
            };
            Ok((selected, None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Element;
    use crate::scene::palette::PaletteKind;

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

    fn palette() -> &'static Palette {
        PaletteKind::Default.palette()
    }

    #[test]
    fn ball_and_stick_entry_carries_balls_and_segments() {
        let s = water();
        let spec = StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&s));
        let doc = compose(&[spec], palette()).unwrap();
        assert_eq!(doc.styles.len(), 1);

        let entry = &doc.styles[0];
        assert_eq!(entry.style, "ball_and_stick");
        assert_eq!(entry.chemical_symbols, vec!["O", "H", "H"]);
        assert_eq!(entry.unique_symbols, vec!["H", "O"]);
        assert_eq!(entry.bonds.as_ref().unwrap(), &vec![[0, 1], [0, 2]]);
        // Mono-color by default: one segment per bond, bond material.
        let segments = entry.segments.as_ref().unwrap();
        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.material == "bond"));
        assert!(entry.stick_color.is_some());
        // Ball sizes carry the 0.4 scale.
        let sizes = entry.ball_sizes.as_ref().unwrap();
        assert!((sizes["H"] - 0.4 * 0.31).abs() < 1e-12);
    }

    #[test]
    fn bicolor_ball_and_stick_splits_by_size() {
        let s = water();
        let mut spec = StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&s));
        spec.overrides.bicolor = Some(true);
        let doc = compose(&[spec], palette()).unwrap();
        let entry = &doc.styles[0];
        let segments = entry.segments.as_ref().unwrap();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].material, "O");
        assert_eq!(segments[1].material, "H");
        // Bicolor entries omit stick_color so no bond material is made.
        assert!(entry.stick_color.is_none());
    }

    #[test]
    fn stick_entry_has_no_balls() {
        let s = water();
        let spec = StyleSpec::new(StyleKind::Stick, StyleSource::Single(&s));
        let doc = compose(&[spec], palette()).unwrap();
        let entry = &doc.styles[0];
        assert!(entry.ball_sizes.is_none());
        assert!(entry.subdivision.is_none());
        assert!(entry.segments.is_some());
    }

    #[test]
    fn space_filling_entry_has_no_sticks() {
        let s = water();
        let spec = StyleSpec::new(StyleKind::SpaceFilling, StyleSource::Single(&s));
        let doc = compose(&[spec], palette()).unwrap();
        let entry = &doc.styles[0];
        assert!(entry.bonds.is_none());
        assert!(entry.segments.is_none());
        let sizes = entry.ball_sizes.as_ref().unwrap();
        assert!((sizes["O"] - 0.66).abs() < 1e-12);
    }

    #[test]
    fn animation_entry_embeds_frames() {
        let mut moved = water();
        moved.atoms[1].position[1] += 0.1;
        let traj = Trajectory::new(vec![water(), moved]).unwrap();
        let mut spec = StyleSpec::new(StyleKind::Animation, StyleSource::Frames(&traj));
        spec.overrides.start = Some(1);
        spec.overrides.step = Some(5);
        let doc = compose(&[spec], palette()).unwrap();
        let entry = &doc.styles[0];
        assert_eq!(entry.frames.as_ref().unwrap().len(), 2);
        assert_eq!(entry.start, Some(1));
        assert_eq!(entry.step, Some(5));
        // First-frame positions drive the initial atom placement.
        assert_eq!(entry.positions[1], [0.0, 0.763, -0.477]);
    }

    #[test]
    fn selection_restricts_atoms_and_bonds() {
        let s = water();
        let mut spec = StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&s));
        let indices = [0usize, 1];
        spec.selection = Some(&indices);
        let doc = compose(&[spec], palette()).unwrap();
        let entry = &doc.styles[0];
        assert_eq!(entry.chemical_symbols, vec!["O", "H"]);
        assert_eq!(entry.bonds.as_ref().unwrap(), &vec![[0, 1]]);
    }

    #[test]
    fn source_mismatch_is_an_error() {
        let s = water();
        let spec = StyleSpec::new(StyleKind::Animation, StyleSource::Single(&s));
        assert!(matches!(
            compose(&[spec], palette()),
            Err(Error::SourceMismatch { .. })
        ));

        let traj = Trajectory::new(vec![water(), water()]).unwrap();
        let spec = StyleSpec::new(StyleKind::Stick, StyleSource::Frames(&traj));
        assert!(matches!(
            compose(&[spec], palette()),
            Err(Error::SourceMismatch { .. })
        ));
    }

    #[test]
    fn non_positive_bond_scale_is_an_error() {
        let s = water();
        for bad in [0.0, -1.0] {
            let mut spec = StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&s));
            spec.bond_scale = bad;
            assert!(matches!(
                compose(&[spec], palette()),
                Err(Error::InvalidParameter { parameter: "bond_scale", .. })
            ));
        }
    }

    #[test]
    fn single_frame_animation_is_rejected() {
        let traj = Trajectory::new(vec![water()]).unwrap();
        let spec = StyleSpec::new(StyleKind::Animation, StyleSource::Frames(&traj));
        assert!(matches!(compose(&[spec], palette()), Err(Error::NotEnoughFrames)));
    }

    #[test]
    fn empty_selection_is_an_error() {
        let s = water();
        let mut spec = StyleSpec::new(StyleKind::Stick, StyleSource::Single(&s));
        let indices: [usize; 0] = [];
        spec.selection = Some(&indices);
        assert!(matches!(compose(&[spec], palette()), Err(Error::EmptyStructure)));
    }
}
