//! Standalone NGL viewer page generation.
//!
//! The page embeds the structure as a PDB string, an element color scheme,
//! and optional label, force and charge overlays into an HTML template.

use std::io::Write;

use serde::Serialize;

use super::error::Error;
use super::labels::{label_texts, LabelMode};
use super::overlay::{charge_store_js, force_arrows, ForceArrow};
use super::rotation::{quaternion, rotation_matrix, spin_matrix, Axis};
use super::scheme::js_color_scheme;
use super::tooltip::tooltip_js;
use crate::io::{write_structure, Format};
use crate::model::structure::Structure;
use crate::scene::Palette;

const TEMPLATE: &str = include_str!("../../resources/viewer_template.html");

/// Camera spin per keypress, in degrees.
const SPIN_STEP_DEG: f64 = 10.0;

/// Representation drawn for the structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelKind {
    /// Ball-and-stick with a covalent-radius spacefill underlay.
    #[default]
    BallAndStick,
    /// Van der Waals spacefill.
    SpaceFilling,
}

impl ModelKind {
    fn as_str(&self) -> &'static str {
        match self {
            ModelKind::BallAndStick => "ball_and_stick",
            ModelKind::SpaceFilling => "space_filling",
        }
    }
}

/// Camera projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraKind {
    #[default]
    Orthographic,
    Perspective,
}

impl CameraKind {
    fn as_str(&self) -> &'static str {
        match self {
            CameraKind::Orthographic => "orthographic",
            CameraKind::Perspective => "perspective",
        }
    }
}

/// Everything configurable about a generated viewer page.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerOptions {
    pub title: String,
    pub model: ModelKind,
    pub camera: CameraKind,
    pub label_mode: LabelMode,
    pub label_color: String,
    pub label_size: f64,
    pub show_charges: bool,
    pub charge_scale: f64,
    pub show_forces: bool,
    pub force_scale: f64,
    pub arrow_color: [f64; 3],
    pub unitcell: bool,
    pub radius_scale: f64,
    /// Initial camera rotation as roll, pitch and yaw in degrees.
    pub rotate: Option<[f64; 3]>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            title: "molscene".to_string(),
            model: ModelKind::default(),
            camera: CameraKind::default(),
            label_mode: LabelMode::default(),
            label_color: "black".to_string(),
            label_size: 1.0,
            show_charges: false,
            charge_scale: 1.0,
            show_forces: false,
            force_scale: 0.5,
            arrow_color: [1.0, 0.0, 0.0],
            unitcell: true,
            radius_scale: 0.5,
            rotate: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageConfig<'a> {
    model: &'a str,
    camera: &'a str,
    labels: Option<Vec<String>>,
    label_color: &'a str,
    label_size: f64,
    arrow_color: [f64; 3],
    quaternion: Option<[f64; 4]>,
    radius_scale: f64,
    unitcell: bool,
    spin: SpinControls,
}

/// Per-axis spin matrices keyed by the keyboard key that applies them.
#[derive(Serialize)]
struct SpinControls {
    x: [f64; 16],
    y: [f64; 16],
    z: [f64; 16],
}

impl SpinControls {
    fn new(step_deg: f64) -> Self {
        Self {
            x: spin_matrix(Axis::X, step_deg, true),
            y: spin_matrix(Axis::Y, step_deg, true),
            z: spin_matrix(Axis::Z, step_deg, true),
        }
    }
}

/// Writes a self-contained viewer page for `structure`.
pub fn write_page<W: Write>(
    writer: &mut W,
    structure: &Structure,
    palette: &Palette,
    options: &ViewerOptions,
) -> Result<(), Error> {
    let mut pdb = Vec::new();
    write_structure(&mut pdb, structure, Format::Pdb)?;
    let pdb = replace_resseq(&String::from_utf8_lossy(&pdb));

    let labels = match options.label_mode {
        LabelMode::None => None,
        mode => Some(label_texts(structure, mode)?),
    };
    let config = PageConfig {
        model: options.model.as_str(),
        camera: options.camera.as_str(),
        labels,
        label_color: &options.label_color,
        label_size: options.label_size,
        arrow_color: options.arrow_color,
        quaternion: options
            .rotate
            .map(|[x, y, z]| quaternion(rotation_matrix(x, y, z, true))),
        radius_scale: options.radius_scale,
        unitcell: options.unitcell && structure.is_periodic(),
        spin: SpinControls::new(SPIN_STEP_DEG),
    };

    let arrows: Vec<ForceArrow> = if options.show_forces {
        force_arrows(structure, options.force_scale)?
    } else {
        Vec::new()
    };
    let charge = if options.show_charges {
        charge_store_js(structure, options.charge_scale)?
    } else {
        String::new()
    };

    let page = TEMPLATE
        .replace("__MOLSCENE_TITLE__", &options.title)
        .replace("__MOLSCENE_CONFIG__", &serde_json::to_string_pretty(&config)?)
        .replace("__MOLSCENE_PDB__", &serde_json::to_string(&pdb)?)
        .replace("__MOLSCENE_SCHEME__", &js_color_scheme(palette))
        .replace("__MOLSCENE_ARROWS__", &serde_json::to_string(&arrows)?)
        .replace("__MOLSCENE_CHARGE__", &charge)
        .replace("__MOLSCENE_TOOLTIP__", &tooltip_js(structure));
    writer.write_all(page.as_bytes())?;
    Ok(())
}

/// Overwrites the residue sequence number of each `ATOM` record with the
/// atom index, so NGL's atom picking reports indices.
fn replace_resseq(pdb: &str) -> String {
    let mut atom_index = 0usize;
    let mut out: Vec<String> = pdb
        .lines()
        .map(|line| {
            if line.starts_with("ATOM  ") && line.len() >= 26 {
                let replaced =
                    format!("{}{:4}{}", &line[..22], atom_index % 10000, &line[26..]);
                atom_index += 1;
                replaced
            } else {
                line.to_string()
            }
        })
        .collect();
    out.push(String::new());
    out.join("\n")
}
