use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use molscene::scene::StyleKind;
use molscene::viewer::{CameraKind, LabelMode, ModelKind};

#[derive(Parser)]
#[command(
    name = "mscene",
    about = "Molecular scene generation for Blender and the browser",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a Blender Python script (XYZ/PDB input)
    #[command(visible_alias = "b")]
    Blender(BlenderArgs),

    /// Generate a standalone NGL viewer page (XYZ/PDB input)
    #[command(visible_alias = "v")]
    View(ViewArgs),
}

/// I/O options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Input file (stdin if omitted, requires --infmt)
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Input format (inferred from extension if not specified)
    #[arg(long = "infmt", value_name = "FORMAT")]
    pub input_format: Option<InputFormat>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Color palette options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Colors")]
pub struct PaletteOptions {
    /// Built-in color palette
    #[arg(long, value_name = "NAME", default_value = "default")]
    pub palette: PaletteName,

    /// Palette file merged over the built-in (.ini, .csv or .toml)
    #[arg(long = "palette-file", value_name = "FILE")]
    pub palette_file: Option<PathBuf>,

    /// Per-element color override (EL=#rrggbb), repeatable
    #[arg(long = "color", value_name = "EL=HEX", action = clap::ArgAction::Append)]
    pub colors: Vec<String>,
}

#[derive(Args)]
pub struct BlenderArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub palette: PaletteOptions,

    #[command(flatten)]
    pub style: StyleOptions,

    #[command(flatten)]
    pub bonds: BondOptions,

    #[command(flatten)]
    pub animation: AnimationOptions,
}

/// Scene style options (blender command).
#[derive(Args)]
#[command(next_help_heading = "Style")]
pub struct StyleOptions {
    /// Drawing style
    #[arg(long, value_name = "STYLE", default_value = "ball-and-stick")]
    pub style: StyleName,

    /// Atom selection as index ranges, e.g. "0-10,23"
    #[arg(long, value_name = "RANGES")]
    pub select: Option<String>,

    /// Ball size scale factor
    #[arg(long, value_name = "FACTOR")]
    pub scale: Option<f64>,

    /// Per-element ball size override (EL=SIZE), repeatable
    #[arg(long = "size", value_name = "EL=SIZE", action = clap::ArgAction::Append)]
    pub sizes: Vec<String>,

    /// Stick (cylinder) radius in Å
    #[arg(long = "stick-radius", value_name = "R")]
    pub stick_radius: Option<f64>,

    /// Stick color (#rrggbb)
    #[arg(long = "stick-color", value_name = "HEX")]
    pub stick_color: Option<String>,

    /// Color each bond half by its atom's element
    #[arg(long)]
    pub bicolor: bool,

    /// Cartoon materials (fresnel outline shading)
    #[arg(long)]
    pub cartoon: bool,

    /// Cartoon fresnel IOR (with --cartoon)
    #[arg(long = "cartoon-ior", value_name = "IOR")]
    pub cartoon_ior: Option<f64>,

    /// Cartoon outline color (with --cartoon)
    #[arg(long = "cartoon-color", value_name = "HEX")]
    pub cartoon_color: Option<String>,

    /// Subdivision surface modifier on atom spheres
    #[arg(long)]
    pub subdivision: bool,

    /// Subdivision viewport level (with --subdivision)
    #[arg(long = "subdivision-level", value_name = "N")]
    pub subdivision_level: Option<u32>,

    /// Subdivision render level (with --subdivision)
    #[arg(long = "subdivision-render", value_name = "N")]
    pub subdivision_render: Option<u32>,
}

/// Bond perception options.
#[derive(Args)]
#[command(next_help_heading = "Bonds")]
pub struct BondOptions {
    /// Covalent cutoff scale factor for bond detection
    #[arg(long = "bond-scale", value_name = "FACTOR", default_value = "1.0")]
    pub bond_scale: f64,
}

/// Keyframe animation options (animation style only).
#[derive(Args)]
#[command(next_help_heading = "Animation")]
pub struct AnimationOptions {
    /// First keyframe number
    #[arg(long, value_name = "FRAME", allow_hyphen_values = true)]
    pub start: Option<i64>,

    /// Keyframe stride
    #[arg(long, value_name = "N")]
    pub step: Option<i64>,
}

#[derive(Args)]
pub struct ViewArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub palette: PaletteOptions,

    #[command(flatten)]
    pub view: ViewOptions,
}

/// Viewer page options (view command).
#[derive(Args)]
#[command(next_help_heading = "Viewer")]
pub struct ViewOptions {
    /// Representation model
    #[arg(long, value_name = "MODEL", default_value = "ball-and-stick")]
    pub model: ModelName,

    /// Camera projection
    #[arg(long, value_name = "CAMERA", default_value = "orthographic")]
    pub camera: CameraName,

    /// Atom labels
    #[arg(long, value_name = "MODE", default_value = "none")]
    pub label: LabelName,

    /// Label color (CSS color)
    #[arg(long = "label-color", value_name = "COLOR", default_value = "black")]
    pub label_color: String,

    /// Label size
    #[arg(long = "label-size", value_name = "SIZE", default_value = "1.0")]
    pub label_size: f64,

    /// Decimals for charge labels
    #[arg(long = "label-decimals", value_name = "N", default_value = "2")]
    pub label_decimals: usize,

    /// Color atoms by partial charge
    #[arg(long)]
    pub charges: bool,

    /// Charge color scale factor
    #[arg(long = "charge-scale", value_name = "FACTOR", default_value = "1.0")]
    pub charge_scale: f64,

    /// Draw force arrows
    #[arg(long)]
    pub forces: bool,

    /// Force arrow length scale
    #[arg(long = "force-scale", value_name = "FACTOR", default_value = "0.5")]
    pub force_scale: f64,

    /// Hide the unit cell of periodic structures
    #[arg(long = "no-unitcell")]
    pub no_unitcell: bool,

    /// Spacefill radius scale for the ball-and-stick model
    #[arg(long = "radius-scale", value_name = "FACTOR", default_value = "0.5")]
    pub radius_scale: f64,

    /// Initial camera rotation "X,Y,Z" in degrees
    #[arg(long, value_name = "X,Y,Z", allow_hyphen_values = true)]
    pub rotate: Option<String>,

    /// Page title (defaults to the input file name)
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InputFormat {
    Xyz,
    Pdb,
}

impl From<InputFormat> for molscene::io::Format {
    fn from(fmt: InputFormat) -> Self {
        match fmt {
            InputFormat::Xyz => Self::Xyz,
            InputFormat::Pdb => Self::Pdb,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum StyleName {
    /// Balls scaled by covalent radius plus bond cylinders
    #[default]
    #[value(name = "ball-and-stick", alias = "bs")]
    BallAndStick,
    /// Bond cylinders only
    Stick,
    /// Full-size covalent spheres, no bonds
    #[value(name = "space-filling", alias = "sf")]
    SpaceFilling,
    /// Keyframed trajectory of covalent spheres
    #[value(alias = "anim")]
    Animation,
}

impl From<StyleName> for StyleKind {
    fn from(name: StyleName) -> Self {
        match name {
            StyleName::BallAndStick => Self::BallAndStick,
            StyleName::Stick => Self::Stick,
            StyleName::SpaceFilling => Self::SpaceFilling,
            StyleName::Animation => Self::Animation,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum PaletteName {
    /// Soft pastel colors
    #[default]
    Default,
    /// VESTA crystallography colors
    Vesta,
    /// Jmol element colors
    Jmol,
}

impl From<PaletteName> for molscene::scene::PaletteKind {
    fn from(name: PaletteName) -> Self {
        match name {
            PaletteName::Default => Self::Default,
            PaletteName::Vesta => Self::Vesta,
            PaletteName::Jmol => Self::Jmol,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum ModelName {
    /// Ball-and-stick with a covalent spacefill underlay
    #[default]
    #[value(name = "ball-and-stick", alias = "bs")]
    BallAndStick,
    /// Van der Waals spacefill
    #[value(name = "space-filling", alias = "sf")]
    SpaceFilling,
}

impl From<ModelName> for ModelKind {
    fn from(name: ModelName) -> Self {
        match name {
            ModelName::BallAndStick => Self::BallAndStick,
            ModelName::SpaceFilling => Self::SpaceFilling,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum CameraName {
    /// Parallel projection
    #[default]
    Orthographic,
    /// Perspective projection
    Perspective,
}

impl From<CameraName> for CameraKind {
    fn from(name: CameraName) -> Self {
        match name {
            CameraName::Orthographic => Self::Orthographic,
            CameraName::Perspective => Self::Perspective,
        }
    }
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum LabelName {
    /// No labels
    #[default]
    None,
    /// Zero-based atom index
    Index,
    /// Element symbol
    Symbol,
    /// Partial charge (see --label-decimals)
    Charge,
    /// "Fix" on constrained atoms
    Fixed,
}

impl LabelName {
    pub fn to_mode(self, decimals: usize) -> LabelMode {
        match self {
            LabelName::None => LabelMode::None,
            LabelName::Index => LabelMode::Index,
            LabelName::Symbol => LabelMode::Symbol,
            LabelName::Charge => LabelMode::Charge { decimals },
            LabelName::Fixed => LabelMode::Fixed,
        }
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
