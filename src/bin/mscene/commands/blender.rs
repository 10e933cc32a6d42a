use anyhow::{Context, Result};

use molscene::io::{read_structure, read_trajectory, Format};
use molscene::scene::{
    compose, write_script, Cartoon, Rgba, StyleKind, StyleOverrides, StyleSource, StyleSpec,
    Subdivision,
};
use molscene::{Structure, Trajectory};

use crate::cli::BlenderArgs;
use crate::commands::common::{build_palette, element_values, resolve_input_format};
use crate::display::{print_element_distribution, print_structure_info, Context as DisplayContext, Progress};
use crate::io::{create_output, open_input, stdin_is_tty};
use crate::util::select::parse_index_ranges;

const TOTAL_STEPS: u8 = 3;

enum Input {
    Single(Structure),
    Frames(Trajectory),
}

pub fn run_blender(args: BlenderArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        anyhow::bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mscene blender -i <INPUT> or pipe data via stdin."
        );
    }

    let format = resolve_input_format(&args.io)?;
    let kind = StyleKind::from(args.style.style);
    let selection = args
        .style
        .select
        .as_deref()
        .map(parse_index_ranges)
        .transpose()
        .context("Invalid --select ranges")?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let input = read_input(&args, format, kind)?;
    let first = match &input {
        Input::Single(s) => s,
        Input::Frames(t) => t.first(),
    };
    let read_substeps = read_substeps(&input, format);
    let read_substeps_ref: Vec<&str> = read_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Reading structure", &read_substeps_ref);

    if ctx.interactive {
        print_structure_info(first, frame_count(&input));
        print_element_distribution(first);
    }

    progress.step("Composing scene");
    let palette = build_palette(&args.palette)?;
    let overrides = build_overrides(&args)?;
    let source = match &input {
        Input::Single(s) => StyleSource::Single(s),
        Input::Frames(t) => StyleSource::Frames(t),
    };
    let spec = StyleSpec {
        kind,
        source,
        selection: selection.as_deref(),
        overrides,
        bond_scale: args.bonds.bond_scale,
    };
    let doc = compose(&[spec], &palette).context("Failed to compose scene")?;
    let compose_substeps = compose_substeps(&doc);
    let compose_substeps_ref: Vec<&str> = compose_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Composing scene", &compose_substeps_ref);

    progress.step("Writing script");
    let mut output = create_output(args.io.output.as_deref())?;
    write_script(&mut output, &doc).context("Failed to write Blender script")?;
    let write_substeps = write_substeps(&args);
    let write_substeps_ref: Vec<&str> = write_substeps.iter().map(|s| s.as_str()).collect();
    progress.complete_step("Writing script", &write_substeps_ref);

    progress.finish();
    Ok(())
}

fn read_input(args: &BlenderArgs, format: Format, kind: StyleKind) -> Result<Input> {
    let reader = open_input(args.io.input.as_deref())?;
    let input = if matches!(kind, StyleKind::Animation) {
        Input::Frames(read_trajectory(reader, format).context("Failed to read trajectory")?)
    } else {
        Input::Single(read_structure(reader, format).context("Failed to read structure")?)
    };
    Ok(input)
}

fn frame_count(input: &Input) -> Option<usize> {
    match input {
        Input::Single(_) => None,
        Input::Frames(t) => Some(t.frame_count()),
    }
}

fn build_overrides(args: &BlenderArgs) -> Result<StyleOverrides> {
    let style = &args.style;
    let mut overrides = StyleOverrides {
        radius: style.stick_radius,
        scale: style.scale,
        start: args.animation.start,
        step: args.animation.step,
        ..StyleOverrides::default()
    };

    if style.bicolor {
        overrides.bicolor = Some(true);
    }
    if let Some(hex) = &style.stick_color {
        let color = Rgba::from_hex(hex, 1.0)
            .with_context(|| format!("Invalid --stick-color '{}'", hex))?;
        overrides.stick_color = Some(color);
    }
    if style.cartoon {
        let mut cartoon = Cartoon { apply: true, ..Cartoon::default() };
        if let Some(ior) = style.cartoon_ior {
            cartoon.ior = ior;
        }
        if let Some(hex) = &style.cartoon_color {
            cartoon.color = Rgba::from_hex(hex, 1.0)
                .with_context(|| format!("Invalid --cartoon-color '{}'", hex))?;
        }
        overrides.cartoon = Some(cartoon);
    }
    if style.subdivision {
        let mut subdivision = Subdivision { apply: true, ..Subdivision::default() };
        if let Some(level) = style.subdivision_level {
            subdivision.level = level;
        }
        if let Some(render) = style.subdivision_render {
            subdivision.render_levels = render;
        }
        overrides.subdivision = Some(subdivision);
    }

    for (element, color) in element_values::<Rgba>(&args.palette.colors, "--color")? {
        // --color entries also act as style color overrides so they win
        // over the palette file.
        overrides.colors.insert(element, color);
    }
    for (element, size) in element_values::<f64>(&style.sizes, "--size")? {
        overrides.sizes.insert(element, size);
    }

    Ok(overrides)
}

fn read_substeps(input: &Input, format: Format) -> Vec<String> {
    let fmt_name = match format {
        Format::Xyz => "XYZ",
        Format::Pdb => "PDB",
    };
    match input {
        Input::Single(s) => vec![
            format!("Parse {} file", fmt_name),
            format!("{} atoms", s.atom_count()),
        ],
        Input::Frames(t) => vec![
            format!("Parse {} trajectory", fmt_name),
            format!("{} frames x {} atoms", t.frame_count(), t.first().atom_count()),
        ],
    }
}

fn compose_substeps(doc: &molscene::scene::SceneDoc) -> Vec<String> {
    doc.styles
        .iter()
        .map(|entry| {
            let bonds = entry.bonds.as_ref().map(|b| b.len()).unwrap_or(0);
            if bonds > 0 {
                format!("Style {} ({} bonds)", entry.style, bonds)
            } else {
                format!("Style {}", entry.style)
            }
        })
        .collect()
}

fn write_substeps(args: &BlenderArgs) -> Vec<String> {
    let target = args
        .io
        .output
        .as_ref()
        .map(|p| p.file_name().unwrap_or_default().to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdout".to_string());
    vec![format!("Write Blender script → {}", target)]
}
