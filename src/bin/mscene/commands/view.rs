use anyhow::{Context, Result};

use molscene::io::read_structure;
use molscene::viewer::{write_page, ViewerOptions};

use crate::cli::ViewArgs;
use crate::commands::common::{build_palette, resolve_input_format};
use crate::display::{print_element_distribution, print_structure_info, Context as DisplayContext, Progress};
use crate::io::{create_output, open_input, stdin_is_tty};

const TOTAL_STEPS: u8 = 3;

pub fn run_view(args: ViewArgs, ctx: DisplayContext) -> Result<()> {
    if args.io.input.is_none() && stdin_is_tty() {
        anyhow::bail!(
            "No input file specified and stdin is a terminal.\n\nUsage: mscene view -i <INPUT> or pipe data via stdin."
        );
    }

    let format = resolve_input_format(&args.io)?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Reading structure");
    let reader = open_input(args.io.input.as_deref())?;
    let structure = read_structure(reader, format).context("Failed to read structure")?;
    let atoms = format!("{} atoms", structure.atom_count());
    progress.complete_step("Reading structure", &[atoms.as_str()]);

    if ctx.interactive {
        print_structure_info(&structure, None);
        print_element_distribution(&structure);
    }

    progress.step("Building page");
    let palette = build_palette(&args.palette)?;
    let options = build_viewer_options(&args)?;
    progress.complete_step("Building page", &page_substeps(&options));

    progress.step("Writing page");
    let mut output = create_output(args.io.output.as_deref())?;
    write_page(&mut output, &structure, &palette, &options)
        .context("Failed to write viewer page")?;
    let target = args
        .io
        .output
        .as_ref()
        .map(|p| p.file_name().unwrap_or_default().to_string_lossy().into_owned())
        .unwrap_or_else(|| "stdout".to_string());
    let write_substep = format!("Write viewer page → {}", target);
    progress.complete_step("Writing page", &[write_substep.as_str()]);

    progress.finish();
    Ok(())
}

fn build_viewer_options(args: &ViewArgs) -> Result<ViewerOptions> {
    let view = &args.view;
    let title = view.title.clone().unwrap_or_else(|| {
        args.io
            .input
            .as_ref()
            .and_then(|p| p.file_stem())
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "molscene".to_string())
    });

    Ok(ViewerOptions {
        title,
        model: view.model.into(),
        camera: view.camera.into(),
        label_mode: view.label.to_mode(view.label_decimals),
        label_color: view.label_color.clone(),
        label_size: view.label_size,
        show_charges: view.charges,
        charge_scale: view.charge_scale,
        show_forces: view.forces,
        force_scale: view.force_scale,
        arrow_color: [1.0, 0.0, 0.0],
        unitcell: !view.no_unitcell,
        radius_scale: view.radius_scale,
        rotate: view.rotate.as_deref().map(parse_rotate).transpose()?,
    })
}

fn parse_rotate(spec: &str) -> Result<[f64; 3]> {
    let angles: Vec<f64> = spec
        .split(',')
        .map(|v| v.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("Invalid --rotate angles '{}'", spec))?;
    if angles.len() != 3 {
        anyhow::bail!("--rotate expects three comma-separated angles, got {}", angles.len());
    }
    Ok([angles[0], angles[1], angles[2]])
}

fn page_substeps(options: &ViewerOptions) -> Vec<&'static str> {
    let mut steps = vec!["Render color scheme", "Embed PDB structure"];
    if options.show_forces {
        steps.push("Add force arrows");
    }
    if options.show_charges {
        steps.push("Add charge coloring");
    }
    steps
}
