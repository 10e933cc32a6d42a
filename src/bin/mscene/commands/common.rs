//! Helpers shared by the blender and view commands.

use std::str::FromStr;

use anyhow::{bail, Context, Result};

use molscene::io::Format;
use molscene::scene::{Palette, PaletteKind, Rgba};
use molscene::Element;

use crate::cli::{IoOptions, PaletteOptions};
use crate::io::infer_input_format;

pub fn resolve_input_format(io: &IoOptions) -> Result<Format> {
    if let Some(fmt) = io.input_format {
        return Ok(fmt.into());
    }

    if let Some(path) = &io.input {
        if let Some(fmt) = infer_input_format(path) {
            return Ok(fmt);
        }
        bail!(
            "Cannot infer format from '{}'. Use --infmt to specify.",
            path.display()
        );
    }

    bail!("Reading from stdin requires --infmt");
}

/// Builds the effective palette: built-in, then the palette file, then
/// `--color` overrides, later layers winning.
pub fn build_palette(options: &PaletteOptions) -> Result<Palette> {
    let mut palette = PaletteKind::from(options.palette).palette().clone();

    if let Some(path) = &options.palette_file {
        let overlay = Palette::from_path(path)
            .with_context(|| format!("Failed to load palette file: {}", path.display()))?;
        palette = palette.merged_with(&overlay);
    }

    for spec in &options.colors {
        let (element, value) = split_pair(spec, "--color")?;
        let color = Rgba::from_hex(value, 1.0)
            .with_context(|| format!("Invalid color '{}' for element {}", value, element))?;
        palette.set(element, color);
    }

    Ok(palette)
}

/// Parses repeated `EL=VALUE` arguments into element/value pairs.
pub fn element_values<T: FromStr>(specs: &[String], flag: &str) -> Result<Vec<(Element, T)>>
where
    T::Err: std::fmt::Display,
{
    specs
        .iter()
        .map(|spec| {
            let (element, value) = split_pair(spec, flag)?;
            let value = value
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("Invalid {} value '{}': {}", flag, value, e))?;
            Ok((element, value))
        })
        .collect()
}

fn split_pair<'a>(spec: &'a str, flag: &str) -> Result<(Element, &'a str)> {
    let Some((symbol, value)) = spec.split_once('=') else {
        bail!("Expected {} in EL=VALUE form, got '{}'", flag, spec);
    };
    let element = Element::from_str(symbol.trim())
        .map_err(|e| anyhow::anyhow!("Invalid element in '{}': {}", spec, e))?;
    Ok((element, value.trim()))
}
