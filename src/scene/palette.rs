//! Per-element color tables.
//!
//! Three palettes ship embedded in the binary: `default` and `vesta` as
//! VESTA-style `elements.ini` tables, `jmol` as a CSV of 0-255 channels.
//! User palettes load from external `.ini`, `.csv` or `.toml` files.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Deserialize;

use super::color::Rgba;
use super::error::Error;
use crate::model::types::Element;

const DEFAULT_INI: &str = include_str!("../../resources/default.elements.ini");
const VESTA_INI: &str = include_str!("../../resources/vesta.elements.ini");
const JMOL_CSV: &str = include_str!("../../resources/jmol.colors.csv");

static DEFAULT_PALETTE: OnceLock<Palette> = OnceLock::new();
static VESTA_PALETTE: OnceLock<Palette> = OnceLock::new();
static JMOL_PALETTE: OnceLock<Palette> = OnceLock::new();

/// The built-in palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    #[default]
    Default,
    Vesta,
    Jmol,
}

impl PaletteKind {
    pub fn palette(&self) -> &'static Palette {
        // Embedded tables are checked by tests; a parse failure here is a bug.
        match self {
            PaletteKind::Default => DEFAULT_PALETTE
                .get_or_init(|| Palette::from_ini_str(DEFAULT_INI).expect("embedded default palette")),
            PaletteKind::Vesta => VESTA_PALETTE
                .get_or_init(|| Palette::from_ini_str(VESTA_INI).expect("embedded vesta palette")),
            PaletteKind::Jmol => JMOL_PALETTE
                .get_or_init(|| Palette::from_csv_str(JMOL_CSV).expect("embedded jmol palette")),
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteKind::Default => write!(f, "default"),
            PaletteKind::Vesta => write!(f, "vesta"),
            PaletteKind::Jmol => write!(f, "jmol"),
        }
    }
}

/// A mapping from elements to display colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: BTreeMap<Element, Rgba>,
}

#[derive(Debug, Deserialize)]
struct PaletteToml {
    colors: BTreeMap<String, Rgba>,
}

impl Palette {
    /// Color for `element`, falling back to grey for unlisted elements.
    pub fn get(&self, element: Element) -> Rgba {
        self.colors.get(&element).copied().unwrap_or(Rgba::grey())
    }

    pub fn set(&mut self, element: Element, color: Rgba) {
        self.colors.insert(element, color);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, Rgba)> + '_ {
        self.colors.iter().map(|(&e, &c)| (e, c))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Parses a VESTA-style `elements.ini` table: whitespace-delimited rows
    /// of `number symbol radii... r g b` with the symbol in the second field
    /// and normalized RGB in fields six through eight.
    pub fn from_ini_str(content: &str) -> Result<Self, Error> {
        let mut colors = BTreeMap::new();
        for (idx, raw) in content.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 8 {
                return Err(Error::palette_parse(
                    line_number,
                    format!("expected at least 8 fields, found {}", fields.len()),
                ));
            }
            let element = Element::from_str(fields[1])
                .map_err(|e| Error::palette_parse(line_number, e.to_string()))?;
            let channel = |field: &str| {
                field
                    .parse::<f64>()
                    .map_err(|_| Error::palette_parse(line_number, format!("bad channel '{field}'")))
            };
            let color = Rgba::opaque(channel(fields[5])?, channel(fields[6])?, channel(fields[7])?);
            colors.insert(element, color);
        }
        Ok(Self { colors })
    }

    /// Parses a CSV table of `element,r,g,b` rows with 0-255 channels. A
    /// header row is skipped when its first field is not an element symbol.
    pub fn from_csv_str(content: &str) -> Result<Self, Error> {
        let mut colors = BTreeMap::new();
        for (idx, raw) in content.lines().enumerate() {
            let line_number = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != 4 {
                return Err(Error::palette_parse(
                    line_number,
                    format!("expected 4 fields, found {}", fields.len()),
                ));
            }
            let element = match Element::from_str(fields[0]) {
                Ok(e) => e,
                // Header row.
                Err(_) if line_number == 1 => continue,
                Err(e) => return Err(Error::palette_parse(line_number, e.to_string())),
            };
            let channel = |field: &str| {
                field
                    .parse::<u16>()
                    .ok()
                    .filter(|&v| v <= 255)
                    .map(|v| v as f64 / 255.0)
                    .ok_or_else(|| {
                        Error::palette_parse(line_number, format!("bad channel '{field}'"))
                    })
            };
            let color = Rgba::opaque(channel(fields[1])?, channel(fields[2])?, channel(fields[3])?);
            colors.insert(element, color);
        }
        Ok(Self { colors })
    }

    /// Parses a TOML override file with a `[colors]` table mapping element
    /// symbols to `[r, g, b]` or `[r, g, b, a]` arrays.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        let parsed: PaletteToml = toml::from_str(content)?;
        let mut colors = BTreeMap::new();
        for (idx, (symbol, color)) in parsed.colors.iter().enumerate() {
            let element = Element::from_str(symbol)
                .map_err(|e| Error::palette_parse(idx + 1, e.to_string()))?;
            colors.insert(element, *color);
        }
        Ok(Self { colors })
    }

    /// Loads a palette from a file, dispatching on its extension.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        let content = std::fs::read_to_string(path)?;
        match ext.as_str() {
            "ini" => Self::from_ini_str(&content),
            "csv" => Self::from_csv_str(&content),
            "toml" => Self::from_toml_str(&content),
            other => Err(Error::UnsupportedPalette(other.to_string())),
        }
    }

    /// Overlays `other` onto this palette: entries in `other` win.
    pub fn merged_with(&self, other: &Palette) -> Palette {
        let mut colors = self.colors.clone();
        for (element, color) in other.iter() {
            colors.insert(element, color);
        }
        Palette { colors }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn embedded_palettes_parse() {
        assert!(!PaletteKind::Default.palette().is_empty());
        assert!(!PaletteKind::Vesta.palette().is_empty());
        assert!(!PaletteKind::Jmol.palette().is_empty());
    }

    #[test]
    fn default_palette_hydrogen_is_pink() {
        let c = PaletteKind::Default.palette().get(Element::H);
        assert!(approx_eq(c.r, 1.0, 1e-6));
        assert!(approx_eq(c.g, 0.8, 1e-6));
        assert!(approx_eq(c.b, 0.8, 1e-6));
    }

    #[test]
    fn jmol_palette_scales_channels() {
        // Jmol carbon is (144, 144, 144).
        let c = PaletteKind::Jmol.palette().get(Element::C);
        assert!(approx_eq(c.r, 144.0 / 255.0, 1e-9));
    }

    #[test]
    fn missing_element_falls_back_to_grey() {
        let p = Palette::default();
        assert_eq!(p.get(Element::Og), Rgba::grey());
    }

    #[test]
    fn ini_parser_uses_symbol_and_trailing_rgb_fields() {
        let src = "  8  O   0.66  1.52  0.74  0.5  0.25  0.125\n";
        let p = Palette::from_ini_str(src).unwrap();
        let c = p.get(Element::O);
        assert!(approx_eq(c.r, 0.5, 1e-12));
        assert!(approx_eq(c.g, 0.25, 1e-12));
        assert!(approx_eq(c.b, 0.125, 1e-12));
    }

    #[test]
    fn ini_parser_reports_line_numbers() {
        let src = "1 H 0.31 1.20 0.46 1.0 0.8 0.8\n2 Xx 0.1 0.1 0.1 0.0 0.0 0.0\n";
        let err = Palette::from_ini_str(src).unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn csv_parser_skips_header_and_rejects_overflow() {
        let p = Palette::from_csv_str("element,r,g,b\nH,255,204,204\n").unwrap();
        assert_eq!(p.get(Element::H).to_hex(), "#ffcccc");
        assert!(Palette::from_csv_str("H,300,0,0\n").is_err());
    }

    #[test]
    fn toml_palette_overrides() {
        let p = Palette::from_toml_str("[colors]\nO = [1.0, 0.0, 0.0]\nH = [1.0, 1.0, 1.0, 0.5]\n")
            .unwrap();
        assert_eq!(p.get(Element::O).to_hex(), "#ff0000");
        assert!(approx_eq(p.get(Element::H).a, 0.5, 1e-12));
    }

    #[test]
    fn builtin_palettes_are_populated() {
        for kind in [PaletteKind::Default, PaletteKind::Vesta, PaletteKind::Jmol] {
            let p = kind.palette();
            assert!(!p.is_empty());
            assert!(p.len() > 50, "{kind} palette too small");
        }
    }

    #[test]
    fn merged_with_prefers_overlay() {
        let base = PaletteKind::Default.palette();
        let over = Palette::from_toml_str("[colors]\nH = [0.0, 0.0, 0.0]\n").unwrap();
        let merged = base.merged_with(&over);
        assert_eq!(merged.get(Element::H).to_hex(), "#000000");
        assert_eq!(merged.get(Element::O), base.get(Element::O));
    }
}
