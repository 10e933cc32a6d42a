//! PDB reading.
//!
//! Parses `ATOM`/`HETATM` coordinate records and an optional `CRYST1`
//! record. The element is taken from columns 77-78 when present, falling
//! back to the leading letters of the atom name.

use std::io::BufRead;
use std::str::FromStr;

use crate::io::{error::Error, Format};
use crate::model::atom::Atom;
use crate::model::structure::Structure;
use crate::model::types::Element;

pub fn read<R: BufRead>(reader: R) -> Result<Structure, Error> {
    let mut structure = Structure::new();
    for (i, line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = line.map_err(|e| Error::Io { source: e })?;
        let record = cols(&line, 0, 6);
        match record {
            "ATOM" | "HETATM" => {
                structure.atoms.push(parse_atom_record(&line, line_number)?);
            }
            "CRYST1" => {
                structure.cell = Some(parse_cryst1(&line, line_number)?);
            }
            "END" | "ENDMDL" if !structure.atoms.is_empty() => break,
            _ => {}
        }
    }
    if structure.atoms.is_empty() {
        return Err(Error::parse(Format::Pdb, 1, "no ATOM or HETATM records in input"));
    }
    Ok(structure)
}

fn parse_atom_record(line: &str, line_number: usize) -> Result<Atom, Error> {
    let position = [
        coord(line, 30, line_number, "x coordinate")?,
        coord(line, 38, line_number, "y coordinate")?,
        coord(line, 46, line_number, "z coordinate")?,
    ];
    let element = parse_element(line, line_number)?;
    Ok(Atom::new(element, position))
}

fn parse_element(line: &str, line_number: usize) -> Result<Element, Error> {
    let symbol = cols(line, 76, 78);
    if !symbol.is_empty() {
        return Element::from_str(&capitalize(symbol))
            .map_err(|e| Error::parse(Format::Pdb, line_number, e.to_string()));
    }
    // Element columns absent; take the leading letters of the atom name.
    let name: String = cols(line, 12, 16)
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    if let Ok(element) = Element::from_str(&capitalize(&name)) {
        return Ok(element);
    }
    let first: String = name.chars().take(1).collect();
    Element::from_str(&capitalize(&first)).map_err(|_| {
        Error::parse(
            Format::Pdb,
            line_number,
            format!("cannot infer element from atom name '{name}'"),
        )
    })
}

fn capitalize(symbol: &str) -> String {
    let mut chars = symbol.chars();
    match chars.next() {
        Some(first) => {
            first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
        }
        None => String::new(),
    }
}

fn parse_cryst1(line: &str, line_number: usize) -> Result<[[f64; 3]; 3], Error> {
    let a = number(line, 6, 15, line_number, "cell length a")?;
    let b = number(line, 15, 24, line_number, "cell length b")?;
    let c = number(line, 24, 33, line_number, "cell length c")?;
    let alpha = number(line, 33, 40, line_number, "cell angle alpha")?.to_radians();
    let beta = number(line, 40, 47, line_number, "cell angle beta")?.to_radians();
    let gamma = number(line, 47, 54, line_number, "cell angle gamma")?.to_radians();

    let bx = b * gamma.cos();
    let by = b * gamma.sin();
    let cx = c * beta.cos();
    let cy = c * (alpha.cos() - beta.cos() * gamma.cos()) / gamma.sin();
    let cz_sq = c * c - cx * cx - cy * cy;
    if cz_sq < 0.0 {
        return Err(Error::parse(Format::Pdb, line_number, "inconsistent CRYST1 cell angles"));
    }
    Ok([[a, 0.0, 0.0], [bx, by, 0.0], [cx, cy, cz_sq.sqrt()]])
}

fn cols(line: &str, start: usize, end: usize) -> &str {
    let bytes = line.as_bytes();
    if start >= bytes.len() {
        return "";
    }
    let end = end.min(bytes.len());
    line.get(start..end).map(str::trim).unwrap_or("")
}

fn coord(line: &str, start: usize, line_number: usize, what: &str) -> Result<f64, Error> {
    number(line, start, start + 8, line_number, what)
}

fn number(
    line: &str,
    start: usize,
    end: usize,
    line_number: usize,
    what: &str,
) -> Result<f64, Error> {
    let raw = cols(line, start, end);
    raw.parse::<f64>()
        .map_err(|_| Error::parse(Format::Pdb, line_number, format!("invalid {what} '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const WATER: &str = "\
ATOM      1  O   HOH A   1       0.000   0.000   0.119  1.00  0.00           O
ATOM      2  H1  HOH A   1       0.000   0.763  -0.477  1.00  0.00           H
ATOM      3  H2  HOH A   1       0.000  -0.763  -0.477  1.00  0.00           H
END
";

    #[test]
    fn reads_atom_records() {
        let s = read(Cursor::new(WATER.as_bytes())).unwrap();
        assert_eq!(s.atom_count(), 3);
        assert_eq!(s.atoms[0].element, Element::O);
        assert!((s.atoms[1].position[1] - 0.763).abs() < 1e-9);
        assert!(s.cell.is_none());
    }

    #[test]
    fn reads_cryst1_as_orthorhombic_cell() {
        let data = "\
CRYST1   10.000   12.000   14.000  90.00  90.00  90.00 P 1           1
HETATM    1 FE   LIG A   1       1.000   2.000   3.000  1.00  0.00          FE
END
";
        let s = read(Cursor::new(data.as_bytes())).unwrap();
        assert_eq!(s.atoms[0].element, Element::Fe);
        let cell = s.cell.unwrap();
        assert!((cell[0][0] - 10.0).abs() < 1e-9);
        assert!(cell[1][0].abs() < 1e-9);
        assert!((cell[1][1] - 12.0).abs() < 1e-9);
        assert!((cell[2][2] - 14.0).abs() < 1e-9);
    }

    #[test]
    fn triclinic_cell_reconstructs_lengths() {
        let data = "\
CRYST1    5.000    6.000    7.000  80.00  85.00  95.00 P 1           1
ATOM      1  C   LIG A   1       0.000   0.000   0.000  1.00  0.00           C
";
        let s = read(Cursor::new(data.as_bytes())).unwrap();
        let cell = s.cell.unwrap();
        let len = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
        assert!((len(cell[0]) - 5.0).abs() < 1e-9);
        assert!((len(cell[1]) - 6.0).abs() < 1e-9);
        assert!((len(cell[2]) - 7.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_atom_name_when_element_missing() {
        let data = "ATOM      1  N1  LIG A   1       0.000   0.000   0.000\n";
        let s = read(Cursor::new(data.as_bytes())).unwrap();
        assert_eq!(s.atoms[0].element, Element::N);
    }

    #[test]
    fn rejects_empty_and_malformed_input() {
        assert!(read(Cursor::new(&b"TITLE empty\n"[..])).is_err());

        let data = "ATOM      1  O   HOH A   1       x.xxx   0.000   0.000\n";
        let err = read(Cursor::new(data.as_bytes())).unwrap_err();
        assert!(err.to_string().contains("x coordinate"));
    }
}
