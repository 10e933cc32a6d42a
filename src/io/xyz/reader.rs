//! XYZ and extended-XYZ reading.
//!
//! The comment line of each frame may carry `key=value` pairs in the
//! extended-XYZ convention: `Lattice="ax ay az bx by bz cx cy cz"` for the
//! cell and `Properties=species:S:1:pos:R:3:...` describing the per-atom
//! columns. Recognized extra columns are `forces` (3 reals), `charge`
//! (1 real) and `move_mask` (1 logical; `F` marks a fixed atom). Unknown
//! columns are skipped.

use std::io::BufRead;
use std::str::FromStr;

use crate::io::{error::Error, Format};
use crate::model::atom::Atom;
use crate::model::structure::{Structure, Trajectory};
use crate::model::types::Element;

pub fn read_one<R: BufRead>(reader: R) -> Result<Structure, Error> {
    let lines = collect_lines(reader)?;
    let mut cursor = 0;
    parse_frame(&lines, &mut cursor)?
        .ok_or_else(|| Error::parse(Format::Xyz, 1, "no frames in input"))
}

pub fn read_all<R: BufRead>(reader: R) -> Result<Trajectory, Error> {
    let lines = collect_lines(reader)?;
    let mut cursor = 0;
    let mut frames = Vec::new();
    while let Some(frame) = parse_frame(&lines, &mut cursor)? {
        frames.push(frame);
    }
    Ok(Trajectory::new(frames)?)
}

fn collect_lines<R: BufRead>(reader: R) -> Result<Vec<(usize, String)>, Error> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|v| (i + 1, v)).map_err(|e| Error::Io { source: e }))
        .collect()
}

/// Per-atom column layout from a `Properties` declaration. Offsets index
/// whitespace-separated fields.
struct Columns {
    species: usize,
    pos: usize,
    forces: Option<usize>,
    charge: Option<usize>,
    move_mask: Option<usize>,
}

impl Default for Columns {
    fn default() -> Self {
        Self { species: 0, pos: 1, forces: None, charge: None, move_mask: None }
    }
}

fn parse_frame(
    lines: &[(usize, String)],
    cursor: &mut usize,
) -> Result<Option<Structure>, Error> {
    // Skip blank separator lines between frames.
    while *cursor < lines.len() && lines[*cursor].1.trim().is_empty() {
        *cursor += 1;
    }
    if *cursor >= lines.len() {
        return Ok(None);
    }

    let (count_ln, count_line) = &lines[*cursor];
    let count = count_line.trim().parse::<usize>().map_err(|_| {
        Error::parse(Format::Xyz, *count_ln, format!("invalid atom count '{}'", count_line.trim()))
    })?;
    *cursor += 1;

    if *cursor >= lines.len() {
        return Err(Error::parse(Format::Xyz, *count_ln, "missing comment line"));
    }
    let (comment_ln, comment) = &lines[*cursor];
    *cursor += 1;

    let mut cell = None;
    let mut columns = Columns::default();
    for (key, value) in parse_key_values(comment) {
        if key.eq_ignore_ascii_case("lattice") {
            cell = Some(parse_lattice(&value, *comment_ln)?);
        } else if key.eq_ignore_ascii_case("properties") {
            columns = parse_properties(&value, *comment_ln)?;
        }
    }

    let mut atoms = Vec::with_capacity(count);
    let mut forces = columns.forces.map(|_| Vec::with_capacity(count));
    let mut charges = columns.charge.map(|_| Vec::with_capacity(count));
    let mut fixed = Vec::new();

    for idx in 0..count {
        if *cursor >= lines.len() {
            return Err(Error::parse(
                Format::Xyz,
                lines.last().map(|(ln, _)| *ln).unwrap_or(0),
                format!("expected {count} atom lines, found {idx}"),
            ));
        }
        let (ln, raw) = &lines[*cursor];
        *cursor += 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();

        let symbol = field(&fields, columns.species, *ln, "element symbol")?;
        let element = Element::from_str(symbol)
            .map_err(|e| Error::parse(Format::Xyz, *ln, e.to_string()))?;
        let position = [
            real(&fields, columns.pos, *ln, "x coordinate")?,
            real(&fields, columns.pos + 1, *ln, "y coordinate")?,
            real(&fields, columns.pos + 2, *ln, "z coordinate")?,
        ];
        atoms.push(Atom::new(element, position));

        if let (Some(offset), Some(out)) = (columns.forces, forces.as_mut()) {
            out.push([
                real(&fields, offset, *ln, "force x")?,
                real(&fields, offset + 1, *ln, "force y")?,
                real(&fields, offset + 2, *ln, "force z")?,
            ]);
        }
        if let (Some(offset), Some(out)) = (columns.charge, charges.as_mut()) {
            out.push(real(&fields, offset, *ln, "charge")?);
        }
        if let Some(offset) = columns.move_mask {
            let value = field(&fields, offset, *ln, "move_mask")?;
            match value {
                "T" | "t" | "true" | "True" | "TRUE" => {}
                "F" | "f" | "false" | "False" | "FALSE" => fixed.push(idx),
                other => {
                    return Err(Error::parse(
                        Format::Xyz,
                        *ln,
                        format!("invalid move_mask value '{other}'"),
                    ));
                }
            }
        }
    }

    Ok(Some(Structure { atoms, cell, fixed, charges, forces }))
}

fn field<'a>(
    fields: &[&'a str],
    idx: usize,
    line: usize,
    what: &str,
) -> Result<&'a str, Error> {
    fields
        .get(idx)
        .copied()
        .ok_or_else(|| Error::parse(Format::Xyz, line, format!("missing {what} column")))
}

fn real(fields: &[&str], idx: usize, line: usize, what: &str) -> Result<f64, Error> {
    let raw = field(fields, idx, line, what)?;
    raw.parse::<f64>()
        .map_err(|_| Error::parse(Format::Xyz, line, format!("invalid {what} '{raw}'")))
}

/// Splits an extended-XYZ comment line into `key=value` pairs. Values may
/// be double-quoted to include spaces; bare words without `=` are ignored.
fn parse_key_values(comment: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    let mut chars = comment.chars().peekable();
    while chars.peek().is_some() {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let mut key = String::new();
        while let Some(&c) = chars.peek() {
            if c == '=' || c.is_whitespace() {
                break;
            }
            key.push(c);
            chars.next();
        }
        if chars.peek() != Some(&'=') {
            continue;
        }
        chars.next();
        let mut value = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                value.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                value.push(c);
                chars.next();
            }
        }
        if !key.is_empty() {
            pairs.push((key, value));
        }
    }
    pairs
}

fn parse_lattice(value: &str, line: usize) -> Result<[[f64; 3]; 3], Error> {
    let numbers: Vec<f64> = value
        .split_whitespace()
        .map(|v| v.parse::<f64>())
        .collect::<Result<_, _>>()
        .map_err(|_| Error::parse(Format::Xyz, line, "invalid Lattice value"))?;
    if numbers.len() != 9 {
        return Err(Error::parse(
            Format::Xyz,
            line,
            format!("Lattice must hold 9 numbers, found {}", numbers.len()),
        ));
    }
    Ok([
        [numbers[0], numbers[1], numbers[2]],
        [numbers[3], numbers[4], numbers[5]],
        [numbers[6], numbers[7], numbers[8]],
    ])
}

fn parse_properties(value: &str, line: usize) -> Result<Columns, Error> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() % 3 != 0 || parts.is_empty() {
        return Err(Error::parse(Format::Xyz, line, "malformed Properties declaration"));
    }
    let mut columns =
        Columns { species: usize::MAX, pos: usize::MAX, forces: None, charge: None, move_mask: None };
    let mut offset = 0;
    for chunk in parts.chunks(3) {
        let (name, width) = (chunk[0], chunk[2]);
        let width = width.parse::<usize>().map_err(|_| {
            Error::parse(Format::Xyz, line, format!("invalid column width '{width}'"))
        })?;
        match name.to_ascii_lowercase().as_str() {
            "species" => columns.species = offset,
            "pos" => columns.pos = offset,
            "forces" | "force" => columns.forces = Some(offset),
            "charge" | "charges" => columns.charge = Some(offset),
            "move_mask" => columns.move_mask = Some(offset),
            _ => {}
        }
        offset += width;
    }
    if columns.species == usize::MAX || columns.pos == usize::MAX {
        return Err(Error::parse(
            Format::Xyz,
            line,
            "Properties must declare species and pos columns",
        ));
    }
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_plain_xyz() {
        let data = b"3\nwater\nO 0.0 0.0 0.119\nH 0.0 0.763 -0.477\nH 0.0 -0.763 -0.477\n";
        let s = read_one(Cursor::new(&data[..])).unwrap();
        assert_eq!(s.atom_count(), 3);
        assert_eq!(s.atoms[0].element, Element::O);
        assert!((s.atoms[1].position[1] - 0.763).abs() < 1e-12);
        assert!(s.cell.is_none());
        assert!(s.charges.is_none());
    }

    #[test]
    fn reads_extended_xyz_with_cell_forces_and_charges() {
        let data = "2\n\
            Lattice=\"10.0 0.0 0.0 0.0 10.0 0.0 0.0 0.0 10.0\" \
            Properties=species:S:1:pos:R:3:forces:R:3:charge:R:1:move_mask:L:1 Time=0.0\n\
            O 0.0 0.0 0.0  0.1 0.0 0.0  -0.8 T\n\
            H 0.9 0.0 0.0  0.0 0.2 0.0   0.4 F\n";
        let s = read_one(Cursor::new(data.as_bytes())).unwrap();
        assert_eq!(s.cell.unwrap()[1][1], 10.0);
        let forces = s.forces.unwrap();
        assert!((forces[1][1] - 0.2).abs() < 1e-12);
        assert_eq!(s.charges.unwrap(), vec![-0.8, 0.4]);
        assert_eq!(s.fixed, vec![1]);
    }

    #[test]
    fn reads_multi_frame_trajectory() {
        let data = b"1\nframe 0\nH 0.0 0.0 0.0\n1\nframe 1\nH 0.0 0.0 0.5\n";
        let traj = read_all(Cursor::new(&data[..])).unwrap();
        assert_eq!(traj.frame_count(), 2);
        assert!((traj.frames()[1].atoms[0].position[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn read_one_takes_first_frame() {
        let data = b"1\na\nH 0.0 0.0 0.0\n1\nb\nH 1.0 0.0 0.0\n";
        let s = read_one(Cursor::new(&data[..])).unwrap();
        assert_eq!(s.atoms[0].position[0], 0.0);
    }

    #[test]
    fn rejects_bad_count_and_truncated_frames() {
        let err = read_one(Cursor::new(&b"x\ncomment\n"[..])).unwrap_err();
        assert!(err.to_string().contains("invalid atom count"));

        let err = read_one(Cursor::new(&b"2\ncomment\nH 0.0 0.0 0.0\n"[..])).unwrap_err();
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn rejects_unknown_element() {
        let err = read_one(Cursor::new(&b"1\nc\nXx 0.0 0.0 0.0\n"[..])).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 3, .. }));
    }

    #[test]
    fn key_value_parser_handles_quotes() {
        let pairs = parse_key_values("Lattice=\"1 2 3\" pbc=\"T T T\" Energy=-1.5 bare");
        assert_eq!(pairs[0], ("Lattice".to_string(), "1 2 3".to_string()));
        assert_eq!(pairs[1], ("pbc".to_string(), "T T T".to_string()));
        assert_eq!(pairs[2], ("Energy".to_string(), "-1.5".to_string()));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(read_one(Cursor::new(&b""[..])).is_err());
        assert!(read_all(Cursor::new(&b"\n\n"[..])).is_err());
    }
}
