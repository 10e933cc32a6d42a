//! Extended-XYZ writing.

use std::io::Write;

use crate::io::error::Error;
use crate::model::structure::Structure;

pub fn write<W: Write>(writer: &mut W, structure: &Structure) -> Result<(), Error> {
    writeln!(writer, "{}", structure.atoms.len())?;

    let mut comment = String::new();
    if let Some(cell) = structure.cell {
        comment.push_str("Lattice=\"");
        for (i, row) in cell.iter().enumerate() {
            if i > 0 {
                comment.push(' ');
            }
            comment.push_str(&format!("{:.8} {:.8} {:.8}", row[0], row[1], row[2]));
        }
        comment.push_str("\" ");
    }
    comment.push_str("Properties=species:S:1:pos:R:3");
    if structure.forces.is_some() {
        comment.push_str(":forces:R:3");
    }
    if structure.charges.is_some() {
        comment.push_str(":charge:R:1");
    }
    if !structure.fixed.is_empty() {
        comment.push_str(":move_mask:L:1");
    }
    writeln!(writer, "{comment}")?;

    for (i, atom) in structure.atoms.iter().enumerate() {
        let [x, y, z] = atom.position;
        write!(writer, "{:<2} {x:>15.8} {y:>15.8} {z:>15.8}", atom.element.symbol())?;
        if let Some(forces) = &structure.forces {
            let [fx, fy, fz] = forces[i];
            write!(writer, " {fx:>15.8} {fy:>15.8} {fz:>15.8}")?;
        }
        if let Some(charges) = &structure.charges {
            write!(writer, " {:>12.8}", charges[i])?;
        }
        if !structure.fixed.is_empty() {
            write!(writer, " {}", if structure.fixed.contains(&i) { "F" } else { "T" })?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::xyz::reader::read_one;
    use crate::model::atom::Atom;
    use crate::model::types::Element;
    use std::io::Cursor;

    #[test]
    fn written_frames_read_back() {
        let structure = Structure {
            atoms: vec![
                Atom::new(Element::O, [0.0, 0.0, 0.119]),
                Atom::new(Element::H, [0.0, 0.763, -0.477]),
            ],
            cell: Some([[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]]),
            fixed: vec![0],
            charges: Some(vec![-0.8, 0.4]),
            forces: Some(vec![[0.1, 0.0, 0.0], [0.0, 0.0, 0.2]]),
        };
        let mut buf = Vec::new();
        write(&mut buf, &structure).unwrap();

        let back = read_one(Cursor::new(buf)).unwrap();
        assert_eq!(back.atoms[0].element, Element::O);
        assert!((back.atoms[1].position[1] - 0.763).abs() < 1e-8);
        assert_eq!(back.cell.unwrap()[2][2], 10.0);
        assert_eq!(back.fixed, vec![0]);
        assert_eq!(back.charges.unwrap(), vec![-0.8, 0.4]);
        assert!((back.forces.unwrap()[1][2] - 0.2).abs() < 1e-8);
    }

    #[test]
    fn plain_structure_gets_minimal_properties() {
        let structure = Structure {
            atoms: vec![Atom::new(Element::C, [1.0, 2.0, 3.0])],
            ..Structure::default()
        };
        let mut buf = Vec::new();
        write(&mut buf, &structure).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("1\nProperties=species:S:1:pos:R:3\n"));
        assert!(!text.contains("move_mask"));
    }
}
