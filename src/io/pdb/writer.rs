//! PDB writing.

use std::io::Write;

use crate::io::error::Error;
use crate::model::structure::Structure;

pub fn write<W: Write>(writer: &mut W, structure: &Structure) -> Result<(), Error> {
    if let Some(cell) = structure.cell {
        let (a, b, c, alpha, beta, gamma) = cell_parameters(cell);
        writeln!(
            writer,
            "CRYST1{a:>9.3}{b:>9.3}{c:>9.3}{alpha:>7.2}{beta:>7.2}{gamma:>7.2} P 1           1"
        )?;
    }
    for (i, atom) in structure.atoms.iter().enumerate() {
        let symbol = atom.element.symbol();
        // One-letter elements sit in column 14, two-letter ones start at 13.
        let name = if symbol.len() == 1 { format!(" {symbol}") } else { symbol.to_string() };
        let [x, y, z] = atom.position;
        writeln!(
            writer,
            "ATOM  {serial:>5} {name:<4} MOL A{resseq:>4}    {x:>8.3}{y:>8.3}{z:>8.3}{occ:>6.2}{temp:>6.2}          {element:>2}",
            serial = (i + 1) % 100_000,
            resseq = 1,
            occ = 1.0,
            temp = 0.0,
            element = symbol.to_ascii_uppercase(),
        )?;
    }
    writeln!(writer, "END")?;
    Ok(())
}

/// Cell vectors to PDB lengths and angles (degrees).
fn cell_parameters(cell: [[f64; 3]; 3]) -> (f64, f64, f64, f64, f64, f64) {
    let len = |v: [f64; 3]| (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    let angle = |u: [f64; 3], v: [f64; 3]| {
        let dot = u[0] * v[0] + u[1] * v[1] + u[2] * v[2];
        (dot / (len(u) * len(v))).clamp(-1.0, 1.0).acos().to_degrees()
    };
    let (a, b, c) = (len(cell[0]), len(cell[1]), len(cell[2]));
    (a, b, c, angle(cell[1], cell[2]), angle(cell[0], cell[2]), angle(cell[0], cell[1]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::pdb::reader::read;
    use crate::model::atom::Atom;
    use crate::model::types::Element;
    use std::io::Cursor;

    fn sample() -> Structure {
        Structure {
            atoms: vec![
                Atom::new(Element::O, [0.0, 0.0, 0.119]),
                Atom::new(Element::H, [0.0, 0.763, -0.477]),
                Atom::new(Element::Fe, [2.0, 2.0, 2.0]),
            ],
            cell: Some([[10.0, 0.0, 0.0], [0.0, 12.0, 0.0], [0.0, 0.0, 14.0]]),
            ..Structure::default()
        }
    }

    #[test]
    fn fixed_width_columns_line_up() {
        let mut buf = Vec::new();
        write(&mut buf, &sample()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].starts_with("CRYST1   10.000   12.000   14.000  90.00  90.00  90.00"));
        assert_eq!(&lines[1][0..6], "ATOM  ");
        assert_eq!(&lines[1][30..38], "   0.000");
        assert_eq!(&lines[1][46..54], "   0.119");
        assert_eq!(&lines[1][76..78], " O");
        assert_eq!(&lines[3][76..78], "FE");
        assert_eq!(*lines.last().unwrap(), "END");
    }

    #[test]
    fn written_structures_read_back() {
        let mut buf = Vec::new();
        write(&mut buf, &sample()).unwrap();

        let back = read(Cursor::new(buf)).unwrap();
        assert_eq!(back.atom_count(), 3);
        assert_eq!(back.atoms[2].element, Element::Fe);
        assert!((back.atoms[1].position[1] - 0.763).abs() < 1e-9);
        let cell = back.cell.unwrap();
        assert!((cell[1][1] - 12.0).abs() < 1e-6);
    }
}
