//! Force arrows and charge coloring overlays.
//!
//! Periodic structures are drawn in the standardized cell frame, so both
//! positions and force vectors are rotated before arrow endpoints are
//! computed.

use serde::Serialize;

use super::error::Error;
use crate::model::structure::Structure;

/// Endpoints of one force arrow, in viewer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForceArrow {
    pub start: [f64; 3],
    pub end: [f64; 3],
}

/// One arrow per atom from its position to position plus force times
/// `scale`. Requires the structure to carry forces.
pub fn force_arrows(structure: &Structure, scale: f64) -> Result<Vec<ForceArrow>, Error> {
    let forces = structure.forces.as_ref().ok_or(Error::MissingForces)?;
    let rotation = structure.standard_rotation();
    let arrows = structure
        .atoms
        .iter()
        .zip(forces)
        .map(|(atom, &force)| {
            let start = rotated(atom.position, rotation);
            let step = rotated(force, rotation);
            let end = [
                start[0] + step[0] * scale,
                start[1] + step[1] * scale,
                start[2] + step[2] * scale,
            ];
            ForceArrow { start, end }
        })
        .collect();
    Ok(arrows)
}

fn rotated(v: [f64; 3], rotation: Option<[[f64; 3]; 3]>) -> [f64; 3] {
    match rotation {
        Some(q) => [
            q[0][0] * v[0] + q[0][1] * v[1] + q[0][2] * v[2],
            q[1][0] * v[0] + q[1][1] * v[1] + q[1][2] * v[2],
            q[2][0] * v[0] + q[2][1] * v[1] + q[2][2] * v[2],
        ],
        None => v,
    }
}

/// JavaScript that registers a `partialCharge` field on the NGL atom store
/// and recolors the spacefill representation by it. Charges are multiplied
/// by `scale` before being written into the store.
pub fn charge_store_js(structure: &Structure, scale: f64) -> Result<String, Error> {
    let charges = structure.charges.as_ref().ok_or(Error::MissingCharges)?;
    let scaled: Vec<f64> = charges.iter().map(|q| q * scale).collect();
    let array = serde_json::to_string(&scaled)?;
    Ok(format!(
        "var chargeArray = {array};\n\
         var atomStore = component.structure.atomStore;\n\
         if (atomStore.partialCharge === undefined) {{\n\
         \u{20} atomStore.addField('partialCharge', 1, 'float32');\n\
         }}\n\
         for (let i = 0; i < chargeArray.length; ++i) {{\n\
         \u{20} atomStore.partialCharge[i] = chargeArray[i];\n\
         }}\n\
         component.addRepresentation(\"spacefill\", {{\n\
         \u{20} radiusType: \"covalent\",\n\
         \u{20} radiusScale: CONFIG.radiusScale,\n\
         \u{20} colorScheme: \"partialcharge\",\n\
         \u{20} colorScale: \"rwb\"\n\
         }});"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::types::Element;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn arrows_run_from_position_along_scaled_force() {
        let structure = Structure {
            atoms: vec![Atom::new(Element::H, [1.0, 0.0, 0.0])],
            forces: Some(vec![[0.0, 2.0, 0.0]]),
            ..Structure::default()
        };
        let arrows = force_arrows(&structure, 0.5).unwrap();
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].start, [1.0, 0.0, 0.0]);
        assert!(approx_eq(arrows[0].end[1], 1.0));
    }

    #[test]
    fn periodic_structures_rotate_into_the_standard_frame() {
        // Cell with its first vector along y; the standard frame maps y to x.
        let structure = Structure {
            atoms: vec![Atom::new(Element::H, [0.0, 3.0, 0.0])],
            cell: Some([[0.0, 10.0, 0.0], [0.0, 0.0, 10.0], [10.0, 0.0, 0.0]]),
            forces: Some(vec![[0.0, 1.0, 0.0]]),
            ..Structure::default()
        };
        let arrows = force_arrows(&structure, 1.0).unwrap();
        assert!(approx_eq(arrows[0].start[0], 3.0));
        assert!(approx_eq(arrows[0].start[1], 0.0));
        assert!(approx_eq(arrows[0].end[0], 4.0));
    }

    #[test]
    fn missing_forces_are_an_error() {
        let structure = Structure {
            atoms: vec![Atom::new(Element::H, [0.0, 0.0, 0.0])],
            ..Structure::default()
        };
        assert!(matches!(force_arrows(&structure, 1.0), Err(Error::MissingForces)));
    }

    #[test]
    fn charge_js_scales_and_registers_the_store_field() {
        let structure = Structure {
            atoms: vec![Atom::new(Element::O, [0.0, 0.0, 0.0])],
            charges: Some(vec![-0.5]),
            ..Structure::default()
        };
        let js = charge_store_js(&structure, 2.0).unwrap();
        assert!(js.starts_with("var chargeArray = [-1.0];"));
        assert!(js.contains("atomStore.addField('partialCharge', 1, 'float32')"));
        assert!(js.contains("colorScheme: \"partialcharge\""));

        let none = Structure {
            atoms: vec![Atom::new(Element::O, [0.0, 0.0, 0.0])],
            ..Structure::default()
        };
        assert!(matches!(charge_store_js(&none, 1.0), Err(Error::MissingCharges)));
    }
}
