//! Blender script generation.
//!
//! The script is the embedded template with the serialized scene document
//! substituted for a single placeholder. No logic lives in the template;
//! everything it draws was computed during composition.

use std::io::Write;

use super::doc::SceneDoc;
use super::error::Error;

const TEMPLATE: &str = include_str!("../../resources/blender_template.py");
const PLACEHOLDER: &str = "__MOLSCENE_JSON__";

/// Renders the scene document into a runnable Blender Python script.
pub fn render(doc: &SceneDoc) -> Result<String, Error> {
    let json = serde_json::to_string(doc)?;
    Ok(TEMPLATE.replace(PLACEHOLDER, &json))
}

/// Renders and writes the script.
pub fn write_script<W: Write>(writer: &mut W, doc: &SceneDoc) -> Result<(), Error> {
    let script = render(doc)?;
    writer.write_all(script.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::atom::Atom;
    use crate::model::structure::Structure;
    use crate::model::types::Element;
    use crate::scene::doc::{compose, StyleSpec, StyleSource};
    use crate::scene::palette::PaletteKind;
    use crate::scene::style::StyleKind;

    fn doc() -> SceneDoc {
        let s = Structure {
            atoms: vec![
                Atom::new(Element::O, [0.0, 0.0, 0.119]),
                Atom::new(Element::H, [0.0, 0.763, -0.477]),
                Atom::new(Element::H, [0.0, -0.763, -0.477]),
            ],
            ..Structure::default()
        };
        let spec = StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&s));
        compose(&[spec], PaletteKind::Default.palette()).unwrap()
    }

    #[test]
    fn placeholder_is_substituted() {
        let script = render(&doc()).unwrap();
        assert!(!script.contains(PLACEHOLDER));
        assert!(script.contains("json.loads(r'''{"));
        assert!(script.contains("\"style\":\"ball_and_stick\""));
    }

    #[test]
    fn template_keeps_its_entry_points() {
        let script = render(&doc()).unwrap();
        for name in ["delete_all_objects", "register_material", "draw_atoms", "draw_segment"] {
            assert!(script.contains(name), "missing {name}");
        }
    }

    #[test]
    fn two_styles_render_into_one_script() {
        let s = Structure {
            atoms: vec![
                Atom::new(Element::O, [0.0, 0.0, 0.119]),
                Atom::new(Element::H, [0.0, 0.763, -0.477]),
                Atom::new(Element::H, [0.0, -0.763, -0.477]),
            ],
            ..Structure::default()
        };
        let doc = compose(
            &[
                StyleSpec::new(StyleKind::BallAndStick, StyleSource::Single(&s)),
                StyleSpec::new(StyleKind::SpaceFilling, StyleSource::Single(&s)),
            ],
            PaletteKind::Default.palette(),
        )
        .unwrap();
        assert_eq!(doc.styles.len(), 2);

        let script = render(&doc).unwrap();
        assert!(script.contains("\"style\":\"ball_and_stick\""));
        assert!(script.contains("\"style\":\"space_filling\""));
        // The template prefixes object names per style entry when there is
        // more than one, keeping materials distinct.
        assert!(script.contains("\"%d_\" % style_index"));
    }

    #[test]
    fn write_script_emits_bytes() {
        let mut buf = Vec::new();
        write_script(&mut buf, &doc()).unwrap();
        assert!(!buf.is_empty());
    }
}
