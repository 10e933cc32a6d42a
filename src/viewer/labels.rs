//! Per-atom label text generation.

use super::error::Error;
use crate::model::structure::Structure;

/// What the atom labels display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelMode {
    /// No labels.
    #[default]
    None,
    /// Zero-based atom index.
    Index,
    /// Element symbol.
    Symbol,
    /// Charge rounded to the given number of decimals.
    Charge { decimals: usize },
    /// `Fix` on constrained atoms, blank elsewhere.
    Fixed,
}

/// One label per atom, in atom order. `LabelMode::Charge` requires the
/// structure to carry charges.
pub fn label_texts(structure: &Structure, mode: LabelMode) -> Result<Vec<String>, Error> {
    let texts = match mode {
        LabelMode::None => vec![String::new(); structure.atom_count()],
        LabelMode::Index => (0..structure.atom_count()).map(|i| i.to_string()).collect(),
        LabelMode::Symbol => structure
            .atoms
            .iter()
            .map(|atom| atom.element.symbol().to_string())
            .collect(),
        LabelMode::Charge { decimals } => {
            let charges = structure.charges.as_ref().ok_or(Error::MissingCharges)?;
            charges.iter().map(|q| format!("{q:.decimals$}")).collect()
        }
        LabelMode::Fixed => (0..structure.atom_count())
            .map(|i| if structure.fixed.contains(&i) { "Fix".to_string() } else { String::new() })
            .collect(),
    };
    Ok(texts)
}
