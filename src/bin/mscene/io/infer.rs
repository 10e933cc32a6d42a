use std::path::Path;

use molscene::io::Format;

pub fn input_format(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "xyz" | "extxyz" => Some(Format::Xyz),
        "pdb" | "ent" => Some(Format::Pdb),
        _ => None,
    }
}
