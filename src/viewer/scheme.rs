//! JavaScript color scheme generation for the NGL viewer.

use crate::scene::{Palette, Rgba};

/// Builds the body of an NGL colormaker: an `atomColor` callback mapping
/// upper-cased element symbols to `0xrrggbb` literals, one `else if` branch
/// per palette entry, with a grey fallback for anything unlisted.
pub fn js_color_scheme(palette: &Palette) -> String {
    let mut code = String::from("this.atomColor = function (atom) {\n");
    for (i, (element, color)) in palette.iter().enumerate() {
        let keyword = if i == 0 { "  if" } else { " else if" };
        code.push_str(&format!(
            "{keyword} (atom.element == \"{}\") {{ return {} }}",
            element.symbol().to_ascii_uppercase(),
            color.to_js_hex(),
        ));
    }
    if !palette.is_empty() {
        code.push('\n');
    }
    code.push_str(&format!("  return {}\n}}", Rgba::grey().to_js_hex()));
    code
}
