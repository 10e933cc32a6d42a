//! Hover tooltip showing atom index, element and position.

use crate::model::structure::Structure;

const IDENTITY: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// JavaScript installing a hover tooltip on the page's `stage`. Positions
/// are reported in the standardized cell frame for periodic structures, so
/// they match the drawn coordinates.
pub fn tooltip_js(structure: &Structure) -> String {
    let q = structure.standard_rotation().unwrap_or(IDENTITY);
    let rows: Vec<String> = q
        .iter()
        .map(|row| format!("[{}, {}, {}]", row[0], row[1], row[2]))
        .collect();
    format!(
        "var Q = [{}];\n{}",
        rows.join(", "),
        r#"var tooltip = document.createElement('div');
Object.assign(tooltip.style, {
  display: 'none',
  position: 'fixed',
  zIndex: 10,
  pointerEvents: 'none',
  backgroundColor: 'rgba( 0, 0, 0, 0.6 )',
  color: 'lightgrey',
  padding: '8px',
  fontFamily: 'sans-serif'
});
document.body.appendChild(tooltip);

stage.mouseControls.remove('hoverPick');
stage.signals.hovered.add(function (pickingProxy) {
  if (pickingProxy && (pickingProxy.atom || pickingProxy.bond)) {
    var atom = pickingProxy.atom || pickingProxy.closestBondAtom;
    var mp = pickingProxy.mouse.position;
    var pos_x = Q[0][0] * atom.x + Q[0][1] * atom.y + Q[0][2] * atom.z;
    var pos_y = Q[1][0] * atom.x + Q[1][1] * atom.y + Q[1][2] * atom.z;
    var pos_z = Q[2][0] * atom.x + Q[2][1] * atom.y + Q[2][2] * atom.z;
    tooltip.innerText = 'i=' + atom.index + ' ' + atom.element + ' (' + pos_x.toFixed(2) + ', ' + pos_y.toFixed(2) + ', ' + pos_z.toFixed(2) + ')';
    tooltip.style.bottom = window.innerHeight - mp.y + 3 + 'px';
    tooltip.style.left = mp.x + 3 + 'px';
    tooltip.style.display = 'block';
  } else {
    tooltip.style.display = 'none';
  }
});
stage.tooltip = tooltip;"#
    )
}
