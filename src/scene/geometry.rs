//! Vector helpers and bond cylinder placement.
//!
//! Cylinders are emitted as center / depth / axis-angle tuples; the scene
//! template only instantiates them. A cylinder primitive starts aligned
//! with +Z, so the rotation brings +Z onto the bond direction:
//! axis = direction × z, angle = -acos(direction · z).

use serde::Serialize;

pub fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    let d = sub(a, b);
    dot(d, d).sqrt()
}

pub fn normalize(v: [f64; 3]) -> [f64; 3] {
    let n = dot(v, v).sqrt();
    if n == 0.0 {
        return v;
    }
    [v[0] / n, v[1] / n, v[2] / n]
}

fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn lerp(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    [
        a[0] * (1.0 - t) + b[0] * t,
        a[1] * (1.0 - t) + b[1] * t,
        a[2] * (1.0 - t) + b[2] * t,
    ]
}

/// One cylinder in a generated scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CylinderSegment {
    /// Material key: an element symbol, or `"bond"` for mono-color sticks.
    pub material: String,
    /// Object name suffix, e.g. `Bond(0-1)`.
    pub name: String,
    pub center: [f64; 3],
    pub depth: f64,
    pub axis: [f64; 3],
    pub angle: f64,
}

const Z_AXIS: [f64; 3] = [0.0, 0.0, 1.0];

/// Axis-angle rotation taking +Z onto `direction` (unit vector).
///
/// A direction parallel to ±Z has a degenerate cross product; any axis
/// perpendicular to Z works there, +X by convention.
pub fn alignment(direction: [f64; 3]) -> ([f64; 3], f64) {
    let axis = cross(direction, Z_AXIS);
    if dot(axis, axis).sqrt() < 1e-12 {
        let angle = if direction[2] >= 0.0 { 0.0 } else { std::f64::consts::PI };
        return ([1.0, 0.0, 0.0], angle);
    }
    let angle = -dot(direction, Z_AXIS).clamp(-1.0, 1.0).acos();
    (axis, angle)
}

/// Single cylinder spanning the whole bond, drawn in the stick material.
pub fn mono_segment(i: usize, j: usize, p1: [f64; 3], p2: [f64; 3]) -> CylinderSegment {
    let depth = distance(p1, p2);
    let (axis, angle) = alignment(normalize(sub(p2, p1)));
    CylinderSegment {
        material: "bond".to_string(),
        name: format!("Bond({i}-{j})"),
        center: lerp(p1, p2, 0.5),
        depth,
        axis,
        angle,
    }
}

/// Two half-length cylinders meeting at the midpoint, one per endpoint
/// element (stick style bicolor).
pub fn half_segments(
    i: usize,
    j: usize,
    p1: [f64; 3],
    p2: [f64; 3],
    symbol1: &str,
    symbol2: &str,
) -> [CylinderSegment; 2] {
    let depth = distance(p1, p2) / 2.0;
    let (axis, angle) = alignment(normalize(sub(p2, p1)));
    [
        CylinderSegment {
            material: symbol1.to_string(),
            name: format!("Bond({i}-{j})"),
            center: lerp(p1, p2, 0.25),
            depth,
            axis,
            angle,
        },
        CylinderSegment {
            material: symbol2.to_string(),
            name: format!("Bond({j}-{i})"),
            center: lerp(p1, p2, 0.75),
            depth,
            axis,
            angle,
        },
    ]
}

/// Bicolor split weighted by ball sizes (ball-and-stick style): the gap
/// between the two sphere surfaces is shared evenly, so each cylinder runs
/// from its ball center to the middle of the gap.
pub fn weighted_segments(
    i: usize,
    j: usize,
    p1: [f64; 3],
    p2: [f64; 3],
    symbol1: &str,
    symbol2: &str,
    size1: f64,
    size2: f64,
) -> [CylinderSegment; 2] {
    let d = distance(p1, p2);
    let l = (d - size1 - size2) / 2.0;
    let ratio1 = (size1 + l) / d;
    let ratio2 = (size2 + l) / d;
    let (axis, angle) = alignment(normalize(sub(p2, p1)));
    [
        CylinderSegment {
            material: symbol1.to_string(),
            name: format!("Bond({i}-{j})"),
            center: lerp(p1, p2, ratio1 * 0.5),
            depth: d * ratio1,
            axis,
            angle,
        },
        CylinderSegment {
            material: symbol2.to_string(),
            name: format!("Bond({j}-{i})"),
            center: lerp(p1, p2, 1.0 - ratio2 * 0.5),
            depth: d * ratio2,
            axis,
            angle,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn approx_vec(a: [f64; 3], b: [f64; 3], eps: f64) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| approx_eq(*x, *y, eps))
    }

    #[test]
    fn vector_basics() {
        assert!(approx_eq(distance([0.0; 3], [3.0, 4.0, 0.0]), 5.0, 1e-12));
        assert!(approx_vec(
            cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            [0.0, 0.0, 1.0],
            1e-12
        ));
        let n = normalize([2.0, 0.0, 0.0]);
        assert!(approx_vec(n, [1.0, 0.0, 0.0], 1e-12));
    }

    #[test]
    fn alignment_along_x() {
        let (axis, angle) = alignment([1.0, 0.0, 0.0]);
        // x cross z = -y; angle is -pi/2.
        assert!(approx_vec(axis, [0.0, -1.0, 0.0], 1e-12));
        assert!(approx_eq(angle, -std::f64::consts::FRAC_PI_2, 1e-12));
    }

    #[test]
    fn alignment_degenerate_z() {
        let (axis, angle) = alignment([0.0, 0.0, 1.0]);
        assert!(approx_vec(axis, [1.0, 0.0, 0.0], 1e-12));
        assert!(approx_eq(angle, 0.0, 1e-12));

        let (axis, angle) = alignment([0.0, 0.0, -1.0]);
        assert!(approx_vec(axis, [1.0, 0.0, 0.0], 1e-12));
        assert!(approx_eq(angle, std::f64::consts::PI, 1e-12));
    }

    #[test]
    fn mono_segment_midpoint_and_depth() {
        let s = mono_segment(0, 1, [0.0; 3], [0.0, 0.0, 2.0]);
        assert_eq!(s.material, "bond");
        assert_eq!(s.name, "Bond(0-1)");
        assert!(approx_vec(s.center, [0.0, 0.0, 1.0], 1e-12));
        assert!(approx_eq(s.depth, 2.0, 1e-12));
    }

    #[test]
    fn half_segments_quarter_points() {
        let [a, b] = half_segments(0, 1, [0.0; 3], [4.0, 0.0, 0.0], "C", "O");
        assert!(approx_vec(a.center, [1.0, 0.0, 0.0], 1e-12));
        assert!(approx_vec(b.center, [3.0, 0.0, 0.0], 1e-12));
        assert!(approx_eq(a.depth, 2.0, 1e-12));
        assert!(approx_eq(b.depth, 2.0, 1e-12));
        assert_eq!(a.material, "C");
        assert_eq!(b.material, "O");
        assert_eq!(b.name, "Bond(1-0)");
    }

    #[test]
    fn weighted_segments_cover_bond_without_overlap_mismatch() {
        // d = 4, sizes 1 and 0.5: gap l = 1.25, ratios 0.5625 and 0.4375.
        let [a, b] = weighted_segments(2, 5, [0.0; 3], [4.0, 0.0, 0.0], "N", "H", 1.0, 0.5);
        assert!(approx_eq(a.depth, 2.25, 1e-12));
        assert!(approx_eq(b.depth, 1.75, 1e-12));
        // Depths together span the bond exactly.
        assert!(approx_eq(a.depth + b.depth, 4.0, 1e-12));
        assert!(approx_vec(a.center, [1.125, 0.0, 0.0], 1e-12));
        assert!(approx_vec(b.center, [4.0 - 0.875, 0.0, 0.0], 1e-12));
    }
}
