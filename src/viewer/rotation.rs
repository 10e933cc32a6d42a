//! Camera rotation math for the viewer page.

/// Cartesian axes, for spins about a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// General rotation matrix for roll `x`, pitch `y` and yaw `z`.
///
/// Entries are rounded to 15 decimals so exact angles produce exact zeros
/// and ones.
pub fn rotation_matrix(x: f64, y: f64, z: f64, degrees: bool) -> [[f64; 3]; 3] {
    let (mut c, mut b, mut a) = (x, y, z);
    if degrees {
        a = a.to_radians();
        b = b.to_radians();
        c = c.to_radians();
    }
    let m = [
        [
            a.cos() * b.cos(),
            a.cos() * b.sin() * c.sin() - a.sin() * c.cos(),
            a.cos() * b.sin() * c.cos() + a.sin() * c.sin(),
        ],
        [
            a.sin() * b.cos(),
            a.sin() * b.sin() * c.sin() + a.cos() * c.cos(),
            a.sin() * b.sin() * c.cos() - a.cos() * c.sin(),
        ],
        [-b.sin(), b.cos() * c.sin(), b.cos() * c.cos()],
    ];
    m.map(|row| row.map(round15))
}

fn round15(v: f64) -> f64 {
    (v * 1e15).round() / 1e15
}

/// Converts a rotation matrix to a `[qw, qx, qy, qz]` quaternion.
pub fn quaternion(r: [[f64; 3]; 3]) -> [f64; 4] {
    let tr = r[0][0] + r[1][1] + r[2][2];
    if tr > 0.0 {
        let s = (tr + 1.0).sqrt() * 2.0;
        [
            0.25 * s,
            (r[2][1] - r[1][2]) / s,
            (r[0][2] - r[2][0]) / s,
            (r[1][0] - r[0][1]) / s,
        ]
    } else if r[0][0] > r[1][1] && r[0][0] > r[2][2] {
        let s = (1.0 + r[0][0] - r[1][1] - r[2][2]).sqrt() * 2.0;
        [
            (r[2][1] - r[1][2]) / s,
            0.25 * s,
            (r[0][1] + r[1][0]) / s,
            (r[0][2] + r[2][0]) / s,
        ]
    } else if r[1][1] > r[2][2] {
        let s = (1.0 + r[1][1] - r[0][0] - r[2][2]).sqrt() * 2.0;
        [
            (r[0][2] - r[2][0]) / s,
            (r[0][1] + r[1][0]) / s,
            0.25 * s,
            (r[1][2] + r[2][1]) / s,
        ]
    } else {
        let s = (1.0 + r[2][2] - r[0][0] - r[1][1]).sqrt() * 2.0;
        [
            (r[1][0] - r[0][1]) / s,
            (r[0][2] + r[2][0]) / s,
            (r[1][2] + r[2][1]) / s,
            0.25 * s,
        ]
    }
}

/// Flat 4x4 column matrix spinning the view about one axis.
pub fn spin_matrix(axis: Axis, angle: f64, degrees: bool) -> [f64; 16] {
    let angle = if degrees { angle.to_radians() } else { angle };
    let (s, c) = angle.sin_cos();
    match axis {
        Axis::X => [
            1.0, 0.0, 0.0, 0.0, //
            0.0, c, -s, 0.0, //
            0.0, s, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
        Axis::Y => [
            c, 0.0, s, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            -s, 0.0, c, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
        Axis::Z => [
            c, -s, 0.0, 0.0, //
            s, c, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_angles_give_the_identity() {
        let r = rotation_matrix(0.0, 0.0, 0.0, true);
        assert_eq!(r, [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(quaternion(r), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn known_rotation_matrix_values() {
        let r = rotation_matrix(90.0, 45.0, 30.0, true);
        assert!(approx_eq(r[0][0], 0.61237243569579447));
        assert!(approx_eq(r[0][2], 0.5));
        assert!(approx_eq(r[1][2], -0.86602540378443871));
        assert!(approx_eq(r[2][0], -0.70710678118654746));
        assert!(approx_eq(r[2][2], 0.0));
    }

    #[test]
    fn quarter_turn_about_x_as_quaternion() {
        let r = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
        let q = quaternion(r);
        assert!(approx_eq(q[0], std::f64::consts::FRAC_1_SQRT_2));
        assert!(approx_eq(q[1], std::f64::consts::FRAC_1_SQRT_2));
        assert!(approx_eq(q[2], 0.0));
        assert!(approx_eq(q[3], 0.0));
    }

    #[test]
    fn quaternion_handles_all_trace_branches() {
        for (x, y, z) in [(180.0, 0.0, 0.0), (0.0, 180.0, 0.0), (0.0, 0.0, 180.0)] {
            let q = quaternion(rotation_matrix(x, y, z, true));
            let norm: f64 = q.iter().map(|v| v * v).sum();
            assert!(approx_eq(norm, 1.0));
        }
    }

    #[test]
    fn spin_matrices_embed_plane_rotations() {
        let m = spin_matrix(Axis::Z, 90.0, true);
        assert!(approx_eq(m[0], 0.0));
        assert!(approx_eq(m[1], -1.0));
        assert!(approx_eq(m[4], 1.0));
        assert!(approx_eq(m[10], 1.0));
        assert!(approx_eq(m[15], 1.0));
    }
}
