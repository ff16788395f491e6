//! Pure closed-form transforms between the three-phase representations.
//!
//! Every function here maps one coordinate triple (or pair) to another and
//! holds no state; [`ThreePhase`](super::ThreePhase) composes them into its
//! recompute chains.

use nalgebra::{Matrix2, Matrix3, Vector2, Vector3};
use num_complex::Complex64;

use super::consts::{ALPHA, ALPHA2, SQRT_3};

#[inline]
fn re(v: f64) -> Complex64 {
    Complex64::new(v, 0.0)
}

/// Fortescue matrix mapping `(a, b, c)` to `(z, p, n)`.
#[rustfmt::skip]
pub fn fortescue_matrix() -> Matrix3<Complex64> {
    let k = re(1.0 / 3.0);
    Matrix3::new(
        k, k, k,
        k, k * ALPHA, k * ALPHA2,
        k, k * ALPHA2, k * ALPHA,
    )
}

/// Inverse Fortescue matrix mapping `(z, p, n)` back to `(a, b, c)`.
#[rustfmt::skip]
pub fn inverse_fortescue_matrix() -> Matrix3<Complex64> {
    let one = re(1.0);
    Matrix3::new(
        one, one, one,
        one, ALPHA2, ALPHA,
        one, ALPHA, ALPHA2,
    )
}

/// Amplitude-invariant Clarke matrix mapping `(a, b, c)` to `(x, y, z)`.
///
/// The third row is the zero-sequence component, which for the 2/3 scaling
/// coincides with the Fortescue `z`.
#[rustfmt::skip]
pub fn clarke_matrix() -> Matrix3<Complex64> {
    let k = 2.0 / 3.0;
    let h = SQRT_3 / 2.0;
    Matrix3::new(
        re(k), re(-k / 2.0), re(-k / 2.0),
        re(0.0), re(k * h), re(-k * h),
        re(1.0 / 3.0), re(1.0 / 3.0), re(1.0 / 3.0),
    )
}

/// Inverse Clarke matrix mapping `(x, y, z)` back to `(a, b, c)`.
#[rustfmt::skip]
pub fn inverse_clarke_matrix() -> Matrix3<Complex64> {
    let h = SQRT_3 / 2.0;
    Matrix3::new(
        re(1.0), re(0.0), re(1.0),
        re(-0.5), re(h), re(1.0),
        re(-0.5), re(-h), re(1.0),
    )
}

/// Park rotation matrix for angle `theta`, mapping `(x, y)` to `(d, q)`.
#[rustfmt::skip]
pub fn park_matrix(theta: f64) -> Matrix2<Complex64> {
    let (s, c) = theta.sin_cos();
    Matrix2::new(
        re(c), re(s),
        re(-s), re(c),
    )
}

/// Phase values to sequence components `(z, p, n)`.
pub fn fortescue(abc: &Vector3<Complex64>) -> Vector3<Complex64> {
    fortescue_matrix() * abc
}

/// Sequence components `(z, p, n)` to phase values.
pub fn inverse_fortescue(zpn: &Vector3<Complex64>) -> Vector3<Complex64> {
    inverse_fortescue_matrix() * zpn
}

/// Phase values to the stationary frame `(x, y)`.
pub fn clarke(abc: &Vector3<Complex64>) -> Vector2<Complex64> {
    let xyz = clarke_matrix() * abc;
    Vector2::new(xyz[0], xyz[1])
}

/// Stationary frame `(x, y)` plus zero sequence `z` to phase values.
pub fn inverse_clarke(xy: &Vector2<Complex64>, z: Complex64) -> Vector3<Complex64> {
    inverse_clarke_matrix() * Vector3::new(xy[0], xy[1], z)
}

/// Stationary frame `(x, y)` to the rotating frame `(d, q)`.
pub fn park(xy: &Vector2<Complex64>, theta: f64) -> Vector2<Complex64> {
    park_matrix(theta) * xy
}

/// Rotating frame `(d, q)` back to the stationary frame `(x, y)`.
pub fn inverse_park(dq: &Vector2<Complex64>, theta: f64) -> Vector2<Complex64> {
    // the rotation is orthogonal, so the inverse is the transpose
    park_matrix(theta).transpose() * dq
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn assert_vec_close<const N: usize>(a: &[Complex64; N], b: &[Complex64; N]) {
        for (x, y) in a.iter().zip(b) {
            assert!((x - y).norm() < 1e-12, "{x} != {y}");
        }
    }

    #[test]
    fn test_fortescue_inverse_is_identity() {
        let m = fortescue_matrix() * inverse_fortescue_matrix();
        let id = Matrix3::<Complex64>::identity();
        assert!((m - id).iter().all(|e| e.norm() < 1e-12));
    }

    #[test]
    fn test_clarke_inverse_is_identity() {
        let m = inverse_clarke_matrix() * clarke_matrix();
        let id = Matrix3::<Complex64>::identity();
        assert!((m - id).iter().all(|e| e.norm() < 1e-12));
    }

    #[test]
    fn test_clarke_matches_closed_form() {
        let (a, b, cc) = (c(1.0, 0.5), c(-0.3, 2.0), c(0.7, -1.1));
        let xy = clarke(&Vector3::new(a, b, cc));
        let x = (a - b / 2.0 - cc / 2.0) * (2.0 / 3.0);
        let y = (b * SQRT_3 / 2.0 - cc * SQRT_3 / 2.0) * (2.0 / 3.0);
        assert_vec_close(&[xy[0], xy[1]], &[x, y]);
    }

    #[test]
    fn test_park_round_trip() {
        let xy = Vector2::new(c(3.0, -1.0), c(0.25, 4.0));
        for theta in [-7.0, -1.0, 0.0, 0.3, 2.5, 40.0] {
            let back = inverse_park(&park(&xy, theta), theta);
            assert_vec_close(&[back[0], back[1]], &[xy[0], xy[1]]);
        }
    }

    #[test]
    fn test_park_zero_angle_is_identity() {
        let xy = Vector2::new(c(1.0, 2.0), c(-3.0, 0.5));
        let dq = park(&xy, 0.0);
        assert_vec_close(&[dq[0], dq[1]], &[xy[0], xy[1]]);
    }
}
