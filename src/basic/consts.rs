use num_complex::Complex64;

/// Precalculated sqrt(3)
pub const SQRT_3: f64 = 1.7320508075688772;

/// The rotation operator `exp(i·2π/3)` of symmetrical-component math.
pub const ALPHA: Complex64 = Complex64::new(-0.5, SQRT_3 / 2.0);

/// `ALPHA²`, i.e. `exp(-i·2π/3)`.
pub const ALPHA2: Complex64 = Complex64::new(-0.5, -SQRT_3 / 2.0);

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_alpha_is_cube_root_of_unity() {
        let expected = Complex64::new(0.0, 2.0 * PI / 3.0).exp();
        assert!((ALPHA - expected).norm() < 1e-15);
        assert!((ALPHA * ALPHA - ALPHA2).norm() < 1e-15);
        assert!((ALPHA * ALPHA2 - Complex64::new(1.0, 0.0)).norm() < 1e-15);
        assert!((Complex64::new(1.0, 0.0) + ALPHA + ALPHA2).norm() < 1e-15);
    }
}
