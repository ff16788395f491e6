use num_complex::Complex64;

use super::three_phase::ThreePhase;

/// Trait for computing the complex conjugate of a quantity.
pub trait Conjugate {
    type Output;

    /// Returns the conjugate of the quantity.
    fn conjugate(&self) -> Self::Output;

    /// Computes the conjugate of the quantity in-place.
    fn conjugate_mut(&mut self);
}

impl Conjugate for ThreePhase {
    type Output = ThreePhase;

    /// Conjugates `a, b, c` and rebuilds every other view from them.
    ///
    /// Like the arithmetic operators this yields a fresh quantity with
    /// `theta = 0`.
    fn conjugate(&self) -> Self::Output {
        ThreePhase::new(self.a().conj(), self.b().conj(), self.c().conj())
    }

    /// Conjugates `a, b, c` in place, keeping the current `theta`.
    fn conjugate_mut(&mut self) {
        let [a, b, c]: [Complex64; 3] = [self.a(), self.b(), self.c()].map(|v| v.conj());
        self.set_abc(a, b, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn close(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() <= 1e-12 * b.norm().max(1.0)
    }

    /// Tests the conjugate operation.
    #[test]
    fn test_conj() {
        let t = ThreePhase::new(c(1.0, 2.0), c(-0.5, 0.25), c(3.0, -1.0));
        let cj = t.conjugate();
        assert_eq!(cj.a(), c(1.0, -2.0));
        assert_eq!(cj.b(), c(-0.5, -0.25));
        assert_eq!(cj.c(), c(3.0, 1.0));
        // conjugation swaps the positive and negative sequence
        assert!(close(cj.p(), t.n().conj()));
        assert!(close(cj.n(), t.p().conj()));
        assert!(close(cj.z(), t.z().conj()));
    }

    /// Tests the in-place conjugate operation.
    #[test]
    fn test_conj_mut() {
        let mut t = ThreePhase::new(c(1.0, 2.0), c(-0.5, 0.25), c(3.0, -1.0)).with_theta(0.3);
        let expected = t.conjugate().with_theta(0.3);
        t.conjugate_mut();
        assert_eq!(t, expected);
    }
}
