//! Consistent alternate representations of three-phase quantities.
//!
//! [`ThreePhase`](prelude::ThreePhase) keeps phase (A, B, C), symmetrical
//! component (zero/positive/negative), stationary Clarke (X, Y) and rotating
//! Park (D, Q) views of one quantity in sync: writing any view recomputes all
//! the others before the setter returns. [`WyeDelta`](prelude::WyeDelta) does
//! the same for a three-branch impedance network.
//!
//! ```
//! use threephase::prelude::*;
//!
//! let mut v = ThreePhase::new(1.0, ALPHA2, ALPHA);
//! assert!((v.p() - Complex64::new(1.0, 0.0)).norm() < 1e-12);
//! v.set_theta(std::f64::consts::FRAC_PI_2);
//! assert!((v.q() + Complex64::new(1.0, 0.0)).norm() < 1e-12);
//! ```
mod basic;
pub mod prelude {
    use crate::basic;
    pub use basic::*;
    pub use num_complex::Complex64;
}
