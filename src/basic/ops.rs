//! Arithmetic and rotation on [`ThreePhase`].
//!
//! The statically typed operators (`+`, `-`, `*`, `<<`, `>>`) cannot fail.
//! The `try_*` methods accept a dynamic [`Operand`] and report a
//! [`TransformError::TypeMismatch`] when the operand has the wrong kind.

use std::ops::{Add, Mul, Shl, Shr, Sub};

use derive_more::derive::From;
use num_complex::Complex64;

use super::error::{Result, TransformError};
use super::three_phase::ThreePhase;

/// A right-hand operand whose kind is only known at run time.
#[derive(Debug, Clone, Copy, PartialEq, From)]
pub enum Operand {
    Phase(ThreePhase),
    Real(f64),
    Integer(i64),
    Complex(Complex64),
}

impl From<i32> for Operand {
    fn from(v: i32) -> Self {
        Operand::Integer(v as i64)
    }
}

impl Operand {
    /// Name of the operand kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Phase(_) => "ThreePhase",
            Operand::Real(_) => "float",
            Operand::Integer(_) => "int",
            Operand::Complex(_) => "complex",
        }
    }

    fn mismatch(&self, op: &'static str) -> TransformError {
        TransformError::TypeMismatch {
            op,
            lhs: "ThreePhase",
            rhs: self.kind(),
        }
    }

    fn phase(self, op: &'static str) -> Result<ThreePhase> {
        match self {
            Operand::Phase(t) => Ok(t),
            other => Err(other.mismatch(op)),
        }
    }

    fn angle(self, op: &'static str) -> Result<f64> {
        match self {
            Operand::Real(v) => Ok(v),
            Operand::Integer(v) => Ok(v as f64),
            other => Err(other.mismatch(op)),
        }
    }
}

/// Sense of a phase rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Multiply by `exp(+i·angle)`; the `angle << t` operator.
    Forward,
    /// Multiply by `exp(-i·angle)`; the `angle >> t` operator.
    Backward,
}

impl ThreePhase {
    fn zip_with(&self, rhs: &ThreePhase, f: impl Fn(Complex64, Complex64) -> Complex64) -> ThreePhase {
        ThreePhase::new(f(self.a(), rhs.a()), f(self.b(), rhs.b()), f(self.c(), rhs.c()))
    }

    /// Multiplies every phase value by `exp(i·angle)`.
    ///
    /// The result is a fresh quantity with `theta = 0`.
    pub fn shift(&self, angle: f64) -> ThreePhase {
        let k = Complex64::from_polar(1.0, angle);
        ThreePhase::new(self.a() * k, self.b() * k, self.c() * k)
    }

    /// Rotates every phase value by `angle` radians in the given direction.
    pub fn rotate(&self, angle: f64, direction: Direction) -> ThreePhase {
        match direction {
            Direction::Forward => self.shift(angle),
            Direction::Backward => self.shift(-angle),
        }
    }

    /// Element-wise sum of the phase values.
    pub fn try_add(&self, rhs: impl Into<Operand>) -> Result<ThreePhase> {
        let rhs = rhs.into().phase("+")?;
        Ok(self.zip_with(&rhs, |l, r| l + r))
    }

    /// Element-wise difference of the phase values.
    pub fn try_subtract(&self, rhs: impl Into<Operand>) -> Result<ThreePhase> {
        let rhs = rhs.into().phase("-")?;
        Ok(self.zip_with(&rhs, |l, r| l - r))
    }

    /// Element-wise product of the phase values.
    pub fn try_multiply(&self, rhs: impl Into<Operand>) -> Result<ThreePhase> {
        let rhs = rhs.into().phase("*")?;
        Ok(self.zip_with(&rhs, |l, r| l * r))
    }

    /// Rotation by a run-time angle operand, which must be a real number.
    pub fn try_rotate(&self, angle: impl Into<Operand>, direction: Direction) -> Result<ThreePhase> {
        let op = match direction {
            Direction::Forward => "<<",
            Direction::Backward => ">>",
        };
        let angle = angle.into().angle(op)?;
        Ok(self.rotate(angle, direction))
    }
}

macro_rules! impl_elementwise_op {
    ($tr:ident, $method:ident, $op:tt) => {
        impl $tr for ThreePhase {
            type Output = ThreePhase;
            fn $method(self, rhs: ThreePhase) -> ThreePhase {
                self.zip_with(&rhs, |l, r| l $op r)
            }
        }

        impl $tr<&ThreePhase> for &ThreePhase {
            type Output = ThreePhase;
            fn $method(self, rhs: &ThreePhase) -> ThreePhase {
                self.zip_with(rhs, |l, r| l $op r)
            }
        }
    };
}

impl_elementwise_op!(Add, add, +);
impl_elementwise_op!(Sub, sub, -);
impl_elementwise_op!(Mul, mul, *);

macro_rules! impl_rotation_op {
    ($tr:ident, $method:ident, $dir:expr) => {
        impl $tr<ThreePhase> for f64 {
            type Output = ThreePhase;
            fn $method(self, rhs: ThreePhase) -> ThreePhase {
                rhs.rotate(self, $dir)
            }
        }

        impl $tr<f64> for ThreePhase {
            type Output = ThreePhase;
            fn $method(self, angle: f64) -> ThreePhase {
                self.rotate(angle, $dir)
            }
        }
    };
}

impl_rotation_op!(Shl, shl, Direction::Forward);
impl_rotation_op!(Shr, shr, Direction::Backward);
