//! The three-phase transform engine.

use nalgebra::{Vector2, Vector3};
use num_complex::Complex64;
use tracing::trace;

use super::snapshot::Component;
use super::transform::{
    clarke, fortescue, inverse_clarke, inverse_fortescue, inverse_park, park,
};

/// A three-phase quantity viewed in every supported frame at once.
///
/// One value holds the phase values `a, b, c`, the symmetrical components
/// `z, p, n`, the stationary Clarke pair `x, y` and the rotating Park pair
/// `d, q` (rotated by [`theta`](Self::theta)). All of them are kept mutually
/// consistent: every setter rebuilds the whole state from the written
/// representation and replaces `self` in one assignment, so a half-updated
/// value is never observable.
///
/// Mutation requires `&mut self`; sharing one instance between threads needs
/// an outer lock such as `Mutex<ThreePhase>`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "archive",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "PhaseRecord", into = "PhaseRecord")
)]
pub struct ThreePhase {
    a: Complex64,
    b: Complex64,
    c: Complex64,
    z: Complex64,
    p: Complex64,
    n: Complex64,
    x: Complex64,
    y: Complex64,
    d: Complex64,
    q: Complex64,
    theta: f64,
}

/// Serialized form of [`ThreePhase`]: only the phase values and the angle
/// are stored, every other view is rebuilt on load.
#[cfg(feature = "archive")]
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
struct PhaseRecord {
    a: Complex64,
    b: Complex64,
    c: Complex64,
    #[serde(default)]
    theta: f64,
}

#[cfg(feature = "archive")]
impl From<PhaseRecord> for ThreePhase {
    fn from(r: PhaseRecord) -> Self {
        ThreePhase::from_abc(r.a, r.b, r.c, r.theta)
    }
}

#[cfg(feature = "archive")]
impl From<ThreePhase> for PhaseRecord {
    fn from(t: ThreePhase) -> Self {
        PhaseRecord {
            a: t.a,
            b: t.b,
            c: t.c,
            theta: t.theta,
        }
    }
}

impl Default for ThreePhase {
    /// The zero quantity with `theta = 0`.
    fn default() -> Self {
        Self::from_abc(Complex64::default(), Complex64::default(), Complex64::default(), 0.0)
    }
}

impl ThreePhase {
    /// Creates a quantity from its phase values, with `theta = 0`.
    pub fn new(a: impl Into<Complex64>, b: impl Into<Complex64>, c: impl Into<Complex64>) -> Self {
        Self::from_abc(a.into(), b.into(), c.into(), 0.0)
    }

    /// Creates a quantity from its zero, positive and negative sequence
    /// components.
    pub fn from_sequence(
        z: impl Into<Complex64>,
        p: impl Into<Complex64>,
        n: impl Into<Complex64>,
    ) -> Self {
        Self::from_zpn(z.into(), p.into(), n.into(), 0.0)
    }

    /// Creates a quantity from its stationary-frame pair and zero sequence.
    pub fn from_stationary(
        x: impl Into<Complex64>,
        y: impl Into<Complex64>,
        z: impl Into<Complex64>,
    ) -> Self {
        Self::from_xyz(x.into(), y.into(), z.into(), 0.0)
    }

    /// Creates a quantity from its rotating-frame pair at angle `theta`
    /// and its zero sequence.
    pub fn from_rotating(
        d: impl Into<Complex64>,
        q: impl Into<Complex64>,
        z: impl Into<Complex64>,
        theta: f64,
    ) -> Self {
        Self::from_dqz(d.into(), q.into(), z.into(), theta)
    }

    /// Returns a copy viewed at Park angle `theta`.
    pub fn with_theta(mut self, theta: f64) -> Self {
        self.set_theta(theta);
        self
    }

    // Recompute chains. Each one builds a complete value; callers assign it
    // to `self` in a single move.

    fn from_abc(a: Complex64, b: Complex64, c: Complex64, theta: f64) -> Self {
        trace!(target: "threephase::engine", source = "abc", theta, "recompute");
        let abc = Vector3::new(a, b, c);
        let zpn = fortescue(&abc);
        let xy = clarke(&abc);
        let dq = park(&xy, theta);
        ThreePhase {
            a,
            b,
            c,
            z: zpn[0],
            p: zpn[1],
            n: zpn[2],
            x: xy[0],
            y: xy[1],
            d: dq[0],
            q: dq[1],
            theta,
        }
    }

    fn from_zpn(z: Complex64, p: Complex64, n: Complex64, theta: f64) -> Self {
        trace!(target: "threephase::engine", source = "zpn", "recompute");
        let abc = inverse_fortescue(&Vector3::new(z, p, n));
        Self::from_abc(abc[0], abc[1], abc[2], theta)
    }

    fn from_xyz(x: Complex64, y: Complex64, z: Complex64, theta: f64) -> Self {
        trace!(target: "threephase::engine", source = "xy", "recompute");
        let abc = inverse_clarke(&Vector2::new(x, y), z);
        Self::from_abc(abc[0], abc[1], abc[2], theta)
    }

    fn from_dqz(d: Complex64, q: Complex64, z: Complex64, theta: f64) -> Self {
        trace!(target: "threephase::engine", source = "dq", theta, "recompute");
        let xy = inverse_park(&Vector2::new(d, q), theta);
        Self::from_xyz(xy[0], xy[1], z, theta)
    }

    /// Phase A value.
    pub fn a(&self) -> Complex64 {
        self.a
    }
    /// Phase B value.
    pub fn b(&self) -> Complex64 {
        self.b
    }
    /// Phase C value.
    pub fn c(&self) -> Complex64 {
        self.c
    }
    /// Zero-sequence component.
    pub fn z(&self) -> Complex64 {
        self.z
    }
    /// Positive-sequence component.
    pub fn p(&self) -> Complex64 {
        self.p
    }
    /// Negative-sequence component.
    pub fn n(&self) -> Complex64 {
        self.n
    }
    /// Clarke X (alpha) component.
    pub fn x(&self) -> Complex64 {
        self.x
    }
    /// Clarke Y (beta) component.
    pub fn y(&self) -> Complex64 {
        self.y
    }
    /// Park direct-axis component.
    pub fn d(&self) -> Complex64 {
        self.d
    }
    /// Park quadrature-axis component.
    pub fn q(&self) -> Complex64 {
        self.q
    }
    /// Park rotation angle in radians.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// Phase values as `(a, b, c)`.
    pub fn abc(&self) -> Vector3<Complex64> {
        Vector3::new(self.a, self.b, self.c)
    }

    /// Sequence components as `(z, p, n)`.
    pub fn zpn(&self) -> Vector3<Complex64> {
        Vector3::new(self.z, self.p, self.n)
    }

    /// Looks up a single component by name.
    pub fn component(&self, which: Component) -> Complex64 {
        match which {
            Component::A => self.a,
            Component::B => self.b,
            Component::C => self.c,
            Component::P => self.p,
            Component::N => self.n,
            Component::Z => self.z,
            Component::X => self.x,
            Component::Y => self.y,
            Component::D => self.d,
            Component::Q => self.q,
        }
    }

    pub fn set_a(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_abc(value.into(), self.b, self.c, self.theta);
    }
    pub fn set_b(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_abc(self.a, value.into(), self.c, self.theta);
    }
    pub fn set_c(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_abc(self.a, self.b, value.into(), self.theta);
    }
    pub fn set_z(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_zpn(value.into(), self.p, self.n, self.theta);
    }
    pub fn set_p(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_zpn(self.z, value.into(), self.n, self.theta);
    }
    pub fn set_n(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_zpn(self.z, self.p, value.into(), self.theta);
    }
    pub fn set_x(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_xyz(value.into(), self.y, self.z, self.theta);
    }
    pub fn set_y(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_xyz(self.x, value.into(), self.z, self.theta);
    }
    pub fn set_d(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_dqz(value.into(), self.q, self.z, self.theta);
    }
    pub fn set_q(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_dqz(self.d, value.into(), self.z, self.theta);
    }

    /// Changes the Park angle. Only `d` and `q` are re-derived; the phase,
    /// sequence and stationary views are untouched. Any real angle is
    /// accepted as-is, without wrapping into `[0, 2π)`.
    pub fn set_theta(&mut self, theta: f64) {
        trace!(target: "threephase::engine", source = "theta", theta, "recompute");
        let dq = park(&Vector2::new(self.x, self.y), theta);
        *self = ThreePhase {
            d: dq[0],
            q: dq[1],
            theta,
            ..*self
        };
    }

    /// Writes all three phase values in one recompute.
    pub fn set_abc(&mut self, a: impl Into<Complex64>, b: impl Into<Complex64>, c: impl Into<Complex64>) {
        *self = Self::from_abc(a.into(), b.into(), c.into(), self.theta);
    }

    /// Writes all three sequence components in one recompute.
    pub fn set_sequence(
        &mut self,
        z: impl Into<Complex64>,
        p: impl Into<Complex64>,
        n: impl Into<Complex64>,
    ) {
        *self = Self::from_zpn(z.into(), p.into(), n.into(), self.theta);
    }

    /// Writes the stationary pair in one recompute, keeping the current zero
    /// sequence.
    pub fn set_stationary(&mut self, x: impl Into<Complex64>, y: impl Into<Complex64>) {
        *self = Self::from_xyz(x.into(), y.into(), self.z, self.theta);
    }

    /// Writes the rotating pair in one recompute, keeping the current zero
    /// sequence and angle.
    pub fn set_rotating(&mut self, d: impl Into<Complex64>, q: impl Into<Complex64>) {
        *self = Self::from_dqz(d.into(), q.into(), self.z, self.theta);
    }

    /// Writes a single component by name through its matching setter.
    pub fn set_component(&mut self, which: Component, value: impl Into<Complex64>) {
        match which {
            Component::A => self.set_a(value),
            Component::B => self.set_b(value),
            Component::C => self.set_c(value),
            Component::P => self.set_p(value),
            Component::N => self.set_n(value),
            Component::Z => self.set_z(value),
            Component::X => self.set_x(value),
            Component::Y => self.set_y(value),
            Component::D => self.set_d(value),
            Component::Q => self.set_q(value),
        }
    }
}
