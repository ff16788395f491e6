//! Wye/Delta conversion of a three-branch impedance network.

use num_complex::Complex64;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use super::error::{Result, TransformError};

/// How the Delta→Wye chain forms the branch-sum denominator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeltaSum {
    /// `za + zb + zc`, the textbook equivalence.
    #[default]
    Standard,
    /// `za + 2·zb`. Kept for parity with results produced by earlier
    /// tooling; it does not invert the Wye→Delta chain.
    Legacy,
}

impl DeltaSum {
    fn apply(self, za: Complex64, zb: Complex64, zc: Complex64) -> Complex64 {
        match self {
            DeltaSum::Standard => za + zb + zc,
            DeltaSum::Legacy => za + zb + zb,
        }
    }
}

/// Converter configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WyeDeltaConfig {
    pub delta_sum: DeltaSum,
}

/// A three-impedance network held in both Wye (`z1, z2, z3`) and Delta
/// (`za, zb, zc`) form.
///
/// `za` is the Delta branch opposite Wye branch `z1`, and likewise for the
/// other two. Writing a Wye branch re-derives the Delta side and vice versa.
///
/// A zero Wye branch (or a zero Delta sum) is not trapped by the setters:
/// complex division propagates infinities or NaN and a warning is logged.
/// Use [`try_from_wye`](Self::try_from_wye), [`try_from_delta`](Self::try_from_delta)
/// or [`validate`](Self::validate) to get an error instead.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "archive",
    derive(Serialize, Deserialize),
    serde(from = "NetworkRecord", into = "NetworkRecord")
)]
pub struct WyeDelta {
    z1: Complex64,
    z2: Complex64,
    z3: Complex64,
    za: Complex64,
    zb: Complex64,
    zc: Complex64,
    config: WyeDeltaConfig,
}

/// Serialized form of [`WyeDelta`]: the Wye side and the configuration.
#[cfg(feature = "archive")]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct NetworkRecord {
    z1: Complex64,
    z2: Complex64,
    z3: Complex64,
    #[serde(default)]
    config: WyeDeltaConfig,
}

#[cfg(feature = "archive")]
impl From<NetworkRecord> for WyeDelta {
    fn from(r: NetworkRecord) -> Self {
        WyeDelta::from_wye(r.z1, r.z2, r.z3, r.config)
    }
}

#[cfg(feature = "archive")]
impl From<WyeDelta> for NetworkRecord {
    fn from(n: WyeDelta) -> Self {
        NetworkRecord {
            z1: n.z1,
            z2: n.z2,
            z3: n.z3,
            config: n.config,
        }
    }
}

fn is_finite(v: Complex64) -> bool {
    v.re.is_finite() && v.im.is_finite()
}

impl Default for WyeDelta {
    /// All-zero Wye branches. The Delta side is NaN, as for any network with
    /// a zero Wye branch.
    fn default() -> Self {
        Self::new(Complex64::zero(), Complex64::zero(), Complex64::zero())
    }
}

impl WyeDelta {
    /// Creates a network from its Wye branches with the default configuration.
    pub fn new(z1: impl Into<Complex64>, z2: impl Into<Complex64>, z3: impl Into<Complex64>) -> Self {
        Self::from_wye(z1.into(), z2.into(), z3.into(), WyeDeltaConfig::default())
    }

    /// Creates a network from its Delta branches with the default configuration.
    pub fn from_delta_branches(
        za: impl Into<Complex64>,
        zb: impl Into<Complex64>,
        zc: impl Into<Complex64>,
    ) -> Self {
        Self::from_delta(za.into(), zb.into(), zc.into(), WyeDeltaConfig::default())
    }

    /// Creates a network from Wye branches, failing on a zero branch or a
    /// non-finite Delta result.
    pub fn try_from_wye(z1: Complex64, z2: Complex64, z3: Complex64, config: WyeDeltaConfig) -> Result<Self> {
        if let Some(i) = [z1, z2, z3].iter().position(|z| z.is_zero()) {
            return Err(TransformError::Degenerate(format!("wye branch z{} is zero", i + 1)));
        }
        let net = Self::from_wye(z1, z2, z3, config);
        net.validate()?;
        Ok(net)
    }

    /// Creates a network from Delta branches, failing on a zero branch sum or
    /// a non-finite Wye result.
    pub fn try_from_delta(za: Complex64, zb: Complex64, zc: Complex64, config: WyeDeltaConfig) -> Result<Self> {
        if config.delta_sum.apply(za, zb, zc).is_zero() {
            return Err(TransformError::Degenerate(format!(
                "delta branch sum is zero ({:?})",
                config.delta_sum
            )));
        }
        let net = Self::from_delta(za, zb, zc, config);
        net.validate()?;
        Ok(net)
    }

    /// Wye→Delta chain.
    pub fn from_wye(z1: Complex64, z2: Complex64, z3: Complex64, config: WyeDeltaConfig) -> Self {
        trace!(target: "threephase::engine", source = "wye", "recompute");
        let zp = z1 * z2 + z2 * z3 + z1 * z3;
        let net = WyeDelta {
            z1,
            z2,
            z3,
            za: zp / z1,
            zb: zp / z2,
            zc: zp / z3,
            config,
        };
        net.warn_degenerate();
        net
    }

    /// Delta→Wye chain.
    pub fn from_delta(za: Complex64, zb: Complex64, zc: Complex64, config: WyeDeltaConfig) -> Self {
        trace!(target: "threephase::engine", source = "delta", sum = ?config.delta_sum, "recompute");
        let zsum = config.delta_sum.apply(za, zb, zc);
        let net = WyeDelta {
            z1: (zb * zc) / zsum,
            z2: (za * zc) / zsum,
            z3: (za * zb) / zsum,
            za,
            zb,
            zc,
            config,
        };
        net.warn_degenerate();
        net
    }

    fn warn_degenerate(&self) {
        if !self.is_finite() {
            warn!(
                target: "threephase::engine",
                z1 = %self.z1, z2 = %self.z2, z3 = %self.z3,
                za = %self.za, zb = %self.zb, zc = %self.zc,
                "wye/delta conversion produced non-finite impedances"
            );
        }
    }

    /// Whether every branch on both sides is finite.
    pub fn is_finite(&self) -> bool {
        self.wye().iter().chain(self.delta().iter()).all(|&z| is_finite(z))
    }

    /// Returns an error if any branch is infinite or NaN.
    pub fn validate(&self) -> Result<()> {
        let names = ["z1", "z2", "z3", "za", "zb", "zc"];
        let values = self.wye().into_iter().chain(self.delta());
        match names.iter().zip(values).find(|(_, z)| !is_finite(*z)) {
            Some((name, z)) => Err(TransformError::Degenerate(format!("{name} is not finite ({z})"))),
            None => Ok(()),
        }
    }

    pub fn config(&self) -> WyeDeltaConfig {
        self.config
    }

    /// Wye branches `[z1, z2, z3]`.
    pub fn wye(&self) -> [Complex64; 3] {
        [self.z1, self.z2, self.z3]
    }

    /// Delta branches `[za, zb, zc]`.
    pub fn delta(&self) -> [Complex64; 3] {
        [self.za, self.zb, self.zc]
    }

    pub fn z1(&self) -> Complex64 {
        self.z1
    }
    pub fn z2(&self) -> Complex64 {
        self.z2
    }
    pub fn z3(&self) -> Complex64 {
        self.z3
    }
    pub fn za(&self) -> Complex64 {
        self.za
    }
    pub fn zb(&self) -> Complex64 {
        self.zb
    }
    pub fn zc(&self) -> Complex64 {
        self.zc
    }

    pub fn set_z1(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_wye(value.into(), self.z2, self.z3, self.config);
    }
    pub fn set_z2(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_wye(self.z1, value.into(), self.z3, self.config);
    }
    pub fn set_z3(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_wye(self.z1, self.z2, value.into(), self.config);
    }
    pub fn set_za(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_delta(value.into(), self.zb, self.zc, self.config);
    }
    pub fn set_zb(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_delta(self.za, value.into(), self.zc, self.config);
    }
    pub fn set_zc(&mut self, value: impl Into<Complex64>) {
        *self = Self::from_delta(self.za, self.zb, value.into(), self.config);
    }

    /// Writes all three Wye branches in one recompute.
    pub fn set_wye(&mut self, z1: impl Into<Complex64>, z2: impl Into<Complex64>, z3: impl Into<Complex64>) {
        *self = Self::from_wye(z1.into(), z2.into(), z3.into(), self.config);
    }

    /// Writes all three Delta branches in one recompute.
    pub fn set_delta(&mut self, za: impl Into<Complex64>, zb: impl Into<Complex64>, zc: impl Into<Complex64>) {
        *self = Self::from_delta(za.into(), zb.into(), zc.into(), self.config);
    }
}
