//! Read-only key-value exports of a [`ThreePhase`] quantity.
//!
//! A [`Snapshot`] copies the requested components out of a quantity, in
//! rectangular or polar form and under lettered (`P N Z`) or symbol
//! (`+ - 0`) keys. Taking a snapshot never mutates the source.

mod res_display;

use std::fmt;

use num_complex::Complex64;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use tabled::{Table, settings::Style};

use super::three_phase::ThreePhase;
use res_display::{FloatWrapper, PolarRow, RectRow};

/// One named component of a three-phase quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Component {
    A,
    B,
    C,
    P,
    N,
    Z,
    X,
    Y,
    D,
    Q,
}

impl Component {
    /// Every component, in export order.
    pub const ALL: [Component; 10] = [
        Component::A,
        Component::B,
        Component::C,
        Component::P,
        Component::N,
        Component::Z,
        Component::X,
        Component::Y,
        Component::D,
        Component::Q,
    ];
    pub const ABC: [Component; 3] = [Component::A, Component::B, Component::C];
    pub const DQZ: [Component; 3] = [Component::D, Component::Q, Component::Z];
    pub const XYZ: [Component; 3] = [Component::X, Component::Y, Component::Z];
    pub const PNZ: [Component; 3] = [Component::P, Component::N, Component::Z];

    /// The export key of this component under the given naming scheme.
    pub fn key(self, keys: KeyStyle) -> &'static str {
        match (self, keys) {
            (Component::P, KeyStyle::Symbols) => "+",
            (Component::N, KeyStyle::Symbols) => "-",
            (Component::Z, KeyStyle::Symbols) => "0",
            (Component::A, _) => "A",
            (Component::B, _) => "B",
            (Component::C, _) => "C",
            (Component::P, _) => "P",
            (Component::N, _) => "N",
            (Component::Z, _) => "Z",
            (Component::X, _) => "X",
            (Component::Y, _) => "Y",
            (Component::D, _) => "D",
            (Component::Q, _) => "Q",
        }
    }
}

/// Naming scheme for the sequence-component keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    /// `P`, `N`, `Z`.
    #[default]
    Letters,
    /// `+`, `-`, `0`.
    Symbols,
}

/// Numeric form of exported values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    /// Real and imaginary parts.
    #[default]
    Rectangular,
    /// Magnitude and angle in degrees.
    Polar,
}

/// Export configuration for [`ThreePhase::to_snapshot`] and friends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub form: Form,
    pub keys: KeyStyle,
}

impl ExportOptions {
    pub fn polar() -> Self {
        Self {
            form: Form::Polar,
            ..Default::default()
        }
    }

    pub fn with_keys(mut self, keys: KeyStyle) -> Self {
        self.keys = keys;
        self
    }

    pub fn with_form(mut self, form: Form) -> Self {
        self.form = form;
        self
    }
}

/// A single exported value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Rectangular(Complex64),
    Polar { magnitude: f64, angle_deg: f64 },
}

impl Value {
    fn new(v: Complex64, form: Form) -> Self {
        match form {
            Form::Rectangular => Value::Rectangular(v),
            Form::Polar => {
                let (magnitude, angle) = v.to_polar();
                Value::Polar {
                    magnitude,
                    angle_deg: angle.to_degrees(),
                }
            }
        }
    }

    /// The value as a complex number, converting back from polar form.
    pub fn to_complex(&self) -> Complex64 {
        match *self {
            Value::Rectangular(v) => v,
            Value::Polar {
                magnitude,
                angle_deg,
            } => Complex64::from_polar(magnitude, angle_deg.to_radians()),
        }
    }

    /// The value as `(magnitude, angle in degrees)`.
    pub fn to_polar_deg(&self) -> (f64, f64) {
        match *self {
            Value::Rectangular(v) => {
                let (r, a) = v.to_polar();
                (r, a.to_degrees())
            }
            Value::Polar {
                magnitude,
                angle_deg,
            } => (magnitude, angle_deg),
        }
    }
}

/// An ordered, immutable mapping from export keys to values.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    form: Form,
    entries: Vec<(&'static str, Value)>,
}

impl Snapshot {
    fn capture(t: &ThreePhase, components: &[Component], opts: ExportOptions) -> Self {
        let entries = components
            .iter()
            .map(|&which| (which.key(opts.keys), Value::new(t.component(which), opts.form)))
            .collect();
        Snapshot {
            form: opts.form,
            entries,
        }
    }

    /// Looks a value up by its export key, e.g. `"P"` or `"+"`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn form(&self) -> Form {
        self.form
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl fmt::Display for Snapshot {
    /// Renders the snapshot as a table with three decimals.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut table = match self.form {
            Form::Rectangular => Table::new(self.entries.iter().map(|(k, v)| {
                let v = v.to_complex();
                RectRow {
                    key: *k,
                    re: FloatWrapper::new(v.re, 3),
                    im: FloatWrapper::new(v.im, 3),
                }
            })),
            Form::Polar => Table::new(self.entries.iter().map(|(k, v)| {
                let (mag, deg) = v.to_polar_deg();
                PolarRow {
                    key: *k,
                    magnitude: FloatWrapper::new(mag, 3),
                    angle_deg: FloatWrapper::new(deg, 3),
                }
            })),
        };
        table.with(Style::modern());
        write!(f, "{table}")
    }
}

impl ThreePhase {
    /// All ten components.
    pub fn to_snapshot(&self, opts: ExportOptions) -> Snapshot {
        Snapshot::capture(self, &Component::ALL, opts)
    }

    /// Phase values only. Their keys are the same under both naming schemes.
    pub fn to_abc_snapshot(&self, form: Form) -> Snapshot {
        Snapshot::capture(
            self,
            &Component::ABC,
            ExportOptions::default().with_form(form),
        )
    }

    /// Rotating frame plus zero sequence.
    pub fn to_dqz_snapshot(&self, opts: ExportOptions) -> Snapshot {
        Snapshot::capture(self, &Component::DQZ, opts)
    }

    /// Stationary frame plus zero sequence.
    pub fn to_xyz_snapshot(&self, opts: ExportOptions) -> Snapshot {
        Snapshot::capture(self, &Component::XYZ, opts)
    }

    /// Sequence components.
    pub fn to_pnz_snapshot(&self, opts: ExportOptions) -> Snapshot {
        Snapshot::capture(self, &Component::PNZ, opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ThreePhase {
        ThreePhase::new(
            Complex64::new(1.0, 0.5),
            Complex64::new(-0.7, -0.2),
            Complex64::new(0.1, 0.9),
        )
        .with_theta(0.6)
    }

    #[test]
    fn test_full_snapshot_order() {
        let s = sample().to_snapshot(ExportOptions::default());
        assert_eq!(
            s.keys().collect::<Vec<_>>(),
            ["A", "B", "C", "P", "N", "Z", "X", "Y", "D", "Q"]
        );
        let s = sample().to_snapshot(ExportOptions::default().with_keys(KeyStyle::Symbols));
        assert_eq!(
            s.keys().collect::<Vec<_>>(),
            ["A", "B", "C", "+", "-", "0", "X", "Y", "D", "Q"]
        );
    }

    #[test]
    fn test_key_styles_share_values() {
        let t = sample();
        let letters = t.to_snapshot(ExportOptions::default());
        let symbols = t.to_snapshot(ExportOptions::default().with_keys(KeyStyle::Symbols));
        assert_eq!(letters.len(), symbols.len());
        for ((_, l), (_, s)) in letters.iter().zip(symbols.iter()) {
            assert_eq!(l, s);
        }
        assert_eq!(letters.get("P"), symbols.get("+"));
        assert_eq!(letters.get("N"), symbols.get("-"));
        assert_eq!(letters.get("Z"), symbols.get("0"));
        assert_eq!(letters.get("+"), None);
    }

    #[test]
    fn test_polar_matches_rectangular() {
        let t = sample();
        let rect = t.to_snapshot(ExportOptions::default());
        let polar = t.to_snapshot(ExportOptions::polar());
        assert_eq!(polar.form(), Form::Polar);
        for ((k, r), (_, p)) in rect.iter().zip(polar.iter()) {
            let Value::Rectangular(v) = *r else {
                panic!("{k} not rectangular");
            };
            let Value::Polar {
                magnitude,
                angle_deg,
            } = *p
            else {
                panic!("{k} not polar");
            };
            assert_eq!(magnitude, v.norm());
            assert_eq!(angle_deg, v.arg().to_degrees());
            assert!((p.to_complex() - v).norm() < 1e-12);
        }
    }

    #[test]
    fn test_narrow_snapshots() {
        let t = sample();
        let abc = t.to_abc_snapshot(Form::Rectangular);
        assert_eq!(abc.keys().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(abc.get("B"), Some(&Value::Rectangular(t.b())));

        let sym = ExportOptions::default().with_keys(KeyStyle::Symbols);
        assert_eq!(t.to_dqz_snapshot(sym).keys().collect::<Vec<_>>(), ["D", "Q", "0"]);
        assert_eq!(t.to_xyz_snapshot(sym).keys().collect::<Vec<_>>(), ["X", "Y", "0"]);
        assert_eq!(t.to_pnz_snapshot(sym).keys().collect::<Vec<_>>(), ["+", "-", "0"]);
        let pnz = t.to_pnz_snapshot(ExportOptions::default());
        assert_eq!(pnz.keys().collect::<Vec<_>>(), ["P", "N", "Z"]);
        assert_eq!(pnz.get("Z"), Some(&Value::Rectangular(t.z())));
        assert_eq!(
            t.to_dqz_snapshot(ExportOptions::default()).get("D"),
            Some(&Value::Rectangular(t.d()))
        );
    }

    #[test]
    fn test_snapshot_does_not_mutate() {
        let t = sample();
        let before = t;
        let _ = t.to_snapshot(ExportOptions::polar());
        let _ = t.to_xyz_snapshot(ExportOptions::default());
        assert_eq!(t, before);
    }

    #[test]
    fn test_zero_polar_angle() {
        let s = ThreePhase::default().to_abc_snapshot(Form::Polar);
        assert_eq!(s.get("A").map(Value::to_polar_deg), Some((0.0, 0.0)));
    }

    #[test]
    fn test_serialize_as_map() {
        let t = ThreePhase::new(1.0, 0.0, 0.0);
        let json = serde_json::to_value(t.to_abc_snapshot(Form::Rectangular)).unwrap();
        assert_eq!(json, serde_json::json!({"A": [1.0, 0.0], "B": [0.0, 0.0], "C": [0.0, 0.0]}));

        let json = serde_json::to_value(t.to_abc_snapshot(Form::Polar)).unwrap();
        assert_eq!(json["A"], serde_json::json!({"magnitude": 1.0, "angle_deg": 0.0}));
    }

    #[test]
    fn test_export_options_from_config() {
        let opts: ExportOptions = serde_json::from_str(r#"{"form": "polar"}"#).unwrap();
        assert_eq!(opts, ExportOptions::polar());
        let opts: ExportOptions = serde_json::from_str(r#"{"keys": "symbols"}"#).unwrap();
        assert_eq!(opts.form, Form::Rectangular);
        assert_eq!(opts.keys, KeyStyle::Symbols);
    }

    #[test]
    fn test_display_table() {
        let t = ThreePhase::new(1.0, 0.0, 0.0);
        let text = t.to_pnz_snapshot(ExportOptions::default()).to_string();
        assert!(text.contains("key"));
        assert!(text.contains("0.333"));
        let text = t.to_abc_snapshot(Form::Polar).to_string();
        assert!(text.contains("magnitude"));
        assert!(text.contains("1.000"));
    }
}
