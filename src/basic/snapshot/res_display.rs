use std::fmt;
use tabled::Tabled;

/// A wrapper around a float that limits the number of decimal places when printed.
#[derive(Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct FloatWrapper {
    pub(crate) value: f64,
    pub(crate) precision: usize, // Number of decimal places to display
}

impl FloatWrapper {
    pub fn new(value: f64, precision: usize) -> Self {
        FloatWrapper { value, precision }
    }
}

impl fmt::Display for FloatWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1$}", self.value, self.precision)
    }
}

impl fmt::Debug for FloatWrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1$}", self.value, self.precision)
    }
}

/// Table row for a snapshot entry in rectangular form.
#[derive(Debug, Tabled)]
pub(crate) struct RectRow {
    pub(crate) key: &'static str,
    pub(crate) re: FloatWrapper,
    pub(crate) im: FloatWrapper,
}

/// Table row for a snapshot entry in polar form.
#[derive(Debug, Tabled)]
pub(crate) struct PolarRow {
    pub(crate) key: &'static str,
    pub(crate) magnitude: FloatWrapper,
    pub(crate) angle_deg: FloatWrapper, // degrees
}
