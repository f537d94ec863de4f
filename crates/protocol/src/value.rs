//! Metric value rendering
//!
//! Both wire protocols carry values as plain text. Integers render as
//! decimal, floats with a fixed six fractional digits, and anything
//! non-numeric degrades to the protocol default `"0"` instead of failing.

use std::fmt;

/// A reported metric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    /// Integer datapoint (counters, most gauges)
    Int(i64),
    /// Floating-point datapoint (means, rates)
    Float(f64),
    /// Non-numeric payload; renders as the protocol default
    Undefined,
}

impl Value {
    /// Whether this value carries a usable number
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Self::Undefined)
    }

    /// Wire rendering of the value
    pub fn render(&self) -> String {
        match self {
            Self::Int(n) => n.to_string(),
            Self::Float(f) if f.is_finite() => format!("{f:.6}"),
            // NaN / infinity cannot be carried by either protocol
            Self::Float(_) | Self::Undefined => "0".to_string(),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
