//! Metric key identity
//!
//! A `MetricKey` names one monitored value: an ordered path (e.g.
//! `["svc", "latency"]`) plus the datapoint being observed (e.g. `mean`,
//! `count`). Keys are the lookup identity for refresh timers, so they are
//! hashable and totally ordered.

use std::fmt;
use std::fmt::Write as _;

/// One segment of a metric path.
///
/// Integer segments render as decimal; symbolic names render as their
/// literal text and are carried as `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    /// Textual or symbolic path element
    Text(String),
    /// Numeric path element (e.g. a worker index)
    Int(i64),
}

impl Segment {
    /// Append this segment's string form to `out`
    fn write_to(&self, out: &mut String) {
        match self {
            Self::Text(s) => out.push_str(s),
            Self::Int(n) => {
                let _ = write!(out, "{n}");
            }
        }
    }
}

impl From<&str> for Segment {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Segment {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Segment {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Identity of a monitored value.
///
/// Two keys are equal iff their segment sequences and datapoint name are
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MetricKey {
    segments: Vec<Segment>,
    datapoint: String,
}

impl MetricKey {
    /// Build a key from path segments and a datapoint name
    pub fn new<I, S>(segments: I, datapoint: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Segment>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            datapoint: datapoint.into(),
        }
    }

    /// Path segments, in order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Datapoint name (e.g. `mean`, `count`)
    pub fn datapoint(&self) -> &str {
        &self.datapoint
    }

    /// Flatten to a single string: segments in string form joined by
    /// `sep`, datapoint appended last.
    ///
    /// Deterministic, no error cases.
    pub fn flatten(&self, sep: char) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            segment.write_to(&mut out);
            out.push(sep);
        }
        out.push_str(&self.datapoint);
        out
    }
}

impl fmt::Display for MetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.flatten(crate::GRAPHITE_KEY_SEPARATOR))
    }
}
