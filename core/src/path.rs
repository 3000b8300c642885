//! Dotted-path extraction from parsed JSON responses.
//!
//! A path such as `data.results.0.title` is split on `.`. A segment made only
//! of ASCII digits selects an array element; any other segment, including the
//! empty one, selects an object field. There is no escaping: a key that
//! contains a dot cannot be addressed, and an all-digit segment is always an
//! index, so an object key named `"0"` is unreachable.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

/// One step of a `JsonPath`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Index(usize),
    Key(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            // Indices past usize::MAX can never be in range.
            Segment::Index(raw.parse().unwrap_or(usize::MAX))
        } else {
            Segment::Key(raw.to_string())
        }
    }

    fn select<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        match (self, value) {
            (Segment::Index(i), Value::Array(items)) => items.get(*i),
            (Segment::Key(k), Value::Object(map)) => map.get(k),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(i) => write!(f, "{i}"),
            Segment::Key(k) => f.write_str(k),
        }
    }
}

/// A parsed dotted path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonPath {
    segments: Vec<Segment>,
}

impl JsonPath {
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('.').map(Segment::parse).collect(),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Walk `value` along this path.
    ///
    /// Returns `None` as soon as a segment does not fit the current value.
    /// A present JSON `null` comes back as `Some(&Value::Null)`.
    pub fn extract<'a>(&self, value: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(value, |current, segment| segment.select(current))
    }
}

impl FromStr for JsonPath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(JsonPath::parse(s))
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

/// Extract the value addressed by `path`, or `None` if it does not exist.
pub fn extract_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    JsonPath::parse(path).extract(value)
}
