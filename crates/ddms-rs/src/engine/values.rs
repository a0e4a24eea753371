// crates/ddms-rs/src/engine/values.rs

//! Scalar value types shared by components.

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A finite `f64` with bitwise equality and hashing, so components holding
/// coordinates can derive `Eq` and `Hash`.
#[derive(Debug, Clone, Copy)]
pub struct Double(f64);

impl Double {
    pub fn new(value: f64) -> Self {
        // Collapse -0.0 so equal values hash equally.
        Self(if value == 0.0 { 0.0 } else { value })
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl From<f64> for Double {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl PartialEq for Double {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Double {}

impl Hash for Double {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Double {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Shortest representation that round-trips.
        write!(f, "{}", self.0)
    }
}

/// Granularity of a [`DateValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePrecision {
    /// `xs:gYear`, e.g. `2024`
    Year,
    /// `xs:gYearMonth`, e.g. `2024-03`
    YearMonth,
    /// `xs:date`, e.g. `2024-03-15`
    Date,
    /// `xs:dateTime`, e.g. `2024-03-15T10:30:00.5Z`
    DateTime,
}

/// A date in one of the XML Schema lexical forms DDMS accepts, each with an
/// optional `Z` or `±hh:mm` offset. The lexical form is kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateValue {
    lexical: String,
    precision: DatePrecision,
}

impl DateValue {
    /// Returns `None` if `value` matches none of the accepted patterns.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        let body = strip_offset(value)?;
        let bytes = body.as_bytes();
        if bytes.len() < 4 || !bytes[..4].iter().all(u8::is_ascii_digit) {
            return None;
        }

        let precision = match bytes.len() {
            4 => DatePrecision::Year,
            7 if bytes[4] == b'-' && body.get(5..7).is_some_and(is_month) => DatePrecision::YearMonth,
            10 if NaiveDate::parse_from_str(body, "%Y-%m-%d").is_ok() => DatePrecision::Date,
            n if n >= 19 && bytes[10] == b'T' => {
                let format = if body.contains('.') {
                    "%Y-%m-%dT%H:%M:%S%.f"
                } else {
                    "%Y-%m-%dT%H:%M:%S"
                };
                NaiveDateTime::parse_from_str(body, format).ok()?;
                DatePrecision::DateTime
            }
            _ => return None,
        };

        Some(Self {
            lexical: value.to_string(),
            precision,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.lexical
    }

    pub fn precision(&self) -> DatePrecision {
        self.precision
    }
}

impl fmt::Display for DateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexical)
    }
}

/// Strips a trailing timezone designator. Returns `None` for a malformed offset.
fn strip_offset(value: &str) -> Option<&str> {
    if let Some(body) = value.strip_suffix('Z') {
        return Some(body);
    }
    // A tail that starts inside a multi-byte character is not an offset.
    if let Some(tail) = value.len().checked_sub(6).and_then(|at| value.get(at..)) {
        let t = tail.as_bytes();
        if (t[0] == b'+' || t[0] == b'-') && t[3] == b':' {
            let hours: u8 = tail[1..3].parse().ok()?;
            let minutes: u8 = tail[4..6].parse().ok()?;
            if hours > 14 || minutes > 59 {
                return None;
            }
            return Some(&value[..value.len() - 6]);
        }
    }
    Some(value)
}

fn is_month(s: &str) -> bool {
    matches!(s.parse::<u8>(), Ok(1..=12)) && s.len() == 2
}
