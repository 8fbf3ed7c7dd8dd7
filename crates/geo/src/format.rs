//! Display formatting for distances.
//!
//! | distance (km)   | shown as                         |
//! |-----------------|----------------------------------|
//! | `< 1`           | the text "less than 1"           |
//! | `1 ..< 100`     | number, one decimal place        |
//! | `>= 100`        | whole number with digit grouping |

use serde::{Serialize, Serializer};
use std::fmt;

/// Text shown for distances under one kilometer.
pub const LESS_THAN_ONE: &str = "less than 1";

const DECIMAL_BAND_END: f64 = 100.0;

/// A distance ready for display.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayValue {
    /// Under one unit; rendered as text, never as a number
    LessThanOne,
    /// Rounded to one decimal place
    Decimal(f64),
    /// Rounded to a whole number and digit-grouped
    Grouped(String),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::LessThanOne => f.write_str(LESS_THAN_ONE),
            DisplayValue::Decimal(value) if value.fract() == 0.0 => write!(f, "{value:.0}"),
            DisplayValue::Decimal(value) => write!(f, "{value:.1}"),
            DisplayValue::Grouped(text) => f.write_str(text),
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            DisplayValue::Decimal(value) => serializer.serialize_f64(*value),
            other => serializer.collect_str(other),
        }
    }
}

/// Number formatting rules for the grouped band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberFormat {
    /// Inserted between each group of three digits
    pub grouping_separator: String,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            grouping_separator: ",".to_string(),
        }
    }
}

impl NumberFormat {
    /// Creates a format with the given grouping separator.
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            grouping_separator: separator.into(),
        }
    }

    /// Classifies and rounds a distance for display.
    pub fn format(&self, distance_km: f64) -> DisplayValue {
        if distance_km < 1.0 {
            DisplayValue::LessThanOne
        } else if distance_km < DECIMAL_BAND_END {
            DisplayValue::Decimal(round_tenths(distance_km))
        } else {
            DisplayValue::Grouped(self.group_digits(distance_km.round() as u128))
        }
    }

    fn group_digits(&self, value: u128) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 * self.grouping_separator.len());

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push_str(&self.grouping_separator);
            }
            out.push(ch);
        }

        out
    }
}

/// Rounds to one decimal place, half away from zero, using the exact binary
/// value: `1.45` is stored just below 1.45 and becomes `1.4`, while `2.25`
/// is exact and becomes `2.3`.
fn round_tenths(value: f64) -> f64 {
    // Below 2^53 every fractional part fits in 52 decimal places, so this
    // prints the stored value without rounding.
    let exact = format!("{:.52}", value.abs());
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits = fraction.bytes().map(|b| u64::from(b - b'0'));
    let tenths_digit = digits.next().unwrap_or(0);
    let next_digit = digits.next().unwrap_or(0);

    let mut tenths = whole.parse::<u64>().unwrap_or(0) * 10 + tenths_digit;
    if next_digit >= 5 {
        tenths += 1;
    }

    (tenths as f64 / 10.0).copysign(value)
}

/// Formats a distance using `,` digit grouping.
///
/// # Example
/// ```
/// use placefinder_geo::{format_distance, DisplayValue};
///
/// assert_eq!(format_distance(0.4), DisplayValue::LessThanOne);
/// assert_eq!(format_distance(12.34), DisplayValue::Decimal(12.3));
/// assert_eq!(format_distance(20015.08).to_string(), "20,015");
/// ```
pub fn format_distance(distance_km: f64) -> DisplayValue {
    NumberFormat::default().format(distance_km)
}
