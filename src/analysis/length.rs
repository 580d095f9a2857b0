//! Correlation length reported alongside the histogram

use crate::analysis::correlation::CorrelationRow;
use std::fmt;

/// Fixed value reported when no estimate is requested
pub const PLACEHOLDER_CORRELATION_LENGTH: u64 = 301_249_135;

/// Correlation length as reported in the run record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CorrelationLength {
    /// Fixed placeholder; not derived from the data
    Placeholder,
    /// Distance at which the mean spin product first drops to zero
    FirstZeroCrossing(f64),
    /// An estimate was requested but the correlation never reaches zero
    Undetermined,
}

impl CorrelationLength {
    /// Estimate from a table, or the placeholder when `estimate` is false
    pub fn from_table(rows: &[CorrelationRow], estimate: bool) -> Self {
        if !estimate {
            return Self::Placeholder;
        }
        estimate_first_zero_crossing(rows).map_or(Self::Undetermined, Self::FirstZeroCrossing)
    }
}

impl fmt::Display for CorrelationLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Placeholder => write!(f, "{PLACEHOLDER_CORRELATION_LENGTH}"),
            Self::FirstZeroCrossing(length) => write!(f, "{length:.6}"),
            Self::Undetermined => f.write_str("undetermined"),
        }
    }
}

/// Distance where `rho` first falls to zero or below
///
/// Only bins with a defined `rho` take part. The crossing is interpolated
/// linearly between the last positive bin and the first non-positive one.
/// Returns `None` if `rho` never becomes non-positive.
pub fn estimate_first_zero_crossing(rows: &[CorrelationRow]) -> Option<f64> {
    let mut previous: Option<(f64, f64)> = None;

    for row in rows {
        let Some(rho) = row.rho else {
            continue;
        };
        if rho <= 0.0 {
            return Some(match previous {
                Some((distance, prev_rho)) if prev_rho > rho => {
                    distance + (row.distance - distance) * prev_rho / (prev_rho - rho)
                }
                _ => row.distance,
            });
        }
        previous = Some((row.distance, rho));
    }

    None
}
