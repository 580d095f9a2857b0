//! Radial spin-spin correlation of a binary pattern
//!
//! Cells are mapped to spins (space = -1, dot = +1) and every unordered pair of
//! cells whose offset fits the window contributes the product of its spins to a
//! histogram bin keyed by squared distance `dx² + dy²`. Here `dx` runs along
//! rows and `dy` along columns.
//!
//! A pair is counted from the cell that comes first in row-major order, which
//! is the same as visiting only offsets with `dx > 0`, or `dx == 0 && dy >= 0`.
//! Self pairs (`dx == dy == 0`) appear once per cell.

use crate::io::configuration::MAX_CORRELATION_PAIRS;
use crate::io::error::{Result, invalid_parameter};
use ndarray::{Array1, Array2};

/// Map dot/space values to spins, leaving the input untouched
pub fn spin_field(layer: &Array2<u8>) -> Array2<i8> {
    layer.mapv(|cell| if cell == 0 { -1 } else { 1 })
}

/// Largest |dx| and |dy| visited for a layer of `rows x cols`
pub fn offset_limits(rows: usize, cols: usize, cutoff: Option<usize>) -> (usize, usize) {
    let max_dx = rows.saturating_sub(1);
    let max_dy = cols.saturating_sub(1);
    cutoff.map_or((max_dx, max_dy), |limit| {
        (max_dx.min(limit), max_dy.min(limit))
    })
}

// Sum of (n - d) for d in 0..=m, with m < n
fn span_sum(n: u64, m: u64) -> u64 {
    (m + 1).saturating_mul(n).saturating_sub(m * (m + 1) / 2)
}

/// Number of unordered pairs (self pairs included) a pass will visit
pub fn pair_count(rows: usize, cols: usize, cutoff: Option<usize>) -> u64 {
    let (max_dx, max_dy) = offset_limits(rows, cols, cutoff);
    let (rows, cols) = (rows as u64, cols as u64);
    let (max_dx, max_dy) = (max_dx as u64, max_dy as u64);

    // Same-row partners at dy >= 0, plus later rows at any dy
    let forward_cols = span_sum(cols, max_dy);
    let both_cols = (2 * forward_cols).saturating_sub(cols);
    let later_rows = span_sum(rows, max_dx).saturating_sub(rows);

    rows.saturating_mul(forward_cols)
        .saturating_add(later_rows.saturating_mul(both_cols))
}

/// Refuse correlation passes that would visit more than `MAX_CORRELATION_PAIRS`
///
/// # Errors
///
/// Returns an error if the estimated pair count is above the limit
pub fn check_correlation_budget(rows: usize, cols: usize, cutoff: Option<usize>) -> Result<()> {
    let pairs = pair_count(rows, cols, cutoff);
    if pairs > MAX_CORRELATION_PAIRS {
        return Err(invalid_parameter(
            "cutoff",
            &cutoff.map_or_else(|| "none".to_string(), |c| c.to_string()),
            &format!(
                "correlation would visit {pairs} pairs (limit {MAX_CORRELATION_PAIRS}); set a smaller cutoff"
            ),
        ));
    }
    Ok(())
}

/// One row of the correlation table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationRow {
    /// Squared distance `dx² + dy²`
    pub r2: usize,
    /// Euclidean distance `sqrt(r2)`
    pub distance: f64,
    /// Mean spin product; `None` when no pair has this squared distance
    pub rho: Option<f64>,
    /// Number of pairs accumulated in the bin
    pub count: u64,
}

/// Accumulated spin products and pair counts per squared distance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationHistogram {
    /// Sum of spin products per bin
    pub total: Array1<i64>,
    /// Number of pairs per bin
    pub count: Array1<u64>,
}

impl CorrelationHistogram {
    fn zeros(bins: usize) -> Self {
        Self {
            total: Array1::zeros(bins),
            count: Array1::zeros(bins),
        }
    }

    fn accumulate(&mut self, r2: usize, product: i64) {
        if let (Some(total), Some(count)) = (self.total.get_mut(r2), self.count.get_mut(r2)) {
            *total += product;
            *count += 1;
        }
    }

    /// Number of bins, `max_dx² + max_dy² + 1`
    pub fn bins(&self) -> usize {
        self.count.len()
    }

    /// Mean spin product of a bin, undefined for empty or missing bins
    pub fn rho(&self, r2: usize) -> Option<f64> {
        match (self.total.get(r2), self.count.get(r2)) {
            (Some(&total), Some(&count)) if count > 0 => Some(total as f64 / count as f64),
            _ => None,
        }
    }

    /// Every bin as a table row, including empty ones
    pub fn table(&self) -> Vec<CorrelationRow> {
        (0..self.bins())
            .map(|r2| CorrelationRow {
                r2,
                distance: (r2 as f64).sqrt(),
                rho: self.rho(r2),
                count: self.count.get(r2).copied().unwrap_or(0),
            })
            .collect()
    }
}

/// Compute the radial correlation histogram of a layer
///
/// # Errors
///
/// Returns an error if the layer is empty or the cutoff is zero
pub fn correlate(layer: &Array2<u8>, cutoff: Option<usize>) -> Result<CorrelationHistogram> {
    correlate_with_progress(layer, cutoff, |_| {})
}

/// Compute the radial correlation histogram, reporting each finished origin row
///
/// `on_row` receives the number of origin rows completed so far.
///
/// # Errors
///
/// Returns an error if the layer is empty or the cutoff is zero
pub fn correlate_with_progress<F>(
    layer: &Array2<u8>,
    cutoff: Option<usize>,
    mut on_row: F,
) -> Result<CorrelationHistogram>
where
    F: FnMut(usize),
{
    let (rows, cols) = layer.dim();
    if rows == 0 || cols == 0 {
        return Err(invalid_parameter(
            "layer",
            &format!("{rows}x{cols}"),
            &"correlation needs a non-empty layer",
        ));
    }
    if cutoff == Some(0) {
        return Err(invalid_parameter("cutoff", &0, &"cutoff must be positive"));
    }

    let spins = spin_field(layer);
    let (max_dx, max_dy) = offset_limits(rows, cols, cutoff);
    let mut histogram = CorrelationHistogram::zeros(max_dx * max_dx + max_dy * max_dy + 1);

    for x in 0..rows {
        for y in 0..cols {
            let Some(&origin) = spins.get((x, y)) else {
                continue;
            };
            let origin = i64::from(origin);

            // Partners on the same row, at or after the origin
            for (dy, &partner) in spins
                .row(x)
                .iter()
                .enumerate()
                .skip(y)
                .take(max_dy + 1)
                .map(|(col, spin)| (col - y, spin))
            {
                histogram.accumulate(dy * dy, origin * i64::from(partner));
            }

            // Partners on later rows, either side of the origin column
            let col_start = y.saturating_sub(max_dy);
            let col_end = (y + max_dy + 1).min(cols);
            for dx in 1..=max_dx.min(rows - 1 - x) {
                for partner_col in col_start..col_end {
                    if let Some(&partner) = spins.get((x + dx, partner_col)) {
                        let dy = partner_col.abs_diff(y);
                        histogram.accumulate(dx * dx + dy * dy, origin * i64::from(partner));
                    }
                }
            }
        }
        on_row(x + 1);
    }

    Ok(histogram)
}
