//! Basis tiling with defect-driven phase resets
//!
//! For each orientation the defect mask is rotated into that view, the grid is
//! walked in row-major order with a cyclic phase counter, and the resulting
//! layer is rotated back so every layer shares the unrotated frame.

use crate::pattern::basis::Basis;
use crate::pattern::defects::DefectMask;
use crate::pattern::orientation::{Orientation, rotate_quarter_turns};
use ndarray::Array2;
use std::fmt;
use std::str::FromStr;

/// Value written on a defect cell and the phase the walk resumes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RestartRule {
    /// Defect cell takes `basis[0]`; the following cell continues from phase 1
    #[default]
    BasisHead,
    /// Defect cell is always a dot; the following cell starts again at phase 0
    Dot,
}

impl RestartRule {
    /// Name used on the command line and in records
    pub const fn name(self) -> &'static str {
        match self {
            Self::BasisHead => "basis-head",
            Self::Dot => "dot",
        }
    }

    const fn restart(self, basis_first: u8) -> (u8, usize) {
        match self {
            Self::BasisHead => (basis_first, 1),
            Self::Dot => (1, 0),
        }
    }
}

impl fmt::Display for RestartRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RestartRule {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basis-head" | "basis_head" | "head" => Ok(Self::BasisHead),
            "dot" => Ok(Self::Dot),
            other => Err(format!(
                "unknown restart rule '{other}' (expected 'basis-head' or 'dot')"
            )),
        }
    }
}

/// Walk cells in order, emitting basis values and restarting at defects
///
/// Returns one dot/space value per input cell.
pub fn tile_basis<I>(defects: I, basis: &Basis, rule: RestartRule) -> Vec<u8>
where
    I: IntoIterator<Item = bool>,
{
    let period = basis.len().max(1);
    let mut phase = 0;

    defects
        .into_iter()
        .map(|is_defect| {
            if is_defect {
                let (value, next_phase) = rule.restart(basis.first());
                phase = next_phase % period;
                value
            } else {
                let value = u8::from(basis.at(phase) == 1);
                phase = (phase + 1) % period;
                value
            }
        })
        .collect()
}

/// Produce one pattern layer for `orientation`
///
/// The result always has shape `(height, width)` of the mask, whatever the
/// orientation. Deterministic in its inputs.
pub fn synthesize(
    basis: &Basis,
    mask: &DefectMask,
    orientation: Orientation,
    rule: RestartRule,
) -> Array2<u8> {
    let rotated = rotate_quarter_turns(&mask.to_array(), orientation.quarter_turns());

    // Logical iteration order is row-major regardless of the rotated view's strides
    let emitted = tile_basis(rotated.iter().copied(), basis, rule);

    let mut layer = Array2::<u8>::zeros(rotated.dim());
    for (cell, value) in layer.iter_mut().zip(emitted) {
        *cell = value;
    }

    rotate_quarter_turns(&layer, orientation.inverse_turns())
}
