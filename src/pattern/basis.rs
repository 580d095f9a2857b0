//! Repeating dot/space motif tiled across non-defect cells

use crate::io::error::{Result, invalid_basis};
use std::fmt;

/// Non-empty sequence of dot (1) and space (0) values
///
/// The basis is walked cyclically by the synthesizer; a defect restarts the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Basis {
    values: Vec<u8>,
}

impl Basis {
    /// Build a basis from explicit 0/1 values
    ///
    /// # Errors
    ///
    /// Returns an error if `bits` is empty or holds anything other than 0 or 1
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        if bits.is_empty() {
            return Err(invalid_basis(&"basis must contain at least one value"));
        }
        if let Some(bad) = bits.iter().find(|&&bit| bit > 1) {
            return Err(invalid_basis(&format!(
                "value {bad} is not a dot (1) or space (0)"
            )));
        }
        Ok(Self {
            values: bits.to_vec(),
        })
    }

    /// Build a basis from gap notation
    ///
    /// Each digit `g` expands to one dot followed by `g - 1` spaces, so `"31"`
    /// becomes `1 0 0 1`. Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a character is not a digit in `1..=9` or no digits are given
    pub fn from_gaps(notation: &str) -> Result<Self> {
        let mut values = Vec::new();
        for ch in notation.chars().filter(|c| !c.is_whitespace()) {
            let gap = match ch.to_digit(10) {
                Some(gap @ 1..=9) => gap as usize,
                _ => {
                    return Err(invalid_basis(&format!(
                        "'{ch}' in '{notation}' is not a gap digit between 1 and 9"
                    )));
                }
            };
            values.push(1);
            values.resize(values.len() + gap - 1, 0);
        }
        Self::from_bits(&values)
    }

    /// Number of values in one period
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at `phase`, wrapping around the period
    pub fn at(&self, phase: usize) -> u8 {
        self.values
            .get(phase % self.values.len().max(1))
            .copied()
            .unwrap_or(0)
    }

    /// First value of the period
    pub fn first(&self) -> u8 {
        self.at(0)
    }

    /// Raw values of one period
    pub fn values(&self) -> &[u8] {
        &self.values
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in &self.values {
            write!(f, "{value}")?;
        }
        Ok(())
    }
}
