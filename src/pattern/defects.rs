//! Defect resolution: explicit positions merged with randomly sampled ones
//!
//! The mask is stored as a flat row-major bitset. Random positions are drawn
//! uniformly without replacement from the cells not already marked explicitly,
//! using only the generator handed in by the caller.

use crate::io::error::{DotSpaceError, Result, invalid_parameter};
use bitvec::prelude::*;
use ndarray::Array2;
use rand::Rng;
use rand::seq::index;

/// Immutable set of defect cells over a `height x width` grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefectMask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl DefectMask {
    /// Mask with no defects
    pub fn empty(width: usize, height: usize) -> Self {
        Self {
            bits: bitvec![0; width * height],
            width,
            height,
        }
    }

    /// Mask with exactly the given flattened positions marked
    ///
    /// # Errors
    ///
    /// Returns an error if any position is outside the grid
    pub fn from_positions(width: usize, height: usize, positions: &[usize]) -> Result<Self> {
        let mut mask = Self::empty(width, height);
        for &position in positions {
            mask.mark(position)?;
        }
        Ok(mask)
    }

    fn mark(&mut self, position: usize) -> Result<()> {
        if position >= self.bits.len() {
            return Err(DotSpaceError::DefectOutOfBounds {
                index: position,
                cells: self.bits.len(),
            });
        }
        self.bits.set(position, true);
        Ok(())
    }

    /// Grid width (columns)
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height (rows)
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub fn cells(&self) -> usize {
        self.bits.len()
    }

    /// Test whether the flattened position is a defect
    pub fn is_defect(&self, position: usize) -> bool {
        self.bits.get(position).as_deref() == Some(&true)
    }

    /// Number of defect cells
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Flattened defect positions in ascending order
    pub fn positions(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Two-dimensional `(height, width)` view of the mask
    pub fn to_array(&self) -> Array2<bool> {
        Array2::from_shape_fn((self.height, self.width), |(row, col)| {
            self.is_defect(row * self.width + col)
        })
    }
}

/// Defect mask together with the positions that were drawn at random
#[derive(Clone, Debug)]
pub struct ResolvedDefects {
    /// Union of explicit and sampled defects
    pub mask: DefectMask,
    /// Randomly sampled positions, ascending, disjoint from the explicit ones
    pub sampled: Vec<usize>,
}

/// Merge explicit defects with `random_count` positions sampled from the remaining cells
///
/// Duplicate explicit positions are collapsed.
///
/// # Errors
///
/// Returns an error if:
/// - The grid has no cells
/// - An explicit position is outside the grid
/// - `random_count` exceeds the number of cells left after the explicit defects
pub fn resolve_defects<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    explicit: &[usize],
    random_count: usize,
    rng: &mut R,
) -> Result<ResolvedDefects> {
    if width == 0 || height == 0 {
        return Err(invalid_parameter(
            "dimensions",
            &format!("{width}x{height}"),
            &"width and height must be positive",
        ));
    }

    let mut mask = DefectMask::from_positions(width, height, explicit)?;

    let free: Vec<usize> = mask.bits.iter_zeros().collect();
    if random_count > free.len() {
        return Err(DotSpaceError::InsufficientCells {
            requested: random_count,
            available: free.len(),
        });
    }

    let mut sampled: Vec<usize> = index::sample(rng, free.len(), random_count)
        .iter()
        .filter_map(|slot| free.get(slot).copied())
        .collect();
    sampled.sort_unstable();

    for &position in &sampled {
        mask.mark(position)?;
    }

    Ok(ResolvedDefects { mask, sampled })
}
