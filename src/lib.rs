//! Dot-space pattern generation and radial correlation analysis
//!
//! A repeating 1-D basis of dots and spaces is tiled across a grid. Defect cells,
//! explicit or random, restart the basis. Layers tiled along several
//! orientations are overlaid, and the result is summarised by the mean spin
//! product as a function of pair distance.

#![forbid(unsafe_code)]

/// Correlation histogram and correlation length
pub mod analysis;
/// Command-line, deck, image and report I/O plus error handling
pub mod io;
/// Basis tiling, defects, orientations and overlay
pub mod pattern;

pub use io::error::{DotSpaceError, Result};
pub use pattern::{Basis, DotSpace, Orientation, PatternConfig, generate};

#[cfg(test)]
#[path = "../tests/unit/mod.rs"]
mod unit;
