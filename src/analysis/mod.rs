//! Statistical analysis of generated patterns

/// Radial spin correlation histogram
pub mod correlation;
/// Correlation length derived from the histogram
pub mod length;
