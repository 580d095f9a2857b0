//! Pattern synthesis from a repeating basis broken by defects
//!
//! This module contains:
//! - Basis motifs and their gap notation
//! - Orientations and quarter-turn rotation
//! - Defect resolution, layer synthesis and overlay
//! - The validated configuration record and run pipeline

/// Repeating dot/space motif
pub mod basis;
/// Cell-wise OR of layers
pub mod compositor;
/// Validated configuration record
pub mod config;
/// Explicit and random defect placement
pub mod defects;
/// Quarter-turn orientations and rotation
pub mod orientation;
/// End-to-end generation of defects, layers and composite
pub mod pipeline;
/// Basis tiling with defect-driven restarts
pub mod synthesis;

pub use basis::Basis;
pub use config::PatternConfig;
pub use orientation::Orientation;
pub use pipeline::{DotSpace, generate};
