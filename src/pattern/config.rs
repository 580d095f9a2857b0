//! Validated pattern configuration record

use crate::io::configuration::{DEFAULT_ORIENTATIONS, MAX_GRID_DIMENSION};
use crate::io::error::{DotSpaceError, Result, invalid_parameter};
use crate::pattern::basis::Basis;
use crate::pattern::orientation::Orientation;
use crate::pattern::synthesis::RestartRule;
use std::collections::BTreeSet;

/// Everything the synthesizer and correlation engine need for one run
#[derive(Debug, Clone)]
pub struct PatternConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
    /// Basis used for 0° and for any orientation without its own basis
    pub basis: Basis,
    /// Basis for the 90° layer
    pub basis90: Option<Basis>,
    /// Basis for the 180° layer
    pub basis180: Option<Basis>,
    /// Basis for the 270° layer
    pub basis270: Option<Basis>,
    /// Explicit flattened defect positions (row-major, 0-based)
    pub defects: Vec<usize>,
    /// Number of extra defects drawn at random
    pub random_defects: usize,
    /// Layers to produce, in order
    pub orientations: Vec<Orientation>,
    /// Largest |dx| and |dy| considered by the correlation pass
    pub cutoff: Option<usize>,
    /// Defect restart behavior
    pub restart: RestartRule,
}

impl PatternConfig {
    /// Configuration with default orientations, no defects and no cutoff
    pub fn new(width: usize, height: usize, basis: Basis) -> Self {
        Self {
            width,
            height,
            basis,
            basis90: None,
            basis180: None,
            basis270: None,
            defects: Vec::new(),
            random_defects: 0,
            orientations: default_orientations(),
            cutoff: None,
            restart: RestartRule::default(),
        }
    }

    /// Total number of grid cells
    pub const fn cells(&self) -> usize {
        self.width * self.height
    }

    /// Basis for an orientation, falling back to the base basis
    pub fn basis_for(&self, orientation: Orientation) -> &Basis {
        let specific = match orientation {
            Orientation::Deg0 => None,
            Orientation::Deg90 => self.basis90.as_ref(),
            Orientation::Deg180 => self.basis180.as_ref(),
            Orientation::Deg270 => self.basis270.as_ref(),
        };
        specific.unwrap_or(&self.basis)
    }

    /// Explicit defects with duplicates removed
    pub fn unique_defects(&self) -> BTreeSet<usize> {
        self.defects.iter().copied().collect()
    }

    /// Check every configuration constraint before any allocation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Width or height is zero or above `MAX_GRID_DIMENSION`
    /// - Any basis in use is longer than the cell count
    /// - An explicit defect lies outside the grid
    /// - More random defects are requested than free cells remain
    /// - No orientations are requested
    /// - The cutoff is zero
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let cells = self.cells();

        if self.orientations.is_empty() {
            return Err(invalid_parameter(
                "orientations",
                &"[]",
                &"at least one orientation is required",
            ));
        }

        let bases = std::iter::once(&self.basis).chain(
            self.orientations
                .iter()
                .map(|&orientation| self.basis_for(orientation)),
        );
        for basis in bases {
            if basis.len() > cells {
                return Err(invalid_parameter(
                    "basis",
                    basis,
                    &format!("basis length {} exceeds {cells} cells", basis.len()),
                ));
            }
        }

        if let Some(&index) = self.defects.iter().find(|&&index| index >= cells) {
            return Err(DotSpaceError::DefectOutOfBounds { index, cells });
        }

        let available = cells - self.unique_defects().len();
        if self.random_defects > available {
            return Err(DotSpaceError::InsufficientCells {
                requested: self.random_defects,
                available,
            });
        }

        if self.cutoff == Some(0) {
            return Err(invalid_parameter("cutoff", &0, &"cutoff must be positive"));
        }

        Ok(())
    }
}

/// Orientations used when none are configured
pub fn default_orientations() -> Vec<Orientation> {
    DEFAULT_ORIENTATIONS
        .iter()
        .filter_map(|&degrees| Orientation::try_from(degrees).ok())
        .collect()
}
