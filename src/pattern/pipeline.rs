//! Defect resolution, per-orientation synthesis and compositing for one run

use crate::io::error::Result;
use crate::pattern::compositor::overlay;
use crate::pattern::config::PatternConfig;
use crate::pattern::defects::{DefectMask, resolve_defects};
use crate::pattern::orientation::Orientation;
use crate::pattern::synthesis::synthesize;
use ndarray::Array2;
use rand::Rng;

/// Layer synthesized for one orientation, in the unrotated frame
#[derive(Debug, Clone)]
pub struct PatternLayer {
    /// Orientation the basis was tiled along
    pub orientation: Orientation,
    /// Dot (1) / space (0) values with shape `(height, width)`
    pub cells: Array2<u8>,
}

/// Complete output of one generation run
#[derive(Debug, Clone)]
pub struct DotSpace {
    /// Union of explicit and random defects
    pub defects: DefectMask,
    /// Positions drawn at random, ascending
    pub sampled_defects: Vec<usize>,
    /// One layer per configured orientation, in configuration order
    pub layers: Vec<PatternLayer>,
    /// OR of all layers; only produced for square grids
    pub composite: Option<Array2<u8>>,
}

impl DotSpace {
    /// Layer handed to correlation: the composite if any, else the last layer
    pub fn final_layer(&self) -> Option<&Array2<u8>> {
        self.composite
            .as_ref()
            .or_else(|| self.layers.last().map(|layer| &layer.cells))
    }

    /// Check whether the final layer has no spaces at all
    pub fn is_fully_dotted(&self) -> bool {
        self.final_layer()
            .is_some_and(|layer| layer.iter().all(|&cell| cell == 1))
    }
}

/// Run defect resolution, synthesis and compositing
///
/// The configuration is validated before anything is allocated.
///
/// # Errors
///
/// Returns an error if the configuration is invalid
pub fn generate<R: Rng + ?Sized>(config: &PatternConfig, rng: &mut R) -> Result<DotSpace> {
    config.validate()?;

    tracing::info!(
        width = config.width,
        height = config.height,
        explicit = config.unique_defects().len(),
        random = config.random_defects,
        "creating defect layer"
    );
    let resolved = resolve_defects(
        config.width,
        config.height,
        &config.defects,
        config.random_defects,
        rng,
    )?;

    let layers: Vec<PatternLayer> = config
        .orientations
        .iter()
        .map(|&orientation| {
            tracing::info!(orientation = orientation.degrees(), "creating layer");
            PatternLayer {
                orientation,
                cells: synthesize(
                    config.basis_for(orientation),
                    &resolved.mask,
                    orientation,
                    config.restart,
                ),
            }
        })
        .collect();

    let composite = if config.width == config.height {
        tracing::info!(layers = layers.len(), "overlaying layers");
        let cells: Vec<Array2<u8>> = layers.iter().map(|layer| layer.cells.clone()).collect();
        Some(overlay(&cells)?)
    } else {
        tracing::debug!("grid is not square, skipping overlay");
        None
    };

    Ok(DotSpace {
        defects: resolved.mask,
        sampled_defects: resolved.sampled,
        layers,
        composite,
    })
}
