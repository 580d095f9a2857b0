//! Pattern constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension (width or height)
pub const MAX_GRID_DIMENSION: usize = 10_000;

// The correlation pass is quartic in grid extent; runs above this are refused up front
/// Maximum number of unordered cell pairs a correlation pass may visit
pub const MAX_CORRELATION_PAIRS: u64 = 20_000_000_000;

/// Orientations (degrees) used when none are configured
pub const DEFAULT_ORIENTATIONS: [u16; 2] = [0, 90];

// Image output settings
/// Edge length in pixels of one rendered cell
pub const DEFAULT_CELL_SCALE: u32 = 8;
/// Largest accepted cell scale
pub const MAX_CELL_SCALE: u32 = 64;
/// Largest number of pixels in one rendered layer or mask
pub const MAX_IMAGE_PIXELS: u64 = 1 << 28;
/// Width of the correlation stem plot in pixels
pub const PLOT_WIDTH: u32 = 640;
/// Height of the correlation stem plot in pixels
pub const PLOT_HEIGHT: u32 = 400;
/// Blank border around the plot area in pixels
pub const PLOT_MARGIN: u32 = 24;

// Output file naming, all prefixed with the run identity
/// Suffix of the rendered defect mask
pub const DEFECTS_SUFFIX: &str = "-defects.png";
/// Suffix of the rendered composite layer
pub const OVERLAID_SUFFIX: &str = "-overlaid.png";
/// Prefix of each rendered orientation layer, followed by the angle
pub const LAYER_SUFFIX: &str = "-layer_";
/// Suffix of the correlation stem plot
pub const CORRELATION_PLOT_SUFFIX: &str = "-corr.png";
/// Suffix of the correlation table
pub const CORRELATION_TABLE_SUFFIX: &str = "-corr.txt";
/// Suffix of the parameter record
pub const RECORD_SUFFIX: &str = ".txt";
