//! Command-line interface and run orchestration
//!
//! Settings come from an optional input deck and from flags; flags win.
//! Everything is validated before the output directory is created.

use crate::analysis::correlation::{check_correlation_budget, correlate_with_progress};
use crate::analysis::length::CorrelationLength;
use crate::io::configuration::{
    CORRELATION_PLOT_SUFFIX, CORRELATION_TABLE_SUFFIX, DEFAULT_CELL_SCALE, DEFECTS_SUFFIX,
    LAYER_SUFFIX, MAX_CELL_SCALE, OVERLAID_SUFFIX, RECORD_SUFFIX,
};
use crate::io::deck::DeckSettings;
use crate::io::error::{Result, WithPath, invalid_parameter};
use crate::io::image::{
    check_image_budget, export_correlation_plot, export_layer_png, export_mask_png,
};
use crate::io::progress::CorrelationProgress;
use crate::io::report::{RunRecord, save_correlation_table, save_run_record};
use crate::pattern::basis::Basis;
use crate::pattern::config::{PatternConfig, default_orientations};
use crate::pattern::orientation::Orientation;
use crate::pattern::pipeline::generate;
use crate::pattern::synthesis::RestartRule;
use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "dotspace")]
#[command(
    author,
    version,
    about = "Generate dot-space patterns from a repeating basis broken by defects"
)]
/// Command-line arguments for pattern generation and correlation analysis
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Input deck of KEY = value lines; flags override its values
    #[arg(value_name = "DECK")]
    pub deck: Option<PathBuf>,

    /// Identity used for the output directory and file names
    #[arg(short, long)]
    pub identity: Option<String>,

    /// Pattern width in cells
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Pattern height in cells
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Repeating basis: 1 = dot, 0 = space
    #[arg(short, long, num_args = 1.., value_parser = clap::value_parser!(u8).range(0..=1))]
    pub basis: Option<Vec<u8>>,

    /// Basis for the 90° layer (defaults to --basis)
    #[arg(long, num_args = 1.., value_parser = clap::value_parser!(u8).range(0..=1))]
    pub basis90: Option<Vec<u8>>,

    /// Basis for the 180° layer (defaults to --basis)
    #[arg(long, num_args = 1.., value_parser = clap::value_parser!(u8).range(0..=1))]
    pub basis180: Option<Vec<u8>>,

    /// Basis for the 270° layer (defaults to --basis)
    #[arg(long, num_args = 1.., value_parser = clap::value_parser!(u8).range(0..=1))]
    pub basis270: Option<Vec<u8>>,

    /// Defect positions, row-major and counted from 0
    #[arg(short, long, num_args = 1..)]
    pub defects: Option<Vec<usize>>,

    /// Number of defects placed at random on the remaining cells
    #[arg(short, long)]
    pub random: Option<usize>,

    /// Largest horizontal and vertical offset in the correlation pass
    #[arg(short = 'x', long)]
    pub cutoff: Option<usize>,

    /// Layer orientations in degrees (0, 90, 180, 270)
    #[arg(short, long, num_args = 1.., value_parser = parse_orientation)]
    pub orientations: Option<Vec<Orientation>>,

    /// Random seed; a fresh one is drawn and recorded when absent
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Defect restart rule: basis-head or dot
    #[arg(long)]
    pub restart: Option<RestartRule>,

    /// Skip the correlation pass, which otherwise runs on every invocation
    #[arg(long)]
    pub no_correlation: bool,

    /// Estimate the correlation length instead of reporting the placeholder
    #[arg(long)]
    pub estimate_length: bool,

    /// Pixels per cell in rendered images
    #[arg(long, default_value_t = DEFAULT_CELL_SCALE,
          value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CELL_SCALE)))]
    pub scale: u32,

    /// Directory in which the identity directory is created
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Reuse an existing identity directory
    #[arg(long)]
    pub overwrite: bool,

    /// Suppress progress output and informational logging
    #[arg(short, long)]
    pub quiet: bool,
}

fn parse_orientation(value: &str) -> std::result::Result<Orientation, String> {
    let degrees: u16 = value
        .parse()
        .map_err(|e| format!("'{value}' is not an angle: {e}"))?;
    Orientation::try_from(degrees).map_err(|e| e.to_string())
}

fn pick_basis(flag: Option<&Vec<u8>>, deck: Option<Basis>) -> Result<Option<Basis>> {
    match flag {
        Some(bits) => Basis::from_bits(bits).map(Some),
        None => Ok(deck),
    }
}

/// Fully merged settings for one run
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Run identity
    pub identity: String,
    /// Pattern configuration (not yet validated)
    pub config: PatternConfig,
    /// Seed if one was given
    pub seed: Option<u64>,
    /// Whether the correlation pass runs
    pub correlation: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Merge the input deck (if any) with the flags
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The deck cannot be read or parsed
    /// - Identity, width, height or basis is missing
    /// - The identity is not a plain file name
    /// - A basis given on the command line is empty
    pub fn resolve(&self) -> Result<RunSettings> {
        let deck = match &self.deck {
            Some(path) => DeckSettings::from_path(path)?,
            None => DeckSettings::default(),
        };

        let identity = self
            .identity
            .clone()
            .or(deck.identity)
            .ok_or_else(|| invalid_parameter("identity", &"", &"an identity is required"))?;
        if identity.is_empty()
            || identity.contains(['/', '\\'])
            || identity == "."
            || identity == ".."
        {
            return Err(invalid_parameter(
                "identity",
                &identity,
                &"must be a plain file name",
            ));
        }

        let width = self
            .width
            .or(deck.width)
            .ok_or_else(|| invalid_parameter("width", &"", &"a width is required"))?;
        let height = self
            .height
            .or(deck.height)
            .ok_or_else(|| invalid_parameter("height", &"", &"a height is required"))?;
        let basis = pick_basis(self.basis.as_ref(), deck.basis)?
            .ok_or_else(|| invalid_parameter("basis", &"", &"a basis is required"))?;

        let mut config = PatternConfig::new(width, height, basis);
        config.basis90 = pick_basis(self.basis90.as_ref(), deck.basis90)?;
        config.basis180 = pick_basis(self.basis180.as_ref(), deck.basis180)?;
        config.basis270 = pick_basis(self.basis270.as_ref(), deck.basis270)?;
        config.defects = self.defects.clone().or(deck.defects).unwrap_or_default();
        config.random_defects = self.random.or(deck.random_defects).unwrap_or(0);
        config.cutoff = self.cutoff.or(deck.cutoff);
        config.orientations = self
            .orientations
            .clone()
            .or(deck.orientations)
            .unwrap_or_else(default_orientations);
        config.restart = self.restart.or(deck.restart).unwrap_or_default();

        Ok(RunSettings {
            identity,
            config,
            seed: self.seed.or(deck.seed),
            correlation: !self.no_correlation && deck.correlation.unwrap_or(true),
        })
    }
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Directory holding every output file
    pub directory: PathBuf,
    /// Seed the generator was started from
    pub seed: u64,
    /// Correlation length, if correlation ran
    pub correlation: Option<CorrelationLength>,
    /// Files written, in order
    pub files: Vec<PathBuf>,
}

/// Runs one generation from parsed arguments to files on disk
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Validate, generate, render, correlate and record
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Settings are missing or invalid, or the images would be too large
    ///   (nothing is written in that case)
    /// - The output directory exists and `--overwrite` was not given
    /// - Any output file cannot be written
    pub fn run(&self) -> Result<RunOutcome> {
        let settings = self.cli.resolve()?;
        let config = &settings.config;
        config.validate()?;
        check_image_budget(config.height, config.width, self.cli.scale)?;
        if settings.correlation {
            check_correlation_budget(config.height, config.width, config.cutoff)?;
        }

        let directory = self.prepare_directory(&settings.identity)?;
        let seed = settings.seed.unwrap_or_else(|| rand::rng().random());
        tracing::info!(identity = %settings.identity, seed, "dot-space run");

        let mut rng = StdRng::seed_from_u64(seed);
        let space = generate(config, &mut rng)?;

        let mut files = Vec::new();
        let file = |suffix: &str| directory.join(format!("{}{suffix}", settings.identity));

        tracing::info!("plotting visual representation of pattern");
        let defects_path = file(DEFECTS_SUFFIX);
        export_mask_png(&space.defects.to_array(), self.cli.scale, &defects_path)?;
        files.push(defects_path);

        for layer in &space.layers {
            let path = file(&format!("{LAYER_SUFFIX}{}.png", layer.orientation.degrees()));
            export_layer_png(&layer.cells, self.cli.scale, &path)?;
            files.push(path);
        }

        if let Some(composite) = &space.composite {
            let path = file(OVERLAID_SUFFIX);
            export_layer_png(composite, self.cli.scale, &path)?;
            files.push(path);
        }

        if space.is_fully_dotted() {
            tracing::warn!("the pattern is fully dotted");
        }

        let correlation = match (settings.correlation, space.final_layer()) {
            (true, Some(layer)) => {
                tracing::info!(cutoff = ?config.cutoff, "calculating correlation");
                let progress =
                    CorrelationProgress::new(layer.nrows(), self.cli.should_show_progress());
                let histogram = correlate_with_progress(layer, config.cutoff, |rows| {
                    progress.set_rows_done(rows);
                })?;
                progress.finish();

                let table = histogram.table();
                let length = CorrelationLength::from_table(&table, self.cli.estimate_length);
                tracing::info!(%length, "correlation length");

                let plot_path = file(CORRELATION_PLOT_SUFFIX);
                export_correlation_plot(&table, &plot_path)?;
                files.push(plot_path);

                let table_path = file(CORRELATION_TABLE_SUFFIX);
                save_correlation_table(&table, &table_path)?;
                files.push(table_path);

                Some(length)
            }
            _ => None,
        };

        tracing::info!("saving data");
        let record_path = file(RECORD_SUFFIX);
        save_run_record(
            &RunRecord {
                identity: &settings.identity,
                config,
                seed,
                sampled_defects: &space.sampled_defects,
                correlation,
            },
            &record_path,
        )?;
        files.push(record_path);

        tracing::info!(directory = %directory.display(), "all done");
        Ok(RunOutcome {
            directory,
            seed,
            correlation,
            files,
        })
    }

    fn prepare_directory(&self, identity: &str) -> Result<PathBuf> {
        let directory = self.cli.output_dir.join(identity);
        if directory.exists() && !self.cli.overwrite {
            return Err(invalid_parameter(
                "identity",
                &directory.display(),
                &"output directory already exists (use --overwrite)",
            ));
        }
        create_dir(&directory)?;
        Ok(directory)
    }
}

fn create_dir(directory: &Path) -> Result<()> {
    std::fs::create_dir_all(directory).with_path(directory, "create output directory")
}
