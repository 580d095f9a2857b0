//! Plain-text correlation table and run parameter record

use crate::analysis::correlation::CorrelationRow;
use crate::analysis::length::CorrelationLength;
use crate::io::error::{Result, WithPath};
use crate::pattern::config::PatternConfig;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Everything needed to reproduce a run, written as `key : value` lines
#[derive(Debug, Clone)]
pub struct RunRecord<'a> {
    /// Run identity
    pub identity: &'a str,
    /// Configuration the run used
    pub config: &'a PatternConfig,
    /// Seed of the random generator
    pub seed: u64,
    /// Positions drawn at random
    pub sampled_defects: &'a [usize],
    /// Correlation length, if correlation ran
    pub correlation: Option<CorrelationLength>,
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Write the correlation table: squared distance, distance, rho, count
///
/// Bins without pairs print `undefined` in the rho column.
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_correlation_table<W: Write>(rows: &[CorrelationRow], out: &mut W) -> Result<()> {
    writeln!(out, "# r2 distance rho count")?;
    for row in rows {
        match row.rho {
            Some(rho) => writeln!(
                out,
                "{} {:.6} {rho:.6} {}",
                row.r2, row.distance, row.count
            )?,
            None => writeln!(out, "{} {:.6} undefined {}", row.r2, row.distance, row.count)?,
        }
    }
    Ok(())
}

/// Write the run record
///
/// # Errors
///
/// Returns an error if the writer fails
pub fn write_run_record<W: Write>(record: &RunRecord<'_>, out: &mut W) -> Result<()> {
    let config = record.config;
    let orientations: Vec<u16> = config.orientations.iter().map(|o| o.degrees()).collect();

    writeln!(out, "identity : {}", record.identity)?;
    writeln!(out, "width : {}", config.width)?;
    writeln!(out, "height : {}", config.height)?;
    writeln!(out, "basis : {}", config.basis)?;
    for orientation in &config.orientations {
        if orientation.quarter_turns() > 0 {
            writeln!(
                out,
                "basis{} : {}",
                orientation.degrees(),
                config.basis_for(*orientation)
            )?;
        }
    }
    writeln!(out, "defects : {}", join(&config.defects))?;
    writeln!(out, "random : {}", config.random_defects)?;
    writeln!(out, "random_numbers : {}", join(record.sampled_defects))?;
    writeln!(out, "seed : {}", record.seed)?;
    writeln!(out, "orientations : {}", join(&orientations))?;
    match config.cutoff {
        Some(cutoff) => writeln!(out, "cutoff : {cutoff}")?,
        None => writeln!(out, "cutoff : none")?,
    }
    writeln!(out, "restart : {}", config.restart)?;
    if let Some(length) = record.correlation {
        writeln!(out, "correlation : {length}")?;
    }
    Ok(())
}

/// Save the correlation table to a file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save_correlation_table(rows: &[CorrelationRow], path: &Path) -> Result<()> {
    let file = File::create(path).with_path(path, "create correlation table")?;
    let mut out = BufWriter::new(file);
    write_correlation_table(rows, &mut out)?;
    out.flush().with_path(path, "write correlation table")
}

/// Save the run record to a file
///
/// # Errors
///
/// Returns an error if the file cannot be created or written
pub fn save_run_record(record: &RunRecord<'_>, path: &Path) -> Result<()> {
    let file = File::create(path).with_path(path, "create run record")?;
    let mut out = BufWriter::new(file);
    write_run_record(record, &mut out)?;
    out.flush().with_path(path, "write run record")
}
