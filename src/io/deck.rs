//! Input deck parsing
//!
//! A deck is a plain text file of `KEY = value` lines. Lines starting with `#`
//! and blank lines are skipped. Bases use gap notation (see
//! [`Basis::from_gaps`]); lists are whitespace separated.

use crate::io::error::{DotSpaceError, Result, WithPath};
use crate::pattern::basis::Basis;
use crate::pattern::orientation::Orientation;
use crate::pattern::synthesis::RestartRule;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Settings read from a deck; absent keys stay `None`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeckSettings {
    /// Run identity used for the output directory and file names
    pub identity: Option<String>,
    /// Number of columns
    pub width: Option<usize>,
    /// Number of rows
    pub height: Option<usize>,
    /// Base basis
    pub basis: Option<Basis>,
    /// Basis for the 90° layer
    pub basis90: Option<Basis>,
    /// Basis for the 180° layer
    pub basis180: Option<Basis>,
    /// Basis for the 270° layer
    pub basis270: Option<Basis>,
    /// Explicit defect positions
    pub defects: Option<Vec<usize>>,
    /// Number of random defects
    pub random_defects: Option<usize>,
    /// Correlation window cutoff
    pub cutoff: Option<usize>,
    /// Whether to run the correlation pass
    pub correlation: Option<bool>,
    /// Layer orientations
    pub orientations: Option<Vec<Orientation>>,
    /// Random seed
    pub seed: Option<u64>,
    /// Defect restart behavior
    pub restart: Option<RestartRule>,
}

impl DeckSettings {
    /// Read and parse a deck file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is malformed
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_path(path, "read input deck")?;
        Self::parse(&text)
    }

    /// Parse deck text
    ///
    /// Unknown keys are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error naming the line if a line has no `=` or a value is malformed
    pub fn parse(text: &str) -> Result<Self> {
        let mut settings = Self::default();

        for (number, raw) in text.lines().enumerate() {
            let line = number + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let (key, value) = trimmed.split_once('=').ok_or_else(|| DotSpaceError::DeckParse {
                line,
                reason: format!("expected KEY = value, found '{trimmed}'"),
            })?;
            let value = value.trim();

            match key.trim().to_ascii_uppercase().as_str() {
                "IDENTITY" => settings.identity = Some(value.to_string()),
                "WIDTH" => settings.width = Some(parse_number(value, line)?),
                "HEIGHT" => settings.height = Some(parse_number(value, line)?),
                "BASIS" => settings.basis = Some(parse_basis(value, line)?),
                "BASIS90" => settings.basis90 = Some(parse_basis(value, line)?),
                "BASIS180" => settings.basis180 = Some(parse_basis(value, line)?),
                "BASIS270" => settings.basis270 = Some(parse_basis(value, line)?),
                "DEFECTS" => settings.defects = Some(parse_list(value, line)?),
                "RANDOM_DEFECTS" => settings.random_defects = Some(parse_number(value, line)?),
                "CUTOFF" => settings.cutoff = Some(parse_number(value, line)?),
                "CORRELATION" => settings.correlation = Some(parse_flag(value)),
                "SEED" => settings.seed = Some(parse_number(value, line)?),
                "RESTART" => {
                    settings.restart = Some(
                        value
                            .parse()
                            .map_err(|reason| DotSpaceError::DeckParse { line, reason })?,
                    );
                }
                "ORIENTATIONS" => {
                    let degrees: Vec<u16> = parse_list(value, line)?;
                    let orientations = degrees
                        .into_iter()
                        .map(|angle| {
                            Orientation::try_from(angle).map_err(|e| DotSpaceError::DeckParse {
                                line,
                                reason: e.to_string(),
                            })
                        })
                        .collect::<Result<Vec<_>>>()?;
                    settings.orientations = Some(orientations);
                }
                other => tracing::warn!(line, key = other, "ignoring unknown input deck key"),
            }
        }

        Ok(settings)
    }
}

fn parse_number<T>(value: &str, line: usize) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e| DotSpaceError::DeckParse {
        line,
        reason: format!("'{value}' is not a valid non-negative integer: {e}"),
    })
}

fn parse_list<T>(value: &str, line: usize) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value
        .split_whitespace()
        .map(|item| parse_number(item, line))
        .collect()
}

fn parse_basis(value: &str, line: usize) -> Result<Basis> {
    Basis::from_gaps(value).map_err(|e| DotSpaceError::DeckParse {
        line,
        reason: e.to_string(),
    })
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "yes" | "true")
}
