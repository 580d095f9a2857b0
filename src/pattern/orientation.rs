//! Quarter-turn orientations and counter-clockwise array rotation

use crate::io::error::{DotSpaceError, invalid_parameter};
use ndarray::{Array2, Axis};
use std::fmt;

/// One of the four right-angle views of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Orientation {
    /// Unrotated
    Deg0,
    /// One counter-clockwise quarter turn
    Deg90,
    /// Half turn
    Deg180,
    /// Three counter-clockwise quarter turns
    Deg270,
}

impl Orientation {
    /// All orientations in ascending angle
    pub const ALL: [Self; 4] = [Self::Deg0, Self::Deg90, Self::Deg180, Self::Deg270];

    /// Number of counter-clockwise quarter turns
    pub const fn quarter_turns(self) -> usize {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    /// Quarter turns that undo this orientation
    pub const fn inverse_turns(self) -> usize {
        (4 - self.quarter_turns()) % 4
    }

    /// Angle in degrees
    pub const fn degrees(self) -> u16 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }
}

impl TryFrom<u16> for Orientation {
    type Error = DotSpaceError;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            other => Err(invalid_parameter(
                "orientation",
                &other,
                &"must be one of 0, 90, 180 or 270",
            )),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Rotate a 2-D array counter-clockwise by `turns` quarter turns
///
/// One turn maps `out[i][j] = input[j][cols - 1 - i]` and swaps the shape to
/// `(cols, rows)`. Turns are taken modulo four.
pub fn rotate_quarter_turns<T: Clone>(array: &Array2<T>, turns: usize) -> Array2<T> {
    let mut rotated = array.clone();
    match turns % 4 {
        0 => {}
        1 => {
            rotated = rotated.reversed_axes();
            rotated.invert_axis(Axis(0));
        }
        2 => {
            rotated.invert_axis(Axis(0));
            rotated.invert_axis(Axis(1));
        }
        _ => {
            rotated = rotated.reversed_axes();
            rotated.invert_axis(Axis(1));
        }
    }
    rotated
}
