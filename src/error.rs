//! Configuration errors
//!
//! The simulation itself never fails: geometric edge cases are settled by
//! policy. Only building a board from bad numbers, or loading a config
//! file, can go wrong.

use std::fmt;

/// A board or physics configuration that cannot produce a playable board
#[derive(Clone, Debug, PartialEq)]
pub enum BoardError {
    /// The top row must hold at least one pin and there must be at least one row
    TooFewPins { top_row_pins: u32, rows: u32 },
    /// The bottom row has fewer than two pins, so there is no gap to score in
    NoSlots { bottom_row_pins: u32 },
    /// A length or rate that must be strictly positive (or is NaN)
    NonPositive { field: &'static str, value: f32 },
    /// A ratio or factor outside its allowed range
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewPins { top_row_pins, rows } => write!(
                f,
                "lattice needs at least one pin and one row: top_row_pins={top_row_pins}, rows={rows}"
            ),
            Self::NoSlots { bottom_row_pins } => write!(
                f,
                "bottom row has {bottom_row_pins} pin(s), need at least 2 for one slot"
            ),
            Self::NonPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} out of range: {value} (allowed {min}..={max})"),
        }
    }
}

impl std::error::Error for BoardError {}

/// Failure loading or saving a [`crate::SimConfig`]
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(BoardError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "config i/o failed: {e}"),
            Self::Parse(e) => write!(f, "config is not valid JSON: {e}"),
            Self::Invalid(e) => write!(f, "config rejected: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Invalid(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<BoardError> for ConfigError {
    fn from(e: BoardError) -> Self {
        Self::Invalid(e)
    }
}
