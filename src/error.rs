use thiserror::Error;

/// Every recoverable failure a simulator command can report.
///
/// Commands validate before touching state, so an `Err` always means the
/// controller is exactly as it was before the call.
#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Invalid grid dimensions: {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("{name} out of range: {value} (expected {min}..={max})")]
    OutOfRangeParameter {
        name: &'static str,
        value: String,
        min: String,
        max: String,
    },

    #[error("{pattern} does not fit in a {rows}x{cols} grid")]
    PatternTooLarge {
        pattern: &'static str,
        rows: usize,
        cols: usize,
    },

    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    CellOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Unknown rule preset: {0}")]
    UnknownPreset(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl LifeError {
    pub(crate) fn out_of_range<T: ToString>(name: &'static str, value: T, min: T, max: T) -> Self {
        LifeError::OutOfRangeParameter {
            name,
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LifeError>;
