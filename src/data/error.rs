use thiserror::Error;

/// Reasons a listing file is rejected at load time.
///
/// All of these are fatal: the viewer refuses to start on a dataset it
/// cannot trust rather than showing partial data.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: '{value}' in column '{column}' is not a number")]
    InvalidNumber {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: {column} {value} is outside the allowed range {min}..={max}")]
    OutOfRange {
        row: usize,
        column: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
