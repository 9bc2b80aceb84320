use std::path::PathBuf;

/// Every failure a pipeline run can surface.
///
/// Ingestion variants abort the run before any output is written. An empty
/// before/after partition is *not* an error; see `aggregate::Comparison`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No source files matching '{pattern}' in '{}'.", .dir.display())]
    SourceNotFound { dir: PathBuf, pattern: String },

    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed row in '{}' (line {line}): {message}", .file.display())]
    MalformedRow {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Invalid price '{value}' in '{}' (line {line}).", .file.display())]
    InvalidPrice {
        file: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Invalid quantity '{value}' in '{}' (line {line}).", .file.display())]
    InvalidQuantity {
        file: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Invalid date '{value}' in '{}' (line {line}). Expected YYYY-MM-DD.", .file.display())]
    InvalidDate {
        file: PathBuf,
        line: usize,
        value: String,
    },

    #[error("Sales in '{}' push the running total past the decimal range.", .file.display())]
    SalesOverflow { file: PathBuf },

    #[error("Failed to write output '{}': {source}", .path.display())]
    PersistenceFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to render summary JSON: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    /// Process exit code for this failure.
    ///
    /// - 2: input discovery / configuration
    /// - 3: row-level data validation
    /// - 4: writing output
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::SourceNotFound { .. } | AppError::Io { .. } | AppError::Config(_) => 2,
            AppError::MalformedRow { .. }
            | AppError::InvalidPrice { .. }
            | AppError::InvalidQuantity { .. }
            | AppError::InvalidDate { .. }
            | AppError::SalesOverflow { .. } => 3,
            AppError::PersistenceFailure { .. } | AppError::Serialize(_) => 4,
        }
    }
}
