use thiserror::Error;

/// Structural failures of the pipeline. Row-level problems are not errors;
/// see [`crate::data::model::RowWarning`].
#[derive(Debug, Error)]
pub enum Error {
    /// Nothing to work with: an empty file, a blank header line, or an empty
    /// series map handed to an exporter.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// One or more required columns are absent from the header row.
    #[error("missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// The header row itself could not be decoded.
    #[error("reading CSV header: {0}")]
    Csv(#[from] csv::Error),

    #[error("serializing series: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
