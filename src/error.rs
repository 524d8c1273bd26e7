use std::path::PathBuf;

use crate::season::SeasonIndex;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// A season lacks one of the base columns even after turnover reconciliation.
    #[error("season {season} is missing required columns: {}", missing.join(", "))]
    Schema {
        season: SeasonIndex,
        missing: Vec<String>,
    },

    #[error("season {season}, row {row}: column {column} has non-numeric value {value:?}")]
    InvalidValue {
        season: SeasonIndex,
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("no season file found for season {0}")]
    MissingSeason(SeasonIndex),

    #[error("season {season} provided twice ({first} and {second})")]
    DuplicateSeason {
        season: SeasonIndex,
        first: PathBuf,
        second: PathBuf,
    },

    /// The merger could not keep a single stable join key across seasons.
    #[error("join key drift: {0}")]
    JoinKeyDrift(String),
}
