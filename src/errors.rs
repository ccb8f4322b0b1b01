use schema::TrainerFlags;
use thiserror::Error;

/// Errors raised while loading or resolving the static data tables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    /// A RON table failed to parse
    #[error("Malformed {table} data: {message}")]
    Parse { table: &'static str, message: String },
    /// A table refers to a species name that is not in the species table
    #[error("Unknown species '{name}' referenced by {context}")]
    UnknownSpecies { name: String, context: String },
    /// Two species entries share a name
    #[error("Duplicate species entry: {0}")]
    DuplicateSpecies(String),
    /// A table that must have entries is empty
    #[error("The {0} table is empty")]
    EmptyTable(&'static str),
    /// A settings file could not be read
    #[error("Could not read {path}: {message}")]
    Io { path: String, message: String },
}

/// Errors raised by trainer selection and party generation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The trainer id does not index the trainer catalog
    #[error("Unknown trainer id: {0}")]
    UnknownTrainer(u16),
    /// No trainer in the catalog matches the requested flags, even with an empty history
    #[error("No trainer matches include {include:?} / exclude {exclude:?}")]
    NoEligibleTrainer {
        include: TrainerFlags,
        exclude: TrainerFlags,
    },
    /// The run has no rival but one was required
    #[error("No rival has been chosen for this run")]
    NoRival,
    /// Underlying data error
    #[error("Data error: {0}")]
    Data(#[from] DataError),
}

/// Convenience type alias for data loading results
pub type DataResult<T> = Result<T, DataError>;

/// Convenience type alias for generation results
pub type GenerationResult<T> = Result<T, GenerationError>;
