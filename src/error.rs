//! Error types for the elastic-constants engine

use thiserror::Error;

/// Main error type for elastic-constants operations
#[derive(Error, Debug)]
pub enum ElasticError {
    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Singular fit: {0}")]
    SingularFit(String),

    #[error("Invalid symmetry operator #{index}: {reason}")]
    InvalidSymmetryOperator { index: usize, reason: String },

    #[error("Not computed: {0}")]
    NotComputed(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Elastic tensor cannot be inverted to a compliance tensor")]
    SingularCompliance,

    #[error("Stress evaluation failed for sample {id}: {message}")]
    Evaluation { id: u64, message: String },

    #[error("Sample {0} already exists in the store")]
    DuplicateSample(u64),

    #[error("Sample {0} not found")]
    SampleNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for elastic-constants operations
pub type ElasticResult<T> = Result<T, ElasticError>;
