use thiserror::Error;

/// Errors surfaced at the public boundaries of the compression pipeline.
///
/// All variants are raised eagerly when a call is made, never retried
/// internally. Degenerate numeric cases (constant columns, zero entropy)
/// are valid results, not errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// transform/encode/decode called before the corresponding fit.
    #[error("{0} not fitted. Call fit() first.")]
    NotFitted(&'static str),

    /// A configuration parameter is out of range; the message names it.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Input width differs from the width seen at fit time.
    #[error("Number of features in X ({actual}) doesn't match training data ({expected})")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Malformed vector passed to fingerprint generation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;
