//! Error types for lattice construction, energy evaluation and driving.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SpinError {
    /// Lattice dimensions are not a pair of positive integers.
    #[error("Invalid lattice dimension: {0}")]
    InvalidDimension(String),

    /// A spin, field or axis vector is not three finite real components.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// A zero-norm vector was passed where normalisation is required.
    #[error("Degenerate vector: {0}")]
    DegenerateVector(String),

    /// A driver or perturbation parameter is out of range.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SpinError>;
