//! Error types for the frame solver

use thiserror::Error;

/// Main error type for frame analysis
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Node {0} not found in model")]
    NodeNotFound(usize),

    #[error("Element {0} not found in model")]
    ElementNotFound(usize),

    #[error("Element {element} has invalid {property}: {value} (must be finite and positive)")]
    InvalidProperty {
        element: usize,
        property: &'static str,
        value: f64,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid value in {table} table at row {row}, column {column}: {message}")]
    Parse {
        table: &'static str,
        row: usize,
        column: usize,
        message: String,
    },

    #[error("Element {element} is degenerate (length {length})")]
    DegenerateElement { element: usize, length: f64 },

    #[error("Model has no free degrees of freedom")]
    NoFreeDofs,

    #[error("Model is under-restrained: {restrained} restrained DOF(s), a planar frame needs at least 3")]
    UnderRestrained { restrained: usize },

    #[error("Singular stiffness matrix - model may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FrameError {
    /// True for failures caused by missing restraints, whether caught before
    /// the solve or by the factorization itself.
    pub fn is_under_restrained(&self) -> bool {
        matches!(self, Self::UnderRestrained { .. } | Self::SingularMatrix)
    }
}

/// Result type for frame analysis
pub type FrameResult<T> = Result<T, FrameError>;
