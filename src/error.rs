//! Error taxonomy.
//!
//! - [`ConstructionError`]: invalid bounds, encodings or configuration,
//!   raised synchronously before any job is enqueued.
//! - [`EvaluationError`]: the objective rejected a decoded candidate while
//!   a job was running.
//! - [`JobError`]: the terminal failure recorded on an errored job.

use thiserror::Error;

/// Failure to build a search space, chromosome, objective or config.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstructionError {
    #[error("invalid bounds: stop ({stop}) must be greater than start ({start})")]
    InvalidBounds { start: f64, stop: f64 },

    #[error("invalid precision: {0} (must be >= 0)")]
    InvalidPrecision(i32),

    #[error("invalid gene count: {bits} bits do not split into genes of {bits_per_gene} bits")]
    InvalidGeneCount { bits: usize, bits_per_gene: usize },

    #[error("gene too wide: {0} bits per gene exceeds the 63-bit decode limit")]
    GeneTooWide(usize),

    #[error("unknown objective function: {0}")]
    UnknownObjective(String),

    #[error("unknown neighbor policy: {0}")]
    UnknownPolicy(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to spawn thread: {0}")]
    Spawn(String),
}

/// Failure raised by an objective function while scoring a candidate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("{name} requires exactly {expected} variables, got {actual}")]
    Arity {
        name: String,
        expected: usize,
        actual: usize,
    },

    #[error("decode failure: {0}")]
    Decode(String),

    #[error("{name} produced a non-finite score")]
    NonFinite { name: String },
}

/// Terminal failure attached to a job in the `Error` state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum JobError {
    #[error("evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("worker failure: {0}")]
    WorkerFailure(String),
}
