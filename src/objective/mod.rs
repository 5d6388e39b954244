//! Objective functions scored by the search engine.
//!
//! An [`ObjectiveFunction`] maps a decoded candidate (one real per gene)
//! to a score. Lower is better. Functions that need a fixed number of
//! variables reject other inputs with [`EvaluationError::Arity`].
//!
//! Domain bounds belong to the function and are fixed at construction;
//! [`SearchSpace::for_objective`](crate::encoding::SearchSpace::for_objective)
//! turns them into a search space.
//!
//! # Built-in functions
//!
//! - [`Rosenbrock`]: narrow parabolic valley, any arity
//! - [`Rastrigin`]: highly multimodal, regularly spaced minima
//! - [`Griewangk`]: many widespread local minima
//! - [`SixHumpCamelBack`]: two variables, six local minima
//!
//! # References
//!
//! - Molga & Smutnicki (2005), "Test functions for optimization needs"

mod functions;
mod types;

pub use functions::{Griewangk, Rastrigin, Rosenbrock, SixHumpCamelBack};
pub use types::{score_values, ObjectiveFunction};

use std::sync::Arc;

use crate::error::ConstructionError;

/// Names accepted by [`by_name`].
pub const OBJECTIVE_NAMES: [&str; 4] = ["Rosenbrock", "Rastrigin", "Griewangk", "SixHumpCamelBack"];

/// Resolves a built-in objective by name, with its default domain.
///
/// # Errors
///
/// [`ConstructionError::UnknownObjective`] for names outside
/// [`OBJECTIVE_NAMES`].
pub fn by_name(name: &str) -> Result<Arc<dyn ObjectiveFunction>, ConstructionError> {
    let objective: Arc<dyn ObjectiveFunction> = match name {
        "Rosenbrock" => Arc::new(Rosenbrock::default()),
        "Rastrigin" => Arc::new(Rastrigin::default()),
        "Griewangk" => Arc::new(Griewangk::default()),
        "SixHumpCamelBack" => Arc::new(SixHumpCamelBack::default()),
        other => return Err(ConstructionError::UnknownObjective(other.to_string())),
    };
    Ok(objective)
}
