//! Hill Climbing execution engine.
//!
//! # Algorithm
//!
//! 1. Draw a random chromosome and score it (evaluation #1)
//! 2. While the evaluation counter is below the budget:
//!    a. Walk the Hamming neighborhood as the policy prescribes, moving to
//!    every accepted strictly improving neighbor
//!    b. Increment the evaluation counter
//!    c. Under `BestImprovement`, stop if the pass made no move
//! 3. Return the current (best) chromosome
//!
//! Any scoring failure aborts the run and is returned to the caller.

use rand::Rng;

use super::config::HcConfig;
use super::types::NeighborPolicy;
use crate::encoding::{Chromosome, SearchSpace};
use crate::error::EvaluationError;
use crate::objective::{score_values, ObjectiveFunction};
use crate::random::{rng_from_option, shuffle};

/// Result of a Hill Climbing run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HcResult {
    /// Evaluation budget the run was configured with.
    pub max_evaluations: usize,

    /// Evaluations consumed: the initial scoring plus one per pass.
    pub evaluations_used: usize,

    /// Best chromosome found (the final current state).
    pub best: Chromosome,

    /// Score of `best`.
    pub best_score: f64,

    /// `best` decoded to real values.
    pub best_values: Vec<f64>,

    /// Number of neighborhood passes executed.
    pub passes: usize,

    /// Total neighbors scored across all passes.
    pub neighbor_evaluations: usize,

    /// Number of accepted moves.
    pub improving_moves: usize,

    /// Score after the initial evaluation and after each pass.
    pub score_history: Vec<f64>,
}

/// Snapshot of a run, reported after the initial scoring and after every
/// pass.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HcProgress {
    /// Evaluations consumed so far.
    pub evaluations_used: usize,

    /// Score of the current (best) chromosome.
    pub best_score: f64,
}

/// Executes Hill Climbing.
pub struct HcRunner;

impl HcRunner {
    /// Runs HC from a random initial chromosome.
    ///
    /// # Errors
    ///
    /// The first [`EvaluationError`] raised by the objective; the run is
    /// not retried.
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid (call [`HcConfig::validate`]
    /// first to get a descriptive error).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_hillclimb::encoding::SearchSpace;
    /// use u_hillclimb::hc::{HcConfig, HcRunner, NeighborPolicy};
    /// use u_hillclimb::objective::Rastrigin;
    ///
    /// let objective = Rastrigin::default();
    /// let space = SearchSpace::for_objective(&objective, 2).unwrap();
    /// let config = HcConfig::default()
    ///     .with_policy(NeighborPolicy::BestImprovement)
    ///     .with_seed(42);
    ///
    /// let result = HcRunner::run(&objective, &space, &config).unwrap();
    /// assert!(result.evaluations_used <= config.max_evaluations);
    /// ```
    pub fn run(
        objective: &dyn ObjectiveFunction,
        space: &SearchSpace,
        config: &HcConfig,
    ) -> Result<HcResult, EvaluationError> {
        Self::run_with_progress(objective, space, config, &mut |_| {})
    }

    /// Runs HC from a random initial chromosome, calling `on_progress`
    /// after the initial scoring and after every pass.
    ///
    /// # Errors
    ///
    /// As [`run`](Self::run).
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn run_with_progress(
        objective: &dyn ObjectiveFunction,
        space: &SearchSpace,
        config: &HcConfig,
        on_progress: &mut dyn FnMut(HcProgress),
    ) -> Result<HcResult, EvaluationError> {
        config.validate().expect("invalid HcConfig");

        let mut rng = rng_from_option(config.seed);
        let initial = Chromosome::random(config.gene_count, *space, &mut rng);
        climb(objective, space, config, initial, &mut rng, on_progress)
    }

    /// Runs HC from a given initial chromosome.
    ///
    /// `config.gene_count` is ignored; the chromosome fixes the dimension.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::Decode`] if `initial` was built for a space with
    /// a different gene width, otherwise as [`run`](Self::run).
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid.
    pub fn run_from(
        objective: &dyn ObjectiveFunction,
        space: &SearchSpace,
        config: &HcConfig,
        initial: Chromosome,
    ) -> Result<HcResult, EvaluationError> {
        config.validate().expect("invalid HcConfig");
        if initial.bits_per_gene() != space.bits_per_gene() {
            return Err(EvaluationError::Decode(format!(
                "chromosome has {}-bit genes, search space {space} expects {}",
                initial.bits_per_gene(),
                space.bits_per_gene()
            )));
        }

        let mut rng = rng_from_option(config.seed);
        climb(objective, space, config, initial, &mut rng, &mut |_| {})
    }
}

fn climb<R: Rng>(
    objective: &dyn ObjectiveFunction,
    space: &SearchSpace,
    config: &HcConfig,
    initial: Chromosome,
    rng: &mut R,
    on_progress: &mut dyn FnMut(HcProgress),
) -> Result<HcResult, EvaluationError> {
    let mut current_score = score(objective, space, &initial)?;
    let mut current = initial;
    let mut evaluations = 1usize;

    let mut passes = 0usize;
    let mut neighbor_evaluations = 0usize;
    let mut improving_moves = 0usize;
    let mut score_history = Vec::with_capacity(config.max_evaluations);
    score_history.push(current_score);
    on_progress(HcProgress {
        evaluations_used: evaluations,
        best_score: current_score,
    });

    let mut order: Vec<usize> = (0..current.len()).collect();

    while evaluations < config.max_evaluations {
        match config.policy {
            NeighborPolicy::FirstImprovement => shuffle(&mut order, rng),
            // index order, every pass
            NeighborPolicy::BestImprovement => {}
        }

        let mut move_made = false;
        for &index in &order {
            let candidate = current.flipped(index);
            let candidate_score = score(objective, space, &candidate)?;
            neighbor_evaluations += 1;

            if candidate_score < current_score {
                current = candidate;
                current_score = candidate_score;
                improving_moves += 1;
                move_made = true;
                if !config.policy.scans_full_pass() {
                    break;
                }
            }
        }

        evaluations += 1;
        passes += 1;
        score_history.push(current_score);
        on_progress(HcProgress {
            evaluations_used: evaluations,
            best_score: current_score,
        });

        if !move_made && config.policy.scans_full_pass() {
            break;
        }
    }

    let best_values = current.decode(space);
    Ok(HcResult {
        max_evaluations: config.max_evaluations,
        evaluations_used: evaluations,
        best: current,
        best_score: current_score,
        best_values,
        passes,
        neighbor_evaluations,
        improving_moves,
        score_history,
    })
}

fn score(
    objective: &dyn ObjectiveFunction,
    space: &SearchSpace,
    chromosome: &Chromosome,
) -> Result<f64, EvaluationError> {
    score_values(objective, &chromosome.decode(space))
}
