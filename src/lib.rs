//! Parallel binary hill climbing.
//!
//! Runs batches of independent Hill Climbing searches over fixed-point
//! binary encodings of real-valued variables, each batch spread across a
//! supervised pool of worker threads.
//!
//! - [`encoding`]: search spaces and bit-string chromosomes
//! - [`objective`]: the scoring contract and built-in benchmark functions
//! - [`hc`]: the first/best-improvement engine
//! - [`job`]: tracked runs with a `Pending -> Running -> Done | Error` lifecycle
//! - [`pool`]: task queue, cancellation and the self-healing worker supervisor
//! - [`orchestrator`]: batch submission, polling and reporting
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use u_hillclimb::hc::HcConfig;
//! use u_hillclimb::job::JobSpec;
//! use u_hillclimb::orchestrator::{ComputeOutcome, Orchestrator, OrchestratorConfig};
//!
//! let spec = JobSpec::from_names(
//!     "HCFirstImprovement",
//!     "SixHumpCamelBack",
//!     2,
//!     HcConfig::default().with_seed(42),
//! )
//! .unwrap();
//! let config = OrchestratorConfig::default().with_retry_interval(Duration::from_millis(10));
//! let mut orchestrator = Orchestrator::new(config, spec).unwrap();
//!
//! if let ComputeOutcome::Completed(report) = orchestrator.compute(5).unwrap() {
//!     println!("{}", report.rendered);
//! }
//! ```

pub mod encoding;
pub mod error;
pub mod hc;
pub mod job;
pub mod objective;
pub mod orchestrator;
pub mod pool;
pub mod random;
