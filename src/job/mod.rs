//! Jobs: tracked hill-climbing runs with a lifecycle.
//!
//! A [`JobSpec`] is the template every job of a batch is built from. A
//! [`Job`] moves through
//!
//! ```text
//! Pending -> Running -> Done
//!                   \-> Error
//! ```
//!
//! The `Pending -> Running` step is taken by exactly one worker
//! ([`Job::begin`]). `Done` and `Error` are final; a terminal job is
//! read-only.

mod runner;
mod spec;
mod types;

pub use runner::{Job, JobProcessor};
pub use spec::JobSpec;
pub use types::{JobId, JobOutcome, JobStatus};
