//! Hill Climbing (HC) over Hamming neighborhoods.
//!
//! A single-solution local search on binary chromosomes. Each outer
//! iteration (a *pass*) visits the chromosomes that differ from the
//! current one in exactly one bit and moves to improving neighbors
//! (strictly lower score). The neighbor-selection rule is a
//! [`NeighborPolicy`] value, not a separate runner type.
//!
//! # References
//!
//! - Russell & Norvig (2010), *Artificial Intelligence: A Modern Approach*, ch. 4
//! - Hansen & Mladenović (2006), "First vs. best improvement: An empirical study"

mod config;
mod runner;
mod types;

pub use config::HcConfig;
pub use runner::{HcProgress, HcResult, HcRunner};
pub use types::NeighborPolicy;
