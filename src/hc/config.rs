//! HC configuration.

use super::types::NeighborPolicy;

/// Configuration for one Hill Climbing run.
///
/// # Examples
///
/// ```
/// use u_hillclimb::hc::{HcConfig, NeighborPolicy};
///
/// let config = HcConfig::default()
///     .with_policy(NeighborPolicy::BestImprovement)
///     .with_max_evaluations(200)
///     .with_gene_count(3)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HcConfig {
    /// Neighbor-selection policy.
    pub policy: NeighborPolicy,

    /// Evaluation budget. The initial scoring counts as the first
    /// evaluation and every pass adds one.
    pub max_evaluations: usize,

    /// Number of genes (variables) per chromosome.
    pub gene_count: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for HcConfig {
    fn default() -> Self {
        Self {
            policy: NeighborPolicy::default(),
            max_evaluations: 50,
            gene_count: 2,
            seed: None,
        }
    }
}

impl HcConfig {
    pub fn with_policy(mut self, policy: NeighborPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_evaluations(mut self, n: usize) -> Self {
        self.max_evaluations = n;
        self
    }

    pub fn with_gene_count(mut self, n: usize) -> Self {
        self.gene_count = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_evaluations == 0 {
            return Err("max_evaluations must be at least 1".into());
        }
        if self.gene_count == 0 {
            return Err("gene_count must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HcConfig::default();
        assert_eq!(config.max_evaluations, 50);
        assert_eq!(config.policy, NeighborPolicy::FirstImprovement);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_budget() {
        assert!(HcConfig::default().with_max_evaluations(0).validate().is_err());
    }

    #[test]
    fn test_validate_zero_genes() {
        assert!(HcConfig::default().with_gene_count(0).validate().is_err());
    }
}
