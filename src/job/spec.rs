//! Template task specification.

use std::fmt;
use std::sync::Arc;

use crate::encoding::SearchSpace;
use crate::error::ConstructionError;
use crate::hc::{HcConfig, NeighborPolicy};
use crate::objective::{self, ObjectiveFunction};

/// Everything needed to build a job: objective, search space and
/// algorithm configuration. Validated once, then shared by every job of
/// a batch.
#[derive(Clone)]
pub struct JobSpec {
    objective: Arc<dyn ObjectiveFunction>,
    space: SearchSpace,
    config: HcConfig,
}

impl JobSpec {
    /// Builds a spec from already-constructed parts.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::InvalidConfig`] if `config` does not validate.
    pub fn new(
        objective: Arc<dyn ObjectiveFunction>,
        space: SearchSpace,
        config: HcConfig,
    ) -> Result<Self, ConstructionError> {
        config.validate().map_err(ConstructionError::InvalidConfig)?;
        Ok(Self {
            objective,
            space,
            config,
        })
    }

    /// Resolves an algorithm and objective by name, spanning the search
    /// space over the objective's domain.
    ///
    /// ```
    /// use u_hillclimb::hc::HcConfig;
    /// use u_hillclimb::job::JobSpec;
    ///
    /// let spec = JobSpec::from_names("HCBestImprovement", "Rastrigin", 2, HcConfig::default()).unwrap();
    /// assert_eq!(spec.objective().name(), "Rastrigin");
    /// assert!(JobSpec::from_names("HCTabu", "Rastrigin", 2, HcConfig::default()).is_err());
    /// ```
    pub fn from_names(
        algorithm: &str,
        objective_name: &str,
        precision: i32,
        config: HcConfig,
    ) -> Result<Self, ConstructionError> {
        let policy: NeighborPolicy = algorithm.parse()?;
        let objective = objective::by_name(objective_name)?;
        let space = SearchSpace::for_objective(objective.as_ref(), precision)?;
        Self::new(objective, space, config.with_policy(policy))
    }

    pub fn objective(&self) -> &dyn ObjectiveFunction {
        self.objective.as_ref()
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn config(&self) -> &HcConfig {
        &self.config
    }

    /// Copy of this spec whose run draws from `seed`.
    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            config: self.config.clone().with_seed(seed),
            ..self.clone()
        }
    }
}

impl fmt::Debug for JobSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobSpec")
            .field("objective", &self.objective.name())
            .field("space", &self.space)
            .field("config", &self.config)
            .finish()
    }
}
