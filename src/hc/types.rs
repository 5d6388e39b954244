//! Neighbor-selection policies.

use std::fmt;
use std::str::FromStr;

use crate::error::ConstructionError;

/// How a pass walks the Hamming neighborhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NeighborPolicy {
    /// Visit flip positions in a fresh random permutation and take the
    /// first strictly improving neighbor, ending the pass.
    ///
    /// A pass without a move does not stop the search; only the
    /// evaluation budget does.
    #[default]
    FirstImprovement,

    /// Scan-all, keep-last-improving.
    ///
    /// Visit every flip position in index order. Each neighbor that
    /// improves on the *currently held* score is accepted on the spot and
    /// the scan continues from it, so the pass ends on the last improving
    /// neighbor met, which is not necessarily the single best neighbor of
    /// the starting point. A pass without a move stops the search.
    BestImprovement,
}

impl NeighborPolicy {
    /// Registry identifier.
    pub fn name(&self) -> &'static str {
        match self {
            NeighborPolicy::FirstImprovement => "HCFirstImprovement",
            NeighborPolicy::BestImprovement => "HCBestImprovement",
        }
    }

    /// Whether a pass keeps scanning after an accepted move.
    pub fn scans_full_pass(&self) -> bool {
        matches!(self, NeighborPolicy::BestImprovement)
    }
}

impl fmt::Display for NeighborPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NeighborPolicy {
    type Err = ConstructionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HCFirstImprovement" | "first" | "first-improvement" => {
                Ok(NeighborPolicy::FirstImprovement)
            }
            "HCBestImprovement" | "best" | "best-improvement" => {
                Ok(NeighborPolicy::BestImprovement)
            }
            other => Err(ConstructionError::UnknownPolicy(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(
            "HCFirstImprovement".parse::<NeighborPolicy>().unwrap(),
            NeighborPolicy::FirstImprovement
        );
        assert_eq!(
            "best".parse::<NeighborPolicy>().unwrap(),
            NeighborPolicy::BestImprovement
        );
        assert!("steepest".parse::<NeighborPolicy>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for policy in [NeighborPolicy::FirstImprovement, NeighborPolicy::BestImprovement] {
            assert_eq!(policy.to_string().parse::<NeighborPolicy>().unwrap(), policy);
        }
    }
}
