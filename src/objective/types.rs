//! Core trait for objective functions.

use crate::error::EvaluationError;

/// Scores a decoded candidate solution.
///
/// The engine minimizes: lower scores are better. For maximization,
/// negate the score.
///
/// # Examples
///
/// ```
/// use u_hillclimb::error::EvaluationError;
/// use u_hillclimb::objective::ObjectiveFunction;
///
/// struct Sphere;
///
/// impl ObjectiveFunction for Sphere {
///     fn name(&self) -> &str { "Sphere" }
///     fn domain(&self) -> (f64, f64) { (-5.0, 5.0) }
///     fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError> {
///         Ok(values.iter().map(|x| x * x).sum())
///     }
/// }
///
/// assert_eq!(Sphere.evaluate(&[1.0, 2.0]).unwrap(), 5.0);
/// ```
pub trait ObjectiveFunction: Send + Sync {
    /// Display name, also used by the registry.
    fn name(&self) -> &str;

    /// Inclusive lower and upper bound of each variable.
    fn domain(&self) -> (f64, f64);

    /// Required number of variables, if fixed.
    fn arity(&self) -> Option<usize> {
        None
    }

    /// Computes the score of `values`.
    ///
    /// # Errors
    ///
    /// [`EvaluationError::Arity`] when `values.len()` does not match
    /// [`arity`](Self::arity).
    fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError>;
}

/// Checks arity, evaluates and rejects non-finite scores.
pub fn score_values(
    objective: &dyn ObjectiveFunction,
    values: &[f64],
) -> Result<f64, EvaluationError> {
    if let Some(expected) = objective.arity() {
        if values.len() != expected {
            return Err(EvaluationError::Arity {
                name: objective.name().to_string(),
                expected,
                actual: values.len(),
            });
        }
    }
    let score = objective.evaluate(values)?;
    if !score.is_finite() {
        return Err(EvaluationError::NonFinite {
            name: objective.name().to_string(),
        });
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair;

    impl ObjectiveFunction for Pair {
        fn name(&self) -> &str {
            "Pair"
        }
        fn domain(&self) -> (f64, f64) {
            (0.0, 1.0)
        }
        fn arity(&self) -> Option<usize> {
            Some(2)
        }
        fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError> {
            Ok(values[0] / values[1])
        }
    }

    #[test]
    fn test_score_values_checks_arity_first() {
        let err = score_values(&Pair, &[1.0]).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::Arity {
                name: "Pair".into(),
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_score_values_rejects_non_finite() {
        let err = score_values(&Pair, &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, EvaluationError::NonFinite { .. }));
        assert_eq!(score_values(&Pair, &[1.0, 2.0]).unwrap(), 0.5);
    }
}
