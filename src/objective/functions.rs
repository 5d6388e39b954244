//! Classic benchmark functions.

use std::f64::consts::PI;

use super::types::ObjectiveFunction;
use crate::error::EvaluationError;

/// Rosenbrock's valley ("banana" function).
///
/// `f(x) = sum_{i=0}^{n-2} 100 (x_{i+1} - x_i^2)^2 + (1 - x_i)^2`
///
/// Finding the valley is trivial; converging inside it is not.
/// Global minimum `f(1, ..., 1) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Rosenbrock {
    domain: (f64, f64),
}

impl Rosenbrock {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            domain: (lower, upper),
        }
    }
}

impl Default for Rosenbrock {
    fn default() -> Self {
        Self::new(-2.048, 2.048)
    }
}

impl ObjectiveFunction for Rosenbrock {
    fn name(&self) -> &str {
        "Rosenbrock"
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError> {
        Ok(values
            .windows(2)
            .map(|w| 100.0 * (w[1] - w[0] * w[0]).powi(2) + (1.0 - w[0]).powi(2))
            .sum())
    }
}

/// Rastrigin's function: a sphere modulated by cosines.
///
/// `f(x) = 10 n + sum (x_i^2 - 10 cos(2 pi x_i))`
///
/// Global minimum `f(0, ..., 0) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Rastrigin {
    domain: (f64, f64),
}

impl Rastrigin {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            domain: (lower, upper),
        }
    }
}

impl Default for Rastrigin {
    fn default() -> Self {
        Self::new(-5.12, 5.12)
    }
}

impl ObjectiveFunction for Rastrigin {
    fn name(&self) -> &str {
        "Rastrigin"
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError> {
        let base = 10.0 * values.len() as f64;
        Ok(values
            .iter()
            .fold(base, |acc, x| acc + x * x - 10.0 * (2.0 * PI * x).cos()))
    }
}

/// Griewangk's function.
///
/// `f(x) = 1 + sum x_i^2 / 4000 - prod cos(x_i / sqrt(i + 1))`
///
/// Global minimum `f(0, ..., 0) = 0`.
#[derive(Debug, Clone, Copy)]
pub struct Griewangk {
    domain: (f64, f64),
}

impl Griewangk {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            domain: (lower, upper),
        }
    }
}

impl Default for Griewangk {
    fn default() -> Self {
        Self::new(-600.0, 600.0)
    }
}

impl ObjectiveFunction for Griewangk {
    fn name(&self) -> &str {
        "Griewangk"
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError> {
        let (sum, prod) = values
            .iter()
            .enumerate()
            .fold((0.0, 1.0), |(sum, prod), (i, x)| {
                (sum + x * x / 4000.0, prod * (x / ((i + 1) as f64).sqrt()).cos())
            });
        Ok(sum - prod + 1.0)
    }
}

/// Six-hump camel back function. Two variables only.
///
/// `f(x, y) = (4 - 2.1 x^2 + x^4 / 3) x^2 + x y + (-4 + 4 y^2) y^2`
///
/// Two global minima `f(0.0898, -0.7126) = f(-0.0898, 0.7126) = -1.0316`.
#[derive(Debug, Clone, Copy)]
pub struct SixHumpCamelBack {
    domain: (f64, f64),
}

impl SixHumpCamelBack {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self {
            domain: (lower, upper),
        }
    }
}

impl Default for SixHumpCamelBack {
    fn default() -> Self {
        Self::new(-2.0, 2.0)
    }
}

impl ObjectiveFunction for SixHumpCamelBack {
    fn name(&self) -> &str {
        "SixHumpCamelBack"
    }

    fn domain(&self) -> (f64, f64) {
        self.domain
    }

    fn arity(&self) -> Option<usize> {
        Some(2)
    }

    fn evaluate(&self, values: &[f64]) -> Result<f64, EvaluationError> {
        let &[x, y] = values else {
            return Err(EvaluationError::Arity {
                name: self.name().to_string(),
                expected: 2,
                actual: values.len(),
            });
        };
        let x2 = x * x;
        let y2 = y * y;
        Ok((4.0 - 2.1 * x2 + x2 * x2 / 3.0) * x2 + x * y + (-4.0 + 4.0 * y2) * y2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rosenbrock_minimum() {
        let f = Rosenbrock::default();
        assert!(f.evaluate(&[1.0, 1.0, 1.0]).unwrap().abs() < 1e-12);
        assert!(f.evaluate(&[0.0, 0.0]).unwrap() > 0.0);
        assert_eq!(f.evaluate(&[3.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_rastrigin_minimum() {
        let f = Rastrigin::default();
        assert!(f.evaluate(&[0.0, 0.0, 0.0]).unwrap().abs() < 1e-12);
        assert!(f.evaluate(&[1.5, -0.5]).unwrap() > 0.0);
    }

    #[test]
    fn test_griewangk_minimum() {
        let f = Griewangk::default();
        assert!(f.evaluate(&[0.0, 0.0]).unwrap().abs() < 1e-12);
        assert!(f.evaluate(&[100.0, -50.0]).unwrap() > 0.0);
    }

    #[test]
    fn test_camel_back_minimum() {
        let f = SixHumpCamelBack::default();
        let score = f.evaluate(&[0.0898, -0.7126]).unwrap();
        assert!((score + 1.0316).abs() < 1e-3, "got {score}");
    }

    #[test]
    fn test_camel_back_rejects_three_variables() {
        let f = SixHumpCamelBack::default();
        let err = f.evaluate(&[0.0, 0.0, 0.0]).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::Arity {
                name: "SixHumpCamelBack".into(),
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_domains() {
        assert_eq!(Rastrigin::default().domain(), (-5.12, 5.12));
        assert_eq!(Griewangk::new(-10.0, 10.0).domain(), (-10.0, 10.0));
    }
}
