//! Search-space bounds and gene width.

use std::fmt;

use crate::error::ConstructionError;
use crate::objective::ObjectiveFunction;

/// Widest gene whose unsigned value still fits a `u64` decode.
const MAX_BITS_PER_GENE: usize = 63;

/// Relative distance below which a domain size is treated as an integer.
const SIZE_SNAP_TOLERANCE: f64 = 1e-9;

/// A real interval `[start, stop)` sampled at `10^-precision` resolution.
///
/// The gene width is derived once at construction:
/// `bits_per_gene = ceil(log2((stop - start) * 10^precision))`, never less
/// than one bit.
///
/// Genes may encode values past `stop` when the domain size is not a power
/// of two; decoding does not clamp.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SearchSpace {
    start: f64,
    stop: f64,
    precision: u32,
    bits_per_gene: usize,
}

impl SearchSpace {
    /// Builds a search space.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::InvalidBounds`] if `stop <= start` (or either
    /// bound is NaN), [`ConstructionError::InvalidPrecision`] if
    /// `precision < 0`, [`ConstructionError::GeneTooWide`] if the domain
    /// needs more than 63 bits per gene.
    pub fn new(start: f64, stop: f64, precision: i32) -> Result<Self, ConstructionError> {
        if !(stop > start) || !start.is_finite() || !stop.is_finite() {
            return Err(ConstructionError::InvalidBounds { start, stop });
        }
        if precision < 0 {
            return Err(ConstructionError::InvalidPrecision(precision));
        }
        let precision = precision as u32;

        let size = (stop - start) * 10f64.powi(precision as i32);
        // 4.4 - 2.8 = 1.6000000000000005, which must still count as 16 values
        let size = if (size - size.round()).abs() <= SIZE_SNAP_TOLERANCE * size {
            size.round()
        } else {
            size
        };
        let bits = size.log2().ceil();
        let bits_per_gene = if bits.is_finite() && bits >= 1.0 {
            bits as usize
        } else if bits.is_infinite() && bits > 0.0 {
            usize::MAX
        } else {
            1
        };
        if bits_per_gene > MAX_BITS_PER_GENE {
            return Err(ConstructionError::GeneTooWide(bits_per_gene));
        }

        Ok(Self {
            start,
            stop,
            precision,
            bits_per_gene,
        })
    }

    /// Builds the search space spanning an objective's domain.
    pub fn for_objective(
        objective: &dyn ObjectiveFunction,
        precision: i32,
    ) -> Result<Self, ConstructionError> {
        let (start, stop) = objective.domain();
        Self::new(start, stop, precision)
    }

    /// Lower bound; the value decoded from an all-zero gene.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Upper bound.
    pub fn stop(&self) -> f64 {
        self.stop
    }

    /// Number of decimal digits kept by decoding.
    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Number of bits in each gene.
    pub fn bits_per_gene(&self) -> usize {
        self.bits_per_gene
    }

    /// Number of distinct values a gene can hold (`2^bits_per_gene`).
    pub fn gene_cardinality(&self) -> u64 {
        1u64 << self.bits_per_gene
    }

    /// Maps an unsigned gene value to its real value.
    pub fn decode_value(&self, raw: u64) -> f64 {
        self.start + raw as f64 / 10f64.powi(self.precision as i32)
    }
}

impl fmt::Display for SearchSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}] @ 1e-{} ({} bits/gene)",
            self.start, self.stop, self.precision, self.bits_per_gene
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bits_per_gene_example() {
        // 4 * 10^2 = 400 values -> ceil(log2(400)) = 9
        let space = SearchSpace::new(-2.0, 2.0, 2).unwrap();
        assert_eq!(space.bits_per_gene(), 9);
        assert_eq!(space.gene_cardinality(), 512);
    }

    #[test]
    fn test_power_of_two_domain() {
        let space = SearchSpace::new(0.0, 256.0, 0).unwrap();
        assert_eq!(space.bits_per_gene(), 8);
    }

    #[test]
    fn test_offset_power_of_two_domains() {
        // (stop - start) carries rounding error; the gene must not widen
        assert_eq!(SearchSpace::new(2.8, 4.4, 1).unwrap().bits_per_gene(), 4);
        assert_eq!(SearchSpace::new(-2.7, -2.3, 1).unwrap().bits_per_gene(), 2);
        assert_eq!(SearchSpace::new(-3.0, -2.84, 2).unwrap().bits_per_gene(), 4);
    }

    #[test]
    fn test_fractional_size_still_rounds_up() {
        // 2.5 values -> 2 bits
        assert_eq!(SearchSpace::new(0.0, 2.5, 0).unwrap().bits_per_gene(), 2);
    }

    #[test]
    fn test_tiny_domain_has_one_bit() {
        let space = SearchSpace::new(0.0, 0.5, 0).unwrap();
        assert_eq!(space.bits_per_gene(), 1);
        let space = SearchSpace::new(0.0, 1.0, 0).unwrap();
        assert_eq!(space.bits_per_gene(), 1);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        assert!(matches!(
            SearchSpace::new(2.0, 2.0, 2),
            Err(ConstructionError::InvalidBounds { .. })
        ));
        assert!(matches!(
            SearchSpace::new(3.0, -1.0, 0),
            Err(ConstructionError::InvalidBounds { .. })
        ));
        assert!(SearchSpace::new(f64::NAN, 1.0, 0).is_err());
    }

    #[test]
    fn test_rejects_negative_precision() {
        assert_eq!(
            SearchSpace::new(0.0, 1.0, -1),
            Err(ConstructionError::InvalidPrecision(-1))
        );
    }

    #[test]
    fn test_rejects_too_wide_gene() {
        assert!(matches!(
            SearchSpace::new(0.0, 1.0, 30),
            Err(ConstructionError::GeneTooWide(_))
        ));
    }

    #[test]
    fn test_decode_value() {
        let space = SearchSpace::new(-2.0, 2.0, 2).unwrap();
        assert!((space.decode_value(0) + 2.0).abs() < 1e-12);
        assert!((space.decode_value(200) - 0.0).abs() < 1e-12);
        assert!((space.decode_value(399) - 1.99).abs() < 1e-12);
    }

    #[test]
    fn test_for_objective() {
        let camel = crate::objective::SixHumpCamelBack::default();
        let space = SearchSpace::for_objective(&camel, 2).unwrap();
        assert_eq!(space, SearchSpace::new(-2.0, 2.0, 2).unwrap());
    }

    proptest! {
        #[test]
        fn prop_bits_per_gene_formula(
            start in -100.0f64..100.0,
            values in 1u64..=(1 << 20),
            precision in 0i32..4,
        ) {
            let stop = start + values as f64 / 10f64.powi(precision);
            let space = SearchSpace::new(start, stop, precision).unwrap();
            // ceil(log2(values)) in integer arithmetic, at least 1
            let expected = if values <= 2 {
                1
            } else {
                (u64::BITS - (values - 1).leading_zeros()) as usize
            };
            prop_assert_eq!(space.bits_per_gene(), expected);
        }
    }
}
