//! Bit-string chromosomes and their genes.

use std::fmt;

use rand::Rng;

use super::space::SearchSpace;
use crate::error::ConstructionError;

/// An immutable bit string of whole genes.
///
/// Built only through [`Chromosome::random`] or [`Chromosome::from_bits`];
/// neighbors are derived with [`Chromosome::flipped`], which returns a new
/// chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Chromosome {
    bits: Vec<bool>,
    bits_per_gene: usize,
}

/// A contiguous run of a chromosome's bits decoding to one variable.
#[derive(Debug, Clone, Copy)]
pub struct Gene<'a> {
    locus: usize,
    allele: &'a [bool],
}

impl Chromosome {
    /// Draws `gene_count` genes, each a uniform integer in
    /// `[0, 2^bits_per_gene)` written most-significant bit first.
    pub fn random<R: Rng>(gene_count: usize, space: SearchSpace, rng: &mut R) -> Self {
        let width = space.bits_per_gene();
        let mut bits = Vec::with_capacity(gene_count * width);
        for _ in 0..gene_count {
            let value = rng.random_range(0..space.gene_cardinality());
            bits.extend((0..width).rev().map(|shift| (value >> shift) & 1 == 1));
        }
        Self {
            bits,
            bits_per_gene: width,
        }
    }

    /// Wraps raw bits.
    ///
    /// # Errors
    ///
    /// [`ConstructionError::InvalidGeneCount`] if `bits` is empty or its
    /// length is not a multiple of the space's gene width.
    pub fn from_bits(bits: Vec<bool>, space: SearchSpace) -> Result<Self, ConstructionError> {
        let width = space.bits_per_gene();
        if bits.is_empty() || bits.len() % width != 0 {
            return Err(ConstructionError::InvalidGeneCount {
                bits: bits.len(),
                bits_per_gene: width,
            });
        }
        Ok(Self {
            bits,
            bits_per_gene: width,
        })
    }

    /// Total number of bits.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Width of each gene, fixed by the space the chromosome was built for.
    pub fn bits_per_gene(&self) -> usize {
        self.bits_per_gene
    }

    pub fn gene_count(&self) -> usize {
        self.bits.len() / self.bits_per_gene
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Iterates genes in locus order.
    pub fn genes(&self) -> impl Iterator<Item = Gene<'_>> {
        self.bits
            .chunks(self.bits_per_gene)
            .enumerate()
            .map(move |(i, allele)| Gene {
                locus: i * self.bits_per_gene,
                allele,
            })
    }

    /// Decodes every gene to its real value.
    pub fn decode(&self, space: &SearchSpace) -> Vec<f64> {
        self.genes().map(|gene| gene.value(space)).collect()
    }

    /// Returns the Hamming neighbor with bit `index` inverted.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.len()`.
    pub fn flipped(&self, index: usize) -> Self {
        let mut bits = self.bits.clone();
        bits[index] = !bits[index];
        Self {
            bits,
            bits_per_gene: self.bits_per_gene,
        }
    }

    /// Number of positions where `self` and `other` differ.
    pub fn hamming_distance(&self, other: &Chromosome) -> usize {
        self.bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count()
            + self.bits.len().abs_diff(other.bits.len())
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl Gene<'_> {
    /// Index of this gene's first bit in the chromosome.
    pub fn locus(&self) -> usize {
        self.locus
    }

    pub fn allele(&self) -> &[bool] {
        self.allele
    }

    /// Unsigned integer read most-significant bit first.
    pub fn raw(&self) -> u64 {
        self.allele
            .iter()
            .fold(0u64, |acc, &bit| (acc << 1) | u64::from(bit))
    }

    /// `start + raw / 10^precision`.
    pub fn value(&self, space: &SearchSpace) -> f64 {
        space.decode_value(self.raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use proptest::prelude::*;

    fn space() -> SearchSpace {
        SearchSpace::new(-2.0, 2.0, 2).unwrap()
    }

    fn bits_of(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_random_length() {
        let mut rng = create_rng(1);
        let c = Chromosome::random(2, space(), &mut rng);
        assert_eq!(c.len(), 18);
        assert_eq!(c.gene_count(), 2);
    }

    #[test]
    fn test_random_is_deterministic_per_seed() {
        let a = Chromosome::random(4, space(), &mut create_rng(9));
        let b = Chromosome::random(4, space(), &mut create_rng(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_bits_rejects_partial_gene() {
        let err = Chromosome::from_bits(vec![true; 10], space()).unwrap_err();
        assert_eq!(
            err,
            ConstructionError::InvalidGeneCount {
                bits: 10,
                bits_per_gene: 9
            }
        );
        assert!(Chromosome::from_bits(Vec::new(), space()).is_err());
    }

    #[test]
    fn test_decode_known_bits() {
        // 011001000 = 200 -> -2 + 2.00 = 0.0 ; 000000000 -> -2.0
        let c = Chromosome::from_bits(bits_of("011001000000000000"), space()).unwrap();
        let values = c.decode(&space());
        assert_eq!(values.len(), 2);
        assert!(values[0].abs() < 1e-12);
        assert!((values[1] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_genes_loci() {
        let c = Chromosome::from_bits(vec![false; 27], space()).unwrap();
        let loci: Vec<usize> = c.genes().map(|g| g.locus()).collect();
        assert_eq!(loci, vec![0, 9, 18]);
    }

    #[test]
    fn test_flipped_is_hamming_neighbor() {
        let c = Chromosome::random(3, space(), &mut create_rng(5));
        for i in 0..c.len() {
            let n = c.flipped(i);
            assert_eq!(c.hamming_distance(&n), 1);
            assert_ne!(c.bits()[i], n.bits()[i]);
        }
    }

    #[test]
    fn test_display() {
        let c = Chromosome::from_bits(bits_of("101000000"), space()).unwrap();
        assert_eq!(c.to_string(), "101000000");
    }

    proptest! {
        #[test]
        fn prop_random_has_exact_length(genes in 1usize..12, seed in any::<u64>(), precision in 0i32..4) {
            let space = SearchSpace::new(-5.12, 5.12, precision).unwrap();
            let c = Chromosome::random(genes, space, &mut create_rng(seed));
            prop_assert_eq!(c.len(), genes * space.bits_per_gene());
        }

        #[test]
        fn prop_decode_is_pure(genes in 1usize..8, seed in any::<u64>()) {
            let space = space();
            let c = Chromosome::random(genes, space, &mut create_rng(seed));
            let first = c.decode(&space);
            let second = c.decode(&space);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), genes);
            for v in first {
                prop_assert!(v >= space.start());
            }
        }
    }
}
