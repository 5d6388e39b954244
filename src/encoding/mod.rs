//! Binary encoding of candidate solutions.
//!
//! A [`SearchSpace`] fixes a real interval and a decimal precision, which
//! together determine how many bits each gene occupies. A [`Chromosome`]
//! is an immutable bit string made of whole genes; each [`Gene`] decodes
//! to one real-valued variable.
//!
//! ```
//! use u_hillclimb::encoding::{Chromosome, SearchSpace};
//! use u_hillclimb::random::create_rng;
//!
//! let space = SearchSpace::new(-2.0, 2.0, 2).unwrap();
//! assert_eq!(space.bits_per_gene(), 9);
//!
//! let mut rng = create_rng(42);
//! let chromosome = Chromosome::random(2, space, &mut rng);
//! assert_eq!(chromosome.len(), 18);
//! assert_eq!(chromosome.decode(&space).len(), 2);
//! ```

mod chromosome;
mod space;

pub use chromosome::{Chromosome, Gene};
pub use space::SearchSpace;
