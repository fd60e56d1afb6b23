//! Multiplication fact generation
//!
//! Practice and stage modes pin the first operand to the current times
//! table; challenge mode draws both operands.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single multiplication fact. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub multiplier_a: u8,
    pub multiplier_b: u8,
}

impl Problem {
    pub fn new(multiplier_a: u8, multiplier_b: u8) -> Self {
        Self {
            multiplier_a,
            multiplier_b,
        }
    }

    /// Generate a fact from the given random source.
    ///
    /// With `fixed_operand` (practice/stage mode) the first operand is
    /// pinned and the second is uniform in [1,9]. Without it (challenge
    /// mode) the first operand is uniform in [2,9], the second in [1,9].
    pub fn generate<R: Rng>(rng: &mut R, fixed_operand: Option<u8>) -> Self {
        let multiplier_a = match fixed_operand {
            Some(stage) => stage,
            None => rng.random_range(2..=9),
        };
        let multiplier_b = rng.random_range(1..=9);
        Self {
            multiplier_a,
            multiplier_b,
        }
    }

    /// The product the player must type
    pub fn answer(&self) -> u32 {
        u32::from(self.multiplier_a) * u32::from(self.multiplier_b)
    }

    /// Stable key for statistics ("3x4")
    pub fn key(&self) -> String {
        format!("{}x{}", self.multiplier_a, self.multiplier_b)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.multiplier_a, self.multiplier_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_fixed_operand_is_pinned() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..50 {
            let p = Problem::generate(&mut rng, Some(3));
            assert_eq!(p.multiplier_a, 3);
            assert!((1..=9).contains(&p.multiplier_b));
        }
    }

    #[test]
    fn test_challenge_operand_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..200 {
            let p = Problem::generate(&mut rng, None);
            assert!((2..=9).contains(&p.multiplier_a));
            assert!((1..=9).contains(&p.multiplier_b));
        }
    }

    #[test]
    fn test_answer_and_display() {
        let p = Problem::new(7, 8);
        assert_eq!(p.answer(), 56);
        assert_eq!(p.to_string(), "7 × 8");
        assert_eq!(p.key(), "7x8");
    }
}
