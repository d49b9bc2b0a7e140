use crate::chromosome::Chromosome;

/// Scores a chromosome. Higher is better.
pub trait Challenge {
    fn score(&self, chromosome: &Chromosome) -> i64;
}
