//! # Ranker
//!
//! Ranking happens in two steps. Every worker first sorts its own partition of the
//! current generation in place by [`rank_order`]. Then a single worker merges the
//! sorted runs left to right: the already-merged prefix `[0, boundary)` is merged
//! with the next run `[boundary, next_boundary)` until the whole buffer is ordered.
//!
//! The merge moves individuals through one scratch buffer owned by the [`Ranker`],
//! which is reused for every merge of the run.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::individual::Individual;
//! use knapsack_evolve::partition::tiling;
//! use knapsack_evolve::ranking::{sort_shard, Ranker};
//!
//! let mut population: Vec<Individual> = (0..6)
//!     .map(|index| {
//!         let mut ind = Individual::blank(6, index);
//!         ind.fitness = (index as i64 * 7) % 5;
//!         ind
//!     })
//!     .collect();
//!
//! let runs = tiling(2, population.len());
//! for run in &runs {
//!     sort_shard(&mut population[run.range()]);
//! }
//!
//! let mut ranker = Ranker::new();
//! ranker.merge_runs(&mut population, &runs);
//!
//! let fitness: Vec<i64> = population.iter().map(|ind| ind.fitness).collect();
//! assert_eq!(fitness, vec![4, 3, 2, 1, 0, 0]);
//! ```

use std::cmp::Ordering;

use crate::individual::{rank_order, Individual};
use crate::partition::Partition;

/// Sorts one worker's shard in place.
pub fn sort_shard(shard: &mut [Individual]) {
    shard.sort_unstable_by(rank_order);
}

/// Sequential merger of pre-sorted, contiguous runs.
#[derive(Debug, Default)]
pub struct Ranker {
    scratch: Vec<Individual>,
}

impl Ranker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scratch space reserved for a population of `size` individuals.
    pub fn with_capacity(size: usize) -> Self {
        Self {
            scratch: Vec::with_capacity(size),
        }
    }

    /// Merges `runs` of `population` into one ordered sequence.
    ///
    /// `runs` must tile a prefix of `population` in order, each run already
    /// sorted by [`rank_order`]. Empty runs are skipped.
    pub fn merge_runs(&mut self, population: &mut [Individual], runs: &[Partition]) {
        let mut boundary = match runs.first() {
            Some(first) => first.stop,
            None => return,
        };

        for run in &runs[1..] {
            debug_assert_eq!(run.start, boundary, "runs must be contiguous");
            if !run.is_empty() {
                self.merge(&mut population[..run.stop], boundary);
            }
            boundary = run.stop;
        }
    }

    /// Two-pointer merge of `buffer[..mid]` and `buffer[mid..]`. On ties the left
    /// element goes first.
    fn merge(&mut self, buffer: &mut [Individual], mid: usize) {
        self.scratch.clear();
        self.scratch.extend(buffer.iter_mut().map(std::mem::take));

        let (left, right) = self.scratch.split_at_mut(mid);
        let (mut a, mut b) = (0, 0);

        for slot in buffer.iter_mut() {
            let take_left = b == right.len()
                || (a < left.len() && rank_order(&left[a], &right[b]) != Ordering::Greater);
            if take_left {
                *slot = std::mem::take(&mut left[a]);
                a += 1;
            } else {
                *slot = std::mem::take(&mut right[b]);
                b += 1;
            }
        }
    }
}

/// Orders a whole population in one pass.
pub fn rank_all(population: &mut [Individual]) {
    population.sort_by(rank_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::partition::tiling;

    fn population(len: usize) -> Vec<Individual> {
        (0..len)
            .map(|index| {
                let mut ind = Individual::blank(len, index);
                // A spread of fitness ties and popcount ties.
                ind.fitness = ((index * 37) % 7) as i64;
                for bit in 0..(index * 13) % 4 {
                    ind.chromosome.set(bit, true);
                }
                ind
            })
            .collect()
    }

    #[test]
    fn test_merge_matches_global_sort() {
        for len in [0usize, 1, 2, 7, 10, 23, 40] {
            let mut expected = population(len);
            rank_all(&mut expected);

            for workers in 1..=9 {
                let mut merged = population(len);
                let runs = tiling(workers, len);
                for run in &runs {
                    sort_shard(&mut merged[run.range()]);
                }
                Ranker::with_capacity(len).merge_runs(&mut merged, &runs);
                assert_eq!(merged, expected, "len {} workers {}", len, workers);
            }
        }
    }

    #[test]
    fn test_result_is_ordered() {
        let mut merged = population(30);
        let runs = tiling(4, 30);
        for run in &runs {
            sort_shard(&mut merged[run.range()]);
        }
        let mut ranker = Ranker::new();
        ranker.merge_runs(&mut merged, &runs);

        for pair in merged.windows(2) {
            assert_eq!(rank_order(&pair[0], &pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn test_scratch_is_reused() {
        let mut ranker = Ranker::with_capacity(20);
        let mut merged = population(20);
        let runs = tiling(5, 20);
        for run in &runs {
            sort_shard(&mut merged[run.range()]);
        }
        ranker.merge_runs(&mut merged, &runs);
        let capacity = ranker.scratch.capacity();

        ranker.merge_runs(&mut merged, &runs);
        assert_eq!(ranker.scratch.capacity(), capacity);
    }
}
