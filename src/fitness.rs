//! # Fitness Evaluator
//!
//! A chromosome's fitness is the total profit of the items it selects, or zero when
//! their total weight exceeds the sack capacity. The capacity bound is inclusive: a
//! selection weighing exactly the capacity keeps its profit.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::catalog::Catalog;
//! use knapsack_evolve::chromosome::Chromosome;
//! use knapsack_evolve::evolution::Challenge;
//! use knapsack_evolve::fitness::Knapsack;
//!
//! let catalog = Catalog::from_pairs(vec![(10, 4), (7, 3), (3, 2)]);
//! let sack = Knapsack::new(&catalog, 5);
//!
//! let fits = Chromosome::from_genes(vec![false, true, true]);
//! let too_heavy = Chromosome::from_genes(vec![true, true, false]);
//!
//! assert_eq!(sack.score(&fits), 10);
//! assert_eq!(sack.score(&too_heavy), 0);
//! ```

use crate::catalog::Catalog;
use crate::chromosome::Chromosome;
use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::individual::Individual;

/// The 0/1 knapsack objective over a catalog and a capacity.
#[derive(Debug, Clone, Copy)]
pub struct Knapsack<'a> {
    catalog: &'a Catalog,
    capacity: i64,
}

impl<'a> Knapsack<'a> {
    pub fn new(catalog: &'a Catalog, capacity: i64) -> Self {
        Self { catalog, capacity }
    }

    pub fn capacity(&self) -> i64 {
        self.capacity
    }

    /// `None` when either total leaves the `i64` range.
    fn sums(&self, chromosome: &Chromosome) -> Option<(i64, i64)> {
        chromosome
            .genes()
            .iter()
            .zip(self.catalog)
            .filter(|&(&gene, _)| gene)
            .try_fold((0i64, 0i64), |(profit, weight), (_, item)| {
                Some((
                    profit.checked_add(item.profit)?,
                    weight.checked_add(item.weight)?,
                ))
            })
    }

    /// Total `(profit, weight)` of the selected items.
    ///
    /// # Errors
    ///
    /// - `ChromosomeLength` if the chromosome does not have one gene per item
    /// - `Overflow` if the selected profits or weights do not sum within `i64`
    pub fn totals(&self, chromosome: &Chromosome) -> Result<(i64, i64)> {
        if chromosome.len() != self.catalog.len() {
            return Err(GeneticError::ChromosomeLength {
                expected: self.catalog.len(),
                actual: chromosome.len(),
            });
        }
        self.sums(chromosome).ok_or(GeneticError::Overflow)
    }
}

impl Challenge for Knapsack<'_> {
    fn score(&self, chromosome: &Chromosome) -> i64 {
        debug_assert_eq!(chromosome.len(), self.catalog.len());
        // A selection whose totals overflow cannot be represented as a sack.
        match self.sums(chromosome) {
            Some((profit, weight)) if weight <= self.capacity => profit,
            _ => 0,
        }
    }
}

/// Recomputes the fitness of every individual in `shard`.
pub fn evaluate<C: Challenge + ?Sized>(challenge: &C, shard: &mut [Individual]) {
    for individual in shard {
        individual.fitness = challenge.score(&individual.chromosome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_subsets(len: usize) -> impl Iterator<Item = Chromosome> {
        (0u32..(1 << len)).map(move |mask| {
            Chromosome::from_genes((0..len).map(|bit| mask & (1 << bit) != 0).collect())
        })
    }

    #[test]
    fn test_fitness_matches_definition_for_every_subset() {
        let catalog = Catalog::from_pairs(vec![(4, 3), (6, 5), (1, 1), (9, 7), (2, 2)]);
        for capacity in 0..=catalog.total_weight() + 1 {
            let sack = Knapsack::new(&catalog, capacity);
            for chromosome in all_subsets(catalog.len()) {
                let (profit, weight) = sack.totals(&chromosome).unwrap();
                let expected = if weight <= capacity { profit } else { 0 };
                assert_eq!(sack.score(&chromosome), expected);
            }
        }
    }

    #[test]
    fn test_capacity_bound_is_inclusive() {
        let catalog = Catalog::from_pairs(vec![(5, 2), (5, 3)]);
        let both = Chromosome::from_genes(vec![true, true]);
        let exact = Knapsack::new(&catalog, 5);
        assert_eq!(exact.totals(&both).unwrap(), (10, exact.capacity()));
        assert_eq!(exact.score(&both), 10);
        assert_eq!(Knapsack::new(&catalog, 4).score(&both), 0);
    }

    #[test]
    fn test_totals_rejects_length_mismatch() {
        let catalog = Catalog::from_pairs(vec![(1, 1), (1, 1)]);
        let sack = Knapsack::new(&catalog, 5);
        let result = sack.totals(&Chromosome::zeroed(3));
        assert!(matches!(
            result,
            Err(GeneticError::ChromosomeLength {
                expected: 2,
                actual: 3
            })
        ));
    }

    #[test]
    fn test_overflowing_totals() {
        let catalog = Catalog::from_pairs(vec![(i64::MAX, 1), (1, 1), (5, i64::MAX)]);
        let sack = Knapsack::new(&catalog, i64::MAX);

        let profits = Chromosome::from_genes(vec![true, true, false]);
        assert_eq!(sack.score(&profits), 0);
        assert!(matches!(sack.totals(&profits), Err(GeneticError::Overflow)));

        let weights = Chromosome::from_genes(vec![false, true, true]);
        assert_eq!(sack.score(&weights), 0);
        assert!(matches!(sack.totals(&weights), Err(GeneticError::Overflow)));

        let single = Chromosome::from_genes(vec![true, false, false]);
        assert_eq!(sack.score(&single), i64::MAX);
        assert_eq!(sack.totals(&single).unwrap(), (i64::MAX, 1));
    }

    #[test]
    fn test_evaluate_only_touches_fitness() {
        let catalog = Catalog::from_pairs(vec![(3, 1), (4, 1), (5, 1)]);
        let sack = Knapsack::new(&catalog, 2);
        let mut shard = vec![Individual::blank(3, 5), Individual::blank(3, 6)];
        shard[0].chromosome.set(0, true);
        shard[0].chromosome.set(2, true);
        shard[1].chromosome = Chromosome::from_genes(vec![true, true, true]);

        evaluate(&sack, &mut shard);

        assert_eq!(shard[0].fitness, 8);
        assert_eq!(shard[1].fitness, 0);
        assert_eq!(shard[0].original_index, 5);
        assert_eq!(shard[1].original_index, 6);
    }
}
