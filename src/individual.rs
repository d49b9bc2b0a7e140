//! # Individual
//!
//! An individual is one candidate solution: a chromosome, the fitness last computed
//! for it, and the bookkeeping index it was labelled with when its generation was
//! promoted. The index is a tie-break only; it is not an identity and is rewritten
//! every generation.

use std::cmp::Ordering;

use crate::chromosome::Chromosome;

/// One candidate solution in a population buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Individual {
    pub chromosome: Chromosome,
    pub fitness: i64,
    pub original_index: usize,
}

impl Individual {
    /// An individual with an empty selection and zero fitness.
    pub fn blank(chromosome_len: usize, original_index: usize) -> Self {
        Self {
            chromosome: Chromosome::zeroed(chromosome_len),
            fitness: 0,
            original_index,
        }
    }

    /// Copies `parent`'s genes into this slot.
    ///
    /// Only the chromosome moves: the slot keeps its own `original_index` and its
    /// fitness stays stale until the next evaluation pass. The storage is reused.
    pub fn inherit(&mut self, parent: &Individual) {
        self.chromosome.clone_from(&parent.chromosome);
    }
}

/// The ranking order: the smaller element under this ordering ranks first.
///
/// 1. Higher fitness first.
/// 2. Fewer selected items first.
/// 3. Larger `original_index` first.
///
/// Within one generation the indices are distinct, so this is a total order.
pub fn rank_order(a: &Individual, b: &Individual) -> Ordering {
    b.fitness
        .cmp(&a.fitness)
        .then_with(|| {
            a.chromosome
                .count_selected()
                .cmp(&b.chromosome.count_selected())
        })
        .then_with(|| b.original_index.cmp(&a.original_index))
}
