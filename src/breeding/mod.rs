//! # Reproduction Pipeline
//!
//! The next generation is assembled from the ranked current generation in four
//! contiguous segments, each a fixed fraction of the population size `N`:
//!
//! ```text
//! next:  [ elite 3N/10 | mutant A 2N/10 | mutant B 2N/10 | crossover 3N/10 ]
//! from:    cur[0..3N/10)  cur[0..2N/10)    cur[2N/10..4N/10)  pairs of cur[0..)
//! ```
//!
//! When `3N/10` is odd the last crossover slot is filled with a verbatim copy of the
//! lowest-ranked individual `cur[N-1]` and only the remaining even number of slots
//! are bred in pairs.
//!
//! Every segment is split between workers by [`Partition::of`] at the segment's own
//! size, so each worker writes one slice of each segment.

pub mod operators;

pub use operators::{crossover, crossover_point, mutation_step, Mutation};

use crate::individual::Individual;
use crate::partition::Partition;

/// Offsets and sizes of the four next-generation segments for a population size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentLayout {
    size: usize,
    elite: usize,
    mutants: usize,
    crossover: usize,
}

impl SegmentLayout {
    /// Layout for a population of `size` individuals. `size` is expected to be a
    /// multiple of 10.
    pub fn new(size: usize) -> Self {
        debug_assert_eq!(size % 10, 0, "population size must be a multiple of 10");
        Self {
            size,
            elite: size * 3 / 10,
            mutants: size * 2 / 10,
            crossover: size * 3 / 10,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Slots `[0, 3N/10)`, copied from the same ranks.
    pub fn elite(&self) -> Partition {
        Partition::new(0, self.elite)
    }

    /// Slots `[3N/10, 5N/10)`, bred from ranks `[0, 2N/10)`.
    pub fn mutant_a(&self) -> Partition {
        let start = self.elite().stop;
        Partition::new(start, start + self.mutants)
    }

    /// Slots `[5N/10, 7N/10)`, bred from ranks `[2N/10, 4N/10)`.
    pub fn mutant_b(&self) -> Partition {
        let start = self.mutant_a().stop;
        Partition::new(start, start + self.mutants)
    }

    /// Slots `[7N/10, N)`, including the survivor slot when there is one.
    pub fn crossover(&self) -> Partition {
        let start = self.mutant_b().stop;
        Partition::new(start, start + self.crossover)
    }

    /// Number of mutant individuals per mutant segment.
    pub fn mutant_len(&self) -> usize {
        self.mutants
    }

    /// Number of crossover slots bred in pairs; always even.
    pub fn paired_len(&self) -> usize {
        self.crossover - self.crossover % 2
    }

    /// The next-generation slot that receives a verbatim copy of the lowest-ranked
    /// individual, present only when the crossover segment has odd length.
    pub fn survivor_slot(&self) -> Option<usize> {
        (self.crossover % 2 == 1).then(|| self.crossover().stop - 1)
    }
}

/// The source ranges one worker reads for each segment, relative to the segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSegments {
    pub elite: Partition,
    pub mutants: Partition,
}

impl WorkerSegments {
    pub fn new(layout: &SegmentLayout, id: usize, workers: usize) -> Self {
        Self {
            elite: Partition::of(id, workers, layout.elite().len()),
            mutants: Partition::of(id, workers, layout.mutant_len()),
        }
    }

    /// This worker's pairs of the crossover segment. Computed separately since the
    /// paired length is only final once the survivor slot has been filled.
    pub fn crossover(layout: &SegmentLayout, id: usize, workers: usize) -> Partition {
        Partition::of(id, workers, layout.paired_len()).align_to_pairs()
    }
}

/// Copies `parents[source]` into `children`.
pub fn copy_segment(parents: &[Individual], source: Partition, children: &mut [Individual]) {
    debug_assert_eq!(source.len(), children.len());
    for (child, parent) in children.iter_mut().zip(&parents[source.range()]) {
        child.inherit(parent);
    }
}

/// Copies `parents[source]` into `children`, then mutates each copy in place.
pub fn mutate_segment(
    parents: &[Individual],
    source: Partition,
    children: &mut [Individual],
    mutation: Mutation,
    generation: usize,
) {
    copy_segment(parents, source, children);
    for child in children.iter_mut() {
        mutation.apply(child, generation);
    }
}

/// Breeds `children` pairwise from `parents[source]`, pairing `(i, i + 1)`.
///
/// `source` must start and stop on even indices.
pub fn crossover_segment(
    parents: &[Individual],
    source: Partition,
    children: &mut [Individual],
    generation: usize,
) {
    debug_assert_eq!(source.len(), children.len());
    debug_assert_eq!(source.start % 2, 0);
    debug_assert_eq!(source.stop % 2, 0);

    let couples = parents[source.range()].chunks_exact(2);
    for (couple, pair) in couples.zip(children.chunks_exact_mut(2)) {
        let (first, second) = pair.split_at_mut(1);
        crossover(
            &couple[0].chromosome,
            &couple[1].chromosome,
            (&mut first[0].chromosome, &mut second[0].chromosome),
            generation,
        );
    }
}

/// Builds the whole next generation from a ranked `parents` on one thread.
///
/// The parallel run distributes exactly these writes across its workers; this
/// form is what a single worker performs.
pub fn reproduce(parents: &[Individual], children: &mut [Individual], generation: usize) {
    let layout = SegmentLayout::new(parents.len());
    let mutants = Partition::new(0, layout.mutant_len());

    copy_segment(parents, layout.elite(), &mut children[layout.elite().range()]);
    mutate_segment(
        parents,
        mutants,
        &mut children[layout.mutant_a().range()],
        Mutation::Split,
        generation,
    );
    mutate_segment(
        parents,
        mutants.offset(layout.mutant_len()),
        &mut children[layout.mutant_b().range()],
        Mutation::Uniform,
        generation,
    );
    if let Some(slot) = layout.survivor_slot() {
        children[slot].inherit(&parents[layout.size() - 1]);
    }
    let paired = Partition::new(0, layout.paired_len());
    crossover_segment(
        parents,
        paired,
        &mut children[paired.offset(layout.crossover().start).range()],
        generation,
    );
}
