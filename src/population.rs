//! # Population Buffers
//!
//! Two equal-length slabs of individuals live for the whole run. At any moment one
//! holds the `current` generation and the other receives the `next` one; their
//! roles swap at the end of every generation.
//!
//! Workers never hold references to a slab across a barrier. Instead each one keeps
//! its own [`Roles`] handle (two slab indices) and asks the [`Generations`] arena
//! for a view of an index range whenever a phase starts. Writes go through
//! [`PopulationSlab::shard_mut`], which hands out a mutable slice for exactly one
//! [`Partition`]; reads of the whole slab go through [`PopulationSlab::view`].
//!
//! ## Memory Layout
//!
//! ```text
//! slab 0: [ind 0 | ind 1 | ... | ind N-1]   <- current on even generations
//! slab 1: [ind 0 | ind 1 | ... | ind N-1]   <- current on odd generations
//! ```
//!
//! ## Access Protocol
//!
//! Within one barrier phase, every index of a slab has at most one writer (the
//! worker whose partition contains it), and nobody reads an index that someone else
//! is writing. Phases that need the whole slab (the merge) are run by a single
//! worker while the others wait on the barrier.

use std::cell::UnsafeCell;

use crate::individual::Individual;
use crate::partition::Partition;

/// A fixed-size slab of individuals shared between workers.
pub struct PopulationSlab {
    cells: Box<[UnsafeCell<Individual>]>,
}

// SAFETY: PopulationSlab can be shared between threads because:
// 1. All mutable access goes through `shard_mut`, whose callers guarantee that the
//    ranges handed out within one barrier phase are pairwise disjoint
// 2. Whole-slab reads (`view`) only happen in phases where nobody writes the slab
// 3. Barrier crossings order every write before any read of the following phase
unsafe impl Sync for PopulationSlab {}

impl PopulationSlab {
    /// Allocates `len` blank individuals, each with a `chromosome_len`-gene chromosome
    /// and labelled with its own position.
    pub fn new(len: usize, chromosome_len: usize) -> Self {
        Self {
            cells: (0..len)
                .map(|index| UnsafeCell::new(Individual::blank(chromosome_len, index)))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn base(&self) -> *mut Individual {
        UnsafeCell::raw_get(self.cells.as_ptr())
    }

    /// Exclusive access to the individuals in `part`.
    ///
    /// # Panics
    ///
    /// Panics if `part` reaches past the end of the slab.
    ///
    /// # Safety
    ///
    /// Until the returned slice is dropped, no other thread may obtain a slice
    /// (mutable or shared) that overlaps `part`. Callers uphold this by taking
    /// disjoint partitions within one barrier phase.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn shard_mut(&self, part: Partition) -> &mut [Individual] {
        assert!(
            part.stop <= self.cells.len(),
            "partition {:?} exceeds slab of {}",
            part,
            self.cells.len()
        );
        std::slice::from_raw_parts_mut(self.base().add(part.start), part.len())
    }

    /// Shared access to the whole slab.
    ///
    /// # Safety
    ///
    /// Until the returned slice is dropped, no thread may hold a slice obtained
    /// from `shard_mut` on this slab.
    pub unsafe fn view(&self) -> &[Individual] {
        std::slice::from_raw_parts(self.base(), self.cells.len())
    }

    /// Consumes the slab, returning its individuals.
    pub fn into_individuals(self) -> Vec<Individual> {
        self.cells
            .into_vec()
            .into_iter()
            .map(UnsafeCell::into_inner)
            .collect()
    }
}

/// Which slab plays which role. Every worker keeps its own copy and swaps it
/// at the same point of every generation, so all copies agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roles {
    pub current: usize,
    pub next: usize,
}

impl Roles {
    pub fn initial() -> Self {
        Self {
            current: 0,
            next: 1,
        }
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }
}

/// The arena owning both population slabs.
pub struct Generations {
    slabs: [PopulationSlab; 2],
}

impl Generations {
    /// Allocates both slabs with `size` individuals of `size` genes each.
    pub fn new(size: usize) -> Self {
        Self {
            slabs: [PopulationSlab::new(size, size), PopulationSlab::new(size, size)],
        }
    }

    pub fn size(&self) -> usize {
        self.slabs[0].len()
    }

    pub fn current(&self, roles: Roles) -> &PopulationSlab {
        &self.slabs[roles.current]
    }

    pub fn next(&self, roles: Roles) -> &PopulationSlab {
        &self.slabs[roles.next]
    }

    /// Consumes the arena, returning the slab that `roles` marks as current.
    pub fn into_current(self, roles: Roles) -> Vec<Individual> {
        let [first, second] = self.slabs;
        if roles.current == 0 {
            first.into_individuals()
        } else {
            second.into_individuals()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Barrier;
    use std::thread;

    #[test]
    fn test_new_slab_is_labelled() {
        let slab = PopulationSlab::new(4, 6);
        let individuals = slab.into_individuals();
        assert_eq!(individuals.len(), 4);
        for (index, ind) in individuals.iter().enumerate() {
            assert_eq!(ind.original_index, index);
            assert_eq!(ind.chromosome.len(), 6);
            assert_eq!(ind.chromosome.count_selected(), 0);
        }
    }

    #[test]
    fn test_roles_swap() {
        let mut roles = Roles::initial();
        roles.swap();
        assert_eq!(roles, Roles { current: 1, next: 0 });
        roles.swap();
        assert_eq!(roles, Roles::initial());
    }

    #[test]
    fn test_disjoint_shards_from_threads() {
        let workers = 3;
        let generations = Generations::new(10);
        let barrier = Barrier::new(workers);
        let roles = Roles::initial();

        thread::scope(|s| {
            for id in 0..workers {
                let generations = &generations;
                let barrier = &barrier;
                s.spawn(move || {
                    let part = Partition::of(id, workers, generations.size());
                    // SAFETY: partitions of distinct workers are disjoint.
                    let shard = unsafe { generations.current(roles).shard_mut(part) };
                    for (offset, ind) in shard.iter_mut().enumerate() {
                        ind.chromosome.set(part.start + offset, true);
                    }
                    barrier.wait();
                });
            }
        });

        let individuals = generations.into_current(roles);
        for (index, ind) in individuals.iter().enumerate() {
            assert_eq!(ind.chromosome.selected().collect::<Vec<_>>(), vec![index]);
        }
    }

    #[test]
    #[should_panic]
    fn test_shard_past_end_panics() {
        let slab = PopulationSlab::new(4, 4);
        // SAFETY: single-threaded.
        let _ = unsafe { slab.shard_mut(Partition::new(2, 5)) };
    }
}
