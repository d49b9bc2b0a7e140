//! # Work Partitioner
//!
//! Maps `(worker id, worker count, extent)` to the contiguous index range that
//! worker owns. The ranges of all workers tile `[0, extent)` exactly, whether or not
//! the worker count divides the extent; the last worker absorbs the remainder.
//!
//! The same function is applied at several granularities: once over the whole
//! population for evaluation and sorting, and once per reproduction segment, each
//! time with that segment's own size as the extent.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::partition::Partition;
//!
//! let ranges: Vec<_> = (0..3).map(|id| Partition::of(id, 3, 10).range()).collect();
//! assert_eq!(ranges, vec![0..3, 3..6, 6..10]);
//! ```

use std::ops::Range;

/// A half-open `[start, stop)` index range owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub stop: usize,
}

impl Partition {
    pub fn new(start: usize, stop: usize) -> Self {
        debug_assert!(start <= stop, "partition start {} past stop {}", start, stop);
        Self { start, stop }
    }

    /// The range of worker `id` out of `count` over `[0, extent)`.
    ///
    /// # Panics
    ///
    /// Panics if `count` is zero or `id >= count`.
    pub fn of(id: usize, count: usize, extent: usize) -> Self {
        assert!(count > 0, "partition requires at least one worker");
        assert!(id < count, "worker id {} out of range for {} workers", id, count);

        let start = id * extent / count;
        let stop = ((id + 1) * extent / count).min(extent);
        Self::new(start, stop)
    }

    /// Shrinks both bounds down to even values, so a range of `(i, i + 1)` pairs
    /// is never split between two workers.
    pub fn align_to_pairs(self) -> Self {
        Self::new(self.start - self.start % 2, self.stop - self.stop % 2)
    }

    /// Shifts the range by `offset`, placing it inside a larger buffer.
    pub fn offset(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.stop + offset)
    }

    pub fn len(&self) -> usize {
        self.stop - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.stop
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.stop
    }
}

/// Every worker's range over `[0, extent)`, in worker order.
pub fn tiling(count: usize, extent: usize) -> Vec<Partition> {
    (0..count).map(|id| Partition::of(id, count, extent)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiling_is_exact() {
        for count in 1..=12 {
            for extent in 0..=64 {
                let parts = tiling(count, extent);
                let mut expected_start = 0;
                for part in &parts {
                    assert_eq!(
                        part.start, expected_start,
                        "gap or overlap for count {} extent {}",
                        count, extent
                    );
                    assert!(part.start <= part.stop);
                    expected_start = part.stop;
                }
                assert_eq!(expected_start, extent);
            }
        }
    }

    #[test]
    fn test_last_worker_absorbs_remainder() {
        assert_eq!(Partition::of(3, 4, 10), Partition::new(7, 10));
        assert_eq!(Partition::of(0, 4, 10), Partition::new(0, 2));
    }

    #[test]
    fn test_more_workers_than_items() {
        let parts = tiling(5, 2);
        assert_eq!(parts.iter().filter(|p| !p.is_empty()).count(), 2);
        assert_eq!(parts.iter().map(Partition::len).sum::<usize>(), 2);
    }

    #[test]
    fn test_pair_alignment_covers_every_pair_once() {
        for count in 1..=9 {
            for pairs in 0..=20 {
                let extent = pairs * 2;
                let mut covered = vec![0u8; extent];
                for part in tiling(count, extent) {
                    let aligned = part.align_to_pairs();
                    assert_eq!(aligned.start % 2, 0);
                    assert_eq!(aligned.stop % 2, 0);
                    for i in aligned.range() {
                        covered[i] += 1;
                    }
                }
                assert!(covered.iter().all(|&c| c == 1), "count {} extent {}", count, extent);
            }
        }
    }

    #[test]
    #[should_panic]
    fn test_zero_workers_panics() {
        Partition::of(0, 0, 10);
    }
}
