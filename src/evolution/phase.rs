//! # Phase Coordinator
//!
//! All workers run the same generation loop and meet at a shared barrier between
//! phases. No worker starts phase `n + 1` until every worker has finished phase `n`,
//! which is what lets the loop share the population buffers without locks.

use std::fmt;
use std::sync::Barrier;

use tracing::trace;

/// The barrier crossings of a run, in the order a generation meets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The first generation's chromosomes are initialized.
    Initialized,
    /// Every worker has evaluated its partition.
    Evaluated,
    /// Every worker has sorted its partition.
    Sorted,
    /// Worker 0 has merged the sorted partitions.
    Merged,
    /// The elite and both mutant segments are written.
    MutantsWritten,
    /// The survivor slot is filled and the crossover pairing is final.
    CrossoverPlanned,
    /// The crossover segment is written.
    CrossoverWritten,
    /// Buffers are swapped and the new generation relabelled.
    Swapped,
}

impl Phase {
    /// The crossings of one full generation.
    pub const GENERATION: [Phase; 7] = [
        Phase::Evaluated,
        Phase::Sorted,
        Phase::Merged,
        Phase::MutantsWritten,
        Phase::CrossoverPlanned,
        Phase::CrossoverWritten,
        Phase::Swapped,
    ];
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Initialized => "initialized",
            Phase::Evaluated => "evaluated",
            Phase::Sorted => "sorted",
            Phase::Merged => "merged",
            Phase::MutantsWritten => "mutants-written",
            Phase::CrossoverPlanned => "crossover-planned",
            Phase::CrossoverWritten => "crossover-written",
            Phase::Swapped => "swapped",
        };
        f.write_str(name)
    }
}

/// A reusable rendezvous for a fixed number of workers.
#[derive(Debug)]
pub struct PhaseCoordinator {
    barrier: Barrier,
    workers: usize,
}

impl PhaseCoordinator {
    pub fn new(workers: usize) -> Self {
        Self {
            barrier: Barrier::new(workers),
            workers,
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Blocks until all workers have reached `phase`.
    pub fn cross(&self, id: usize, generation: usize, phase: Phase) {
        trace!(worker = id, generation, %phase, "waiting at barrier");
        self.barrier.wait();
    }
}
