use std::io::{self, Write};
use std::sync::Mutex;

use tracing::warn;

use crate::individual::Individual;

/// Generations whose index is a multiple of this emit a checkpoint.
pub const CHECKPOINT_INTERVAL: usize = 5;

/// The best fitness observed right after a generation was ranked.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    /// Index of the ranked generation. For the final checkpoint this equals the
    /// number of generations run.
    pub generation: usize,
    pub best_fitness: i64,
    /// Set on the single checkpoint taken after the last generation.
    pub is_final: bool,
}

/// Receives checkpoints as the run progresses. Only worker 0 calls it, while all
/// other workers wait on the barrier.
pub trait CheckpointSink: Sync {
    fn record(&self, checkpoint: Checkpoint);
}

impl CheckpointSink for () {
    fn record(&self, _checkpoint: Checkpoint) {}
}

impl CheckpointSink for Mutex<Vec<Checkpoint>> {
    fn record(&self, checkpoint: Checkpoint) {
        // A poisoned collector still holds every checkpoint recorded so far.
        let mut checkpoints = match self.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        checkpoints.push(checkpoint);
    }
}

/// Prints each best fitness on its own line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl CheckpointSink for StdoutSink {
    fn record(&self, checkpoint: Checkpoint) {
        // The run goes on without stdout; the result still carries every checkpoint.
        if let Err(e) = write_checkpoint(io::stdout().lock(), &checkpoint) {
            warn!(generation = checkpoint.generation, error = %e, "failed to print checkpoint");
        }
    }
}

fn write_checkpoint<W: Write>(mut out: W, checkpoint: &Checkpoint) -> io::Result<()> {
    writeln!(out, "{}", checkpoint.best_fitness)?;
    out.flush()
}

/// The outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionResult {
    /// The top-ranked individual of the final generation.
    pub best: Individual,
    /// Every checkpoint emitted during the run, the final one last.
    pub checkpoints: Vec<Checkpoint>,
}

impl EvolutionResult {
    pub fn best_fitness(&self) -> i64 {
        self.best.fitness
    }
}

/// Whether generation `generation` emits a checkpoint.
pub fn is_checkpoint(generation: usize) -> bool {
    generation % CHECKPOINT_INTERVAL == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_schedule() {
        let due: Vec<usize> = (0..17).filter(|&g| is_checkpoint(g)).collect();
        assert_eq!(due, vec![0, 5, 10, 15]);
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_checkpoint_line_format() {
        let checkpoint = Checkpoint {
            generation: 10,
            best_fitness: 137,
            is_final: false,
        };
        let mut out = Vec::new();
        write_checkpoint(&mut out, &checkpoint).unwrap();
        assert_eq!(out, b"137\n");
    }

    #[test]
    fn test_checkpoint_write_error_is_reported() {
        let checkpoint = Checkpoint {
            generation: 0,
            best_fitness: 1,
            is_final: true,
        };
        let err = write_checkpoint(ClosedPipe, &checkpoint).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_collecting_sink() {
        let sink = Mutex::new(Vec::new());
        let checkpoint = Checkpoint {
            generation: 5,
            best_fitness: 42,
            is_final: false,
        };
        sink.record(checkpoint);
        assert_eq!(sink.into_inner().unwrap(), vec![checkpoint]);
    }
}
