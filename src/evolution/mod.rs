pub mod challenge;
pub mod launcher;
pub mod options;
pub mod phase;
pub mod report;
mod worker;

pub use challenge::Challenge;
pub use launcher::EvolutionLauncher;
pub use options::EvolutionOptions;
pub use phase::{Phase, PhaseCoordinator};
pub use report::{Checkpoint, CheckpointSink, EvolutionResult, StdoutSink, CHECKPOINT_INTERVAL};
