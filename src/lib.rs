pub mod breeding;
pub mod catalog;
pub mod chromosome;
pub mod error;
pub mod evolution;
pub mod fitness;
pub mod individual;
pub mod input;
pub mod partition;
pub mod population;
pub mod ranking;
pub mod rng;

// Re-export commonly used types for convenience
pub use catalog::{Catalog, Item};
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{EvolutionLauncher, EvolutionOptions, EvolutionResult};
