//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the run parameters of the solver: the
//! population size (which must equal the number of catalog items), the sack
//! capacity, the number of generations and the number of worker threads.
//!
//! Selection ratios and mutation strides are fixed by the algorithm and are not
//! configurable.
//!
//! ## Example
//!
//! ```rust
//! use knapsack_evolve::evolution::options::EvolutionOptions;
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(50, 120, 200, 4);
//!
//! // Or with the builder
//! let options = EvolutionOptions::builder()
//!     .population_size(50)
//!     .sack_capacity(120)
//!     .num_generations(200)
//!     .num_workers(4)
//!     .build();
//!
//! assert_eq!(custom_options.get_num_workers(), options.get_num_workers());
//! ```

use crate::catalog::Catalog;
use crate::error::{GeneticError, Result};

/// Smallest population the mutation stride formula admits.
pub const MIN_POPULATION_SIZE: usize = 10;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionOptions {
    population_size: usize,
    sack_capacity: i64,
    num_generations: usize,
    num_workers: usize,
}

impl EvolutionOptions {
    pub fn new(
        population_size: usize,
        sack_capacity: i64,
        num_generations: usize,
        num_workers: usize,
    ) -> Self {
        Self {
            population_size,
            sack_capacity,
            num_generations,
            num_workers,
        }
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    pub fn get_sack_capacity(&self) -> i64 {
        self.sack_capacity
    }

    pub fn get_num_generations(&self) -> usize {
        self.num_generations
    }

    pub fn get_num_workers(&self) -> usize {
        self.num_workers
    }

    /// Sets the population size.
    pub fn set_population_size(&mut self, population_size: usize) {
        self.population_size = population_size;
    }

    /// Sets the sack capacity.
    pub fn set_sack_capacity(&mut self, sack_capacity: i64) {
        self.sack_capacity = sack_capacity;
    }

    /// Sets the number of generations.
    pub fn set_num_generations(&mut self, num_generations: usize) {
        self.num_generations = num_generations;
    }

    /// Sets the number of worker threads.
    pub fn set_num_workers(&mut self, num_workers: usize) {
        self.num_workers = num_workers;
    }

    /// Checks these options against the catalog they will run on.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if:
    /// - the population size is below 10 or not a multiple of 10
    /// - the catalog does not hold exactly one item per individual
    /// - the number of generations or workers is zero
    pub fn validate(&self, catalog: &Catalog) -> Result<()> {
        if self.population_size < MIN_POPULATION_SIZE || self.population_size % 10 != 0 {
            return Err(GeneticError::Configuration(format!(
                "Population size must be a positive multiple of 10, got {}",
                self.population_size
            )));
        }

        if catalog.len() != self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Population size {} does not match catalog of {} items",
                self.population_size,
                catalog.len()
            )));
        }

        if self.num_generations == 0 {
            return Err(GeneticError::Configuration(
                "Number of generations cannot be zero".to_string(),
            ));
        }

        if self.num_workers == 0 {
            return Err(GeneticError::Configuration(
                "Number of workers cannot be zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            population_size: MIN_POPULATION_SIZE,
            sack_capacity: 0,
            num_generations: 100,
            num_workers: 1,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Unset fields take the values of `EvolutionOptions::default()`.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    population_size: Option<usize>,
    sack_capacity: Option<i64>,
    num_generations: Option<usize>,
    num_workers: Option<usize>,
}

impl EvolutionOptionsBuilder {
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    pub fn sack_capacity(mut self, value: i64) -> Self {
        self.sack_capacity = Some(value);
        self
    }

    pub fn num_generations(mut self, value: usize) -> Self {
        self.num_generations = Some(value);
        self
    }

    pub fn num_workers(mut self, value: usize) -> Self {
        self.num_workers = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let default = EvolutionOptions::default();
        EvolutionOptions {
            population_size: self.population_size.unwrap_or(default.population_size),
            sack_capacity: self.sack_capacity.unwrap_or(default.sack_capacity),
            num_generations: self.num_generations.unwrap_or(default.num_generations),
            num_workers: self.num_workers.unwrap_or(default.num_workers),
        }
    }
}
