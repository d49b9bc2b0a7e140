//! # Error Types
//!
//! This module defines the error type shared by every part of the solver.
//! It separates the three failure families a run can hit: invalid configuration
//! (rejected before any worker starts), environment failures while spawning or
//! joining workers, and malformed instance input.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use knapsack_evolve::error::{GeneticError, Result};
//!
//! fn check_workers(workers: usize) -> Result<()> {
//!     if workers == 0 {
//!         return Err(GeneticError::Configuration(
//!             "Worker count cannot be zero".to_string(),
//!         ));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_workers(0).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use knapsack_evolve::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_instance(path: &str) -> Result<File> {
//!     File::open(path).context("Failed to open instance file")
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use knapsack_evolve::error::{GeneticError, OptionExt};
//!
//! fn first_profit(profits: &[i64]) -> knapsack_evolve::error::Result<i64> {
//!     profits.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the solver.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A chromosome does not match the catalog it is evaluated against.
    #[error("Chromosome length mismatch: expected {expected}, found {actual}")]
    ChromosomeLength { expected: usize, actual: usize },

    /// Selected profits or weights do not sum within `i64`.
    #[error("Arithmetic overflow: selected totals exceed the i64 range")]
    Overflow,

    /// Malformed instance input.
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A worker thread could not be created.
    #[error("Failed to spawn worker: {0}")]
    WorkerSpawn(String),

    /// A worker thread terminated abnormally and could not be joined.
    #[error("Failed to join worker {worker}")]
    WorkerJoin { worker: usize },

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for solver operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use knapsack_evolve::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> knapsack_evolve::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Adds context to an error, converting it into a `GeneticError`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
