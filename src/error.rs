// src/error.rs

use thiserror::Error;

/// A simulation or sampler was configured with values that cannot produce
/// meaningful metrics.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ConfigError {
    /// A rate must be a finite number greater than zero.
    #[error("{name} must be a finite number greater than zero, got {value}")]
    InvalidRate {
        /// Which rate was rejected.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// At least one server is required.
    #[error("num_servers must be at least 1")]
    NoServers,

    /// The horizon must be finite and non-negative.
    #[error("simulation_time must be a finite, non-negative number, got {0}")]
    InvalidHorizon(f64),

    /// A sampling range is empty, inverted or not finite.
    #[error("invalid sampling range for {name}: [{low}, {high})")]
    InvalidRange {
        name: &'static str,
        low: f64,
        high: f64,
    },

    /// The queue capacity sampler has nothing to choose from.
    #[error("queue capacity choices must not be empty")]
    NoCapacityChoices,
}

/// The server pool was asked to break one of its invariants.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PoolError {
    /// A request was made while the wait line was already full.
    ///
    /// Arrivals must pass the admission check first.
    #[error("wait line is full ({capacity} waiting)")]
    WaitLineFull { capacity: usize },
}

/// Anything that can stop a simulation run from producing a result.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("server pool invariant violated: {0}")]
    Pool(#[from] PoolError),
}

/// Writing a dataset out failed.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
