//! Synthetic performance datasets for multi-server queues.
//!
//! Each row of a dataset comes from one discrete-event simulation of an M/M/c
//! system with a bounded wait line: Poisson arrivals, exponential service,
//! `c` servers and room for `q` waiting customers. Arrivals that find every
//! server busy and the wait line full are turned away.
//!
//! ```no_run
//! use queue_dataset::{BatchConfig, BatchRunner, UniformParameterSampler};
//!
//! let runner = BatchRunner::new(
//!     UniformParameterSampler::default(),
//!     BatchConfig { trials: 100, seed: Some(7), ..BatchConfig::default() },
//! );
//! let dataset = runner.run()?;
//! queue_dataset::io::reporting::write_dataset("queue_dataset.csv", &dataset)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod io;
pub mod logging;
pub mod model;
pub mod sampling;
pub mod simulation;

pub use error::{ConfigError, ExportError, PoolError, SimulationError};
pub use sampling::implementations::{FixedParameters, ParameterRanges, UniformParameterSampler};
pub use sampling::traits::ParameterSampler;
pub use simulation::batch::BatchRunner;
pub use simulation::config::{BatchConfig, SimulationParameters};
pub use simulation::dataset::{ColumnSummary, Dataset};
pub use simulation::engine::{simulate, QueueSimulation};
pub use simulation::metrics::{SimulationResult, ACCEPTABLE_WAIT};
pub use simulation::variates::{ExponentialVariates, ReplayVariates, VariateSource};
