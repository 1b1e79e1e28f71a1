// src/simulation/config.rs

use crate::error::ConfigError;
use serde::Serialize;

/// Horizon used when a configuration does not specify one.
pub const DEFAULT_SIMULATION_TIME: f64 = 1000.0;

/// Inputs for a single simulation run.
///
/// Values are checked by [`SimulationParameters::validate`] before a run is
/// built, so a run never sees a non-positive rate or an empty server pool.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimulationParameters {
    /// Mean arrivals per unit of logical time.
    pub arrival_rate: f64,
    /// Mean service completions per server per unit of logical time.
    pub service_rate: f64,
    pub num_servers: usize,
    /// Maximum number of customers allowed to wait for a server.
    pub queue_capacity: usize,
    /// Logical time at which the run stops.
    pub simulation_time: f64,
}

impl SimulationParameters {
    /// Parameters with the default horizon of 1000 time units.
    pub fn new(
        arrival_rate: f64,
        service_rate: f64,
        num_servers: usize,
        queue_capacity: usize,
    ) -> Self {
        Self {
            arrival_rate,
            service_rate,
            num_servers,
            queue_capacity,
            simulation_time: DEFAULT_SIMULATION_TIME,
        }
    }

    pub fn with_simulation_time(mut self, simulation_time: f64) -> Self {
        self.simulation_time = simulation_time;
        self
    }

    /// Fails fast on configurations that would produce nonsensical metrics.
    ///
    /// A zero horizon is accepted and yields an empty run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("arrival_rate", self.arrival_rate)?;
        check_rate("service_rate", self.service_rate)?;

        if self.num_servers == 0 {
            return Err(ConfigError::NoServers);
        }

        if !self.simulation_time.is_finite() || self.simulation_time < 0.0 {
            return Err(ConfigError::InvalidHorizon(self.simulation_time));
        }

        Ok(())
    }

    /// Offered load per server (rho = lambda / (c * mu)).
    pub fn offered_load(&self) -> f64 {
        self.arrival_rate / (self.service_rate * self.num_servers as f64)
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

/// How a Monte-Carlo batch is executed.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Number of independent trials (rows in the dataset).
    pub trials: usize,
    /// Master seed. `None` seeds every trial from OS entropy.
    pub seed: Option<u64>,
    /// Run trials on the rayon thread pool.
    pub parallel: bool,
    /// Log a progress line every this many completed trials. Zero disables it.
    pub progress_every: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: 100,
            seed: None,
            parallel: true,
            progress_every: 20,
        }
    }
}
