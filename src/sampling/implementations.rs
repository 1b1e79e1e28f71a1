// src/sampling/implementations.rs

use crate::error::ConfigError;
use crate::sampling::traits::ParameterSampler;
use crate::simulation::config::{SimulationParameters, DEFAULT_SIMULATION_TIME};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

/// Queue capacities the default sampler chooses from.
pub const DEFAULT_QUEUE_CAPACITIES: [usize; 8] = [5, 10, 15, 20, 25, 30, 40, 50];

// =========================================================================
// 1. Uniform sampler (Monte-Carlo training inputs)
// =========================================================================

/// Bounds for [`UniformParameterSampler`]. Rate ranges are half-open.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRanges {
    pub arrival_rate: (f64, f64),
    pub service_rate: (f64, f64),
    /// Inclusive.
    pub num_servers: (usize, usize),
    pub queue_capacities: Vec<usize>,
    pub simulation_time: f64,
}

impl Default for ParameterRanges {
    fn default() -> Self {
        Self {
            arrival_rate: (1.0, 20.0),
            service_rate: (0.5, 25.0),
            num_servers: (1, 10),
            queue_capacities: DEFAULT_QUEUE_CAPACITIES.to_vec(),
            simulation_time: DEFAULT_SIMULATION_TIME,
        }
    }
}

impl ParameterRanges {
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range("arrival_rate", self.arrival_rate)?;
        check_range("service_rate", self.service_rate)?;

        let (min_servers, max_servers) = self.num_servers;
        if min_servers == 0 {
            return Err(ConfigError::NoServers);
        }
        if min_servers > max_servers {
            return Err(ConfigError::InvalidRange {
                name: "num_servers",
                low: min_servers as f64,
                high: max_servers as f64,
            });
        }

        if self.queue_capacities.is_empty() {
            return Err(ConfigError::NoCapacityChoices);
        }

        if !self.simulation_time.is_finite() || self.simulation_time < 0.0 {
            return Err(ConfigError::InvalidHorizon(self.simulation_time));
        }

        Ok(())
    }
}

fn check_range(name: &'static str, (low, high): (f64, f64)) -> Result<(), ConfigError> {
    if low.is_finite() && high.is_finite() && low > 0.0 && low < high {
        Ok(())
    } else {
        Err(ConfigError::InvalidRange { name, low, high })
    }
}

/// Draws every parameter independently and uniformly from its range.
#[derive(Debug, Clone, Default)]
pub struct UniformParameterSampler {
    ranges: ParameterRanges,
}

impl UniformParameterSampler {
    pub fn new(ranges: ParameterRanges) -> Result<Self, ConfigError> {
        ranges.validate()?;
        Ok(Self { ranges })
    }

    pub fn ranges(&self) -> &ParameterRanges {
        &self.ranges
    }
}

impl ParameterSampler for UniformParameterSampler {
    fn sample(&self, rng: &mut dyn RngCore) -> SimulationParameters {
        let r = &self.ranges;
        let (arrival_low, arrival_high) = r.arrival_rate;
        let (service_low, service_high) = r.service_rate;
        let (min_servers, max_servers) = r.num_servers;

        let arrival_rate = rng.gen_range(arrival_low..arrival_high);
        let service_rate = rng.gen_range(service_low..service_high);
        let num_servers = rng.gen_range(min_servers..=max_servers);
        // Never empty once validated.
        let queue_capacity = r.queue_capacities.choose(rng).copied().unwrap_or_default();

        SimulationParameters {
            arrival_rate,
            service_rate,
            num_servers,
            queue_capacity,
            simulation_time: r.simulation_time,
        }
    }
}

// =========================================================================
// 2. Fixed configuration (replications)
// =========================================================================

/// Returns the same configuration for every trial, so a batch becomes a set
/// of independent replications of one system.
#[derive(Debug, Clone)]
pub struct FixedParameters {
    params: SimulationParameters,
}

impl FixedParameters {
    pub fn new(params: SimulationParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { params })
    }
}

impl ParameterSampler for FixedParameters {
    fn sample(&self, _rng: &mut dyn RngCore) -> SimulationParameters {
        self.params
    }
}
