// src/sampling/traits.rs

use crate::simulation::config::SimulationParameters;
use rand::RngCore;
use std::fmt::Debug;

/// Produces the configuration for one Monte-Carlo trial.
///
/// `Send + Sync` so a single sampler can be shared by parallel trials; all
/// randomness comes from the trial's own generator.
pub trait ParameterSampler: Debug + Send + Sync {
    fn sample(&self, rng: &mut dyn RngCore) -> SimulationParameters;
}
