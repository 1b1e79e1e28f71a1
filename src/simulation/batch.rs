// src/simulation/batch.rs

use crate::error::SimulationError;
use crate::sampling::traits::ParameterSampler;
use crate::simulation::config::BatchConfig;
use crate::simulation::dataset::Dataset;
use crate::simulation::engine::simulate;
use crate::simulation::metrics::SimulationResult;
use crate::simulation::variates::ExponentialVariates;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info};

/// Runs independent Monte-Carlo trials and collects one row per trial.
#[derive(Debug)]
pub struct BatchRunner<S: ParameterSampler> {
    sampler: S,
    config: BatchConfig,
}

impl<S: ParameterSampler> BatchRunner<S> {
    pub fn new(sampler: S, config: BatchConfig) -> Self {
        Self { sampler, config }
    }

    /// Runs every trial. Rows come back in trial order whether or not the
    /// trials ran in parallel.
    pub fn run(&self) -> Result<Dataset, SimulationError> {
        let seeds = self.trial_seeds();
        let completed = AtomicUsize::new(0);

        info!(
            trials = self.config.trials,
            parallel = self.config.parallel,
            seed = ?self.config.seed,
            "starting batch"
        );

        let rows: Vec<SimulationResult> = if self.config.parallel {
            seeds
                .par_iter()
                .map(|seed| self.run_trial(*seed, &completed))
                .collect::<Result<_, _>>()?
        } else {
            seeds
                .iter()
                .map(|seed| self.run_trial(*seed, &completed))
                .collect::<Result<_, _>>()?
        };

        info!(rows = rows.len(), "batch complete");
        Ok(rows.into_iter().collect())
    }

    /// Runs a single trial from its seed: parameters first, then the run,
    /// both drawing from the same generator.
    pub fn run_single(&self, seed: u64) -> Result<SimulationResult, SimulationError> {
        let mut rng = StdRng::seed_from_u64(seed);
        let params = self.sampler.sample(&mut rng);
        debug!(seed, ?params, "trial parameters");

        let variates = ExponentialVariates::with_rng(&params, rng)?;
        simulate(params, variates)
    }

    fn run_trial(
        &self,
        seed: u64,
        completed: &AtomicUsize,
    ) -> Result<SimulationResult, SimulationError> {
        let result = self.run_single(seed)?;

        let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
        let every = self.config.progress_every;
        if every > 0 && done % every == 0 {
            info!("{} simulations complete...", done);
        }

        Ok(result)
    }

    /// One seed per trial. With a master seed the list is reproducible.
    fn trial_seeds(&self) -> Vec<u64> {
        let mut master = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..self.config.trials).map(|_| master.gen()).collect()
    }
}
