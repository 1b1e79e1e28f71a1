// src/simulation/variates.rs

use crate::error::ConfigError;
use crate::simulation::config::SimulationParameters;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Exp};
use std::collections::VecDeque;
use std::fmt::Debug;

/// Supplies the random durations a run consumes.
///
/// Every run owns its own source, so two runs never share a random stream.
pub trait VariateSource: Debug + Send {
    /// Time until the next arrival.
    fn inter_arrival(&mut self) -> f64;

    /// Time a server spends on one customer.
    fn service_duration(&mut self) -> f64;
}

/// Exponential inter-arrival and service times (an M/M/c system).
#[derive(Debug, Clone)]
pub struct ExponentialVariates<R = StdRng> {
    arrivals: Exp<f64>,
    services: Exp<f64>,
    rng: R,
}

impl ExponentialVariates<StdRng> {
    /// Seeded source. `None` draws the seed from OS entropy.
    pub fn new(params: &SimulationParameters, seed: Option<u64>) -> Result<Self, ConfigError> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(params, rng)
    }
}

impl<R: Rng> ExponentialVariates<R> {
    /// Source drawing from an existing generator.
    pub fn with_rng(params: &SimulationParameters, rng: R) -> Result<Self, ConfigError> {
        let arrivals = exponential("arrival_rate", params.arrival_rate)?;
        let services = exponential("service_rate", params.service_rate)?;

        Ok(Self {
            arrivals,
            services,
            rng,
        })
    }
}

fn exponential(name: &'static str, rate: f64) -> Result<Exp<f64>, ConfigError> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(ConfigError::InvalidRate { name, value: rate });
    }
    Exp::new(rate).map_err(|_| ConfigError::InvalidRate { name, value: rate })
}

impl<R: Rng + Debug + Send> VariateSource for ExponentialVariates<R> {
    fn inter_arrival(&mut self) -> f64 {
        self.arrivals.sample(&mut self.rng)
    }

    fn service_duration(&mut self) -> f64 {
        self.services.sample(&mut self.rng)
    }
}

/// Replays fixed sequences of durations.
///
/// Once a sequence runs dry it yields infinity: no further arrivals, and any
/// customer entering service never finishes.
#[derive(Debug, Clone, Default)]
pub struct ReplayVariates {
    inter_arrivals: VecDeque<f64>,
    services: VecDeque<f64>,
}

impl ReplayVariates {
    pub fn new(
        inter_arrivals: impl IntoIterator<Item = f64>,
        services: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            inter_arrivals: inter_arrivals.into_iter().collect(),
            services: services.into_iter().collect(),
        }
    }
}

impl VariateSource for ReplayVariates {
    fn inter_arrival(&mut self) -> f64 {
        self.inter_arrivals.pop_front().unwrap_or(f64::INFINITY)
    }

    fn service_duration(&mut self) -> f64 {
        self.services.pop_front().unwrap_or(f64::INFINITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_inter_arrival_matches_rate() {
        let params = SimulationParameters::new(10.0, 4.0, 1, 5);
        let mut variates = ExponentialVariates::new(&params, Some(42)).unwrap();

        let samples: Vec<f64> = (0..5_000).map(|_| variates.inter_arrival()).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let expected = 1.0 / params.arrival_rate;

        assert!(
            (mean - expected).abs() < expected * 0.1,
            "Mean {:.4} too far from expected {:.4}",
            mean,
            expected
        );
    }

    #[test]
    fn mean_service_time_matches_rate() {
        let params = SimulationParameters::new(10.0, 4.0, 1, 5);
        let mut variates = ExponentialVariates::new(&params, Some(7)).unwrap();

        let samples: Vec<f64> = (0..5_000).map(|_| variates.service_duration()).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let expected = 1.0 / params.service_rate;

        assert!((mean - expected).abs() < expected * 0.1);
        assert!(samples.iter().all(|s| *s >= 0.0));
    }

    #[test]
    fn same_seed_same_sequence() {
        let params = SimulationParameters::new(3.0, 5.0, 2, 5);
        let mut a = ExponentialVariates::new(&params, Some(99)).unwrap();
        let mut b = ExponentialVariates::new(&params, Some(99)).unwrap();

        for _ in 0..20 {
            assert_eq!(a.inter_arrival(), b.inter_arrival());
            assert_eq!(a.service_duration(), b.service_duration());
        }
    }

    #[test]
    fn rejects_invalid_rate() {
        let params = SimulationParameters::new(-1.0, 5.0, 2, 5);
        let err = ExponentialVariates::new(&params, Some(1)).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRate {
                name: "arrival_rate",
                ..
            }
        ));
    }

    #[test]
    fn replay_runs_dry_to_infinity() {
        let mut replay = ReplayVariates::new([1.0, 2.0], [0.5]);
        assert_eq!(replay.inter_arrival(), 1.0);
        assert_eq!(replay.inter_arrival(), 2.0);
        assert_eq!(replay.inter_arrival(), f64::INFINITY);
        assert_eq!(replay.service_duration(), 0.5);
        assert_eq!(replay.service_duration(), f64::INFINITY);
    }
}
