// src/simulation/metrics.rs

use crate::simulation::config::SimulationParameters;
use serde::Serialize;

/// Waits at or below this are counted towards the service level.
pub const ACCEPTABLE_WAIT: f64 = 5.0;

/// Column names of a [`SimulationResult`] row, in output order.
pub const COLUMNS: [&str; 17] = [
    "arrival_rate",
    "service_rate",
    "num_servers",
    "queue_capacity",
    "simulation_time",
    "avg_wait_time",
    "max_wait_time",
    "std_wait_time",
    "avg_queue_length",
    "max_queue_length",
    "avg_service_time",
    "customers_served",
    "customers_rejected",
    "rejection_rate",
    "throughput",
    "utilization",
    "service_level",
];

/// One row of the output dataset: the inputs of a run followed by its
/// derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub arrival_rate: f64,
    pub service_rate: f64,
    pub num_servers: usize,
    pub queue_capacity: usize,
    pub simulation_time: f64,

    pub avg_wait_time: f64,
    pub max_wait_time: f64,
    pub std_wait_time: f64,
    pub avg_queue_length: f64,
    pub max_queue_length: usize,
    pub avg_service_time: f64,
    pub customers_served: u64,
    pub customers_rejected: u64,
    pub rejection_rate: f64,
    pub throughput: f64,
    /// Percentage of total server time spent serving.
    pub utilization: f64,
    /// Percentage of served customers that waited at most [`ACCEPTABLE_WAIT`].
    pub service_level: f64,
}

impl SimulationResult {
    /// The configuration this row was produced from.
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            arrival_rate: self.arrival_rate,
            service_rate: self.service_rate,
            num_servers: self.num_servers,
            queue_capacity: self.queue_capacity,
            simulation_time: self.simulation_time,
        }
    }
}

/// Collects raw observations during a run.
#[derive(Debug, Clone, Default)]
pub struct MetricsAggregator {
    wait_times: Vec<f64>,
    queue_lengths: Vec<usize>,
    service_times: Vec<f64>,
    served: u64,
    rejected: u64,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A customer finished service.
    pub fn record_departure(&mut self, wait_time: f64, service_duration: f64) {
        self.wait_times.push(wait_time);
        self.service_times.push(service_duration);
        self.served += 1;
    }

    pub fn record_rejection(&mut self) {
        self.rejected += 1;
    }

    pub fn record_queue_length(&mut self, occupancy: usize) {
        self.queue_lengths.push(occupancy);
    }

    pub fn served(&self) -> u64 {
        self.served
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }

    pub fn wait_times(&self) -> &[f64] {
        &self.wait_times
    }

    pub fn service_times(&self) -> &[f64] {
        &self.service_times
    }

    pub fn queue_lengths(&self) -> &[usize] {
        &self.queue_lengths
    }

    /// Reduce everything to the summary record for `params`.
    pub fn summarize(&self, params: &SimulationParameters) -> SimulationResult {
        let horizon = params.simulation_time;
        let queue_lengths: Vec<f64> = self.queue_lengths.iter().map(|q| *q as f64).collect();

        let attempted = self.served + self.rejected;
        let rejection_rate = if attempted > 0 {
            self.rejected as f64 / attempted as f64
        } else {
            0.0
        };

        let throughput = if horizon > 0.0 {
            self.served as f64 / horizon
        } else {
            0.0
        };

        let utilization = if self.served > 0 && horizon > 0.0 {
            let busy: f64 = self.service_times.iter().sum();
            busy / (horizon * params.num_servers as f64) * 100.0
        } else {
            0.0
        };

        let service_level = if self.served > 0 {
            let on_time = self
                .wait_times
                .iter()
                .filter(|w| **w <= ACCEPTABLE_WAIT)
                .count();
            on_time as f64 / self.served as f64 * 100.0
        } else {
            0.0
        };

        SimulationResult {
            arrival_rate: params.arrival_rate,
            service_rate: params.service_rate,
            num_servers: params.num_servers,
            queue_capacity: params.queue_capacity,
            simulation_time: horizon,

            avg_wait_time: mean(&self.wait_times),
            max_wait_time: max(&self.wait_times),
            std_wait_time: std_dev(&self.wait_times),
            avg_queue_length: mean(&queue_lengths),
            max_queue_length: self.queue_lengths.iter().copied().max().unwrap_or(0),
            avg_service_time: mean(&self.service_times),
            customers_served: self.served,
            customers_rejected: self.rejected,
            rejection_rate,
            throughput,
            utilization,
            service_level,
        }
    }
}

/// Arithmetic mean, 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Largest value, 0.0 for an empty slice.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(0.0)
}

/// Population standard deviation, 0.0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
