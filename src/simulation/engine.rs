// src/simulation/engine.rs

use crate::error::SimulationError;
use crate::model::arrivals::ArrivalGenerator;
use crate::model::server_pool::{BoundedServerPool, Grant};
use crate::simulation::config::SimulationParameters;
use crate::simulation::metrics::{MetricsAggregator, SimulationResult};
use crate::simulation::process::{Process, ProcessContext, Step};
use crate::simulation::scheduler::{ProcessId, Scheduler};
use crate::simulation::variates::VariateSource;
use std::collections::HashMap;
use tracing::debug;

/// One discrete-event run of a multi-server queue with a bounded wait line.
///
/// Processes are resumed one at a time in logical-time order. When the
/// horizon is reached every process still in flight is abandoned and only
/// completed customers and rejections count.
#[derive(Debug)]
pub struct QueueSimulation<V: VariateSource> {
    params: SimulationParameters,
    scheduler: Scheduler,
    pool: BoundedServerPool,
    variates: V,
    metrics: MetricsAggregator,
    // Live processes only. A process is taken out while it runs.
    processes: HashMap<ProcessId, Process>,
    next_process: ProcessId,
    arrivals: u64,
    finished: bool,
}

impl<V: VariateSource> QueueSimulation<V> {
    /// Builds a run, rejecting invalid parameters up front.
    pub fn new(params: SimulationParameters, variates: V) -> Result<Self, SimulationError> {
        params.validate()?;

        let mut simulation = Self {
            params,
            scheduler: Scheduler::new(),
            pool: BoundedServerPool::new(params.num_servers, params.queue_capacity),
            variates,
            metrics: MetricsAggregator::new(),
            processes: HashMap::new(),
            next_process: 0,
            arrivals: 0,
            finished: false,
        };

        let generator = simulation.spawn(Process::Arrivals(ArrivalGenerator::new()));
        simulation.scheduler.wake(generator);

        Ok(simulation)
    }

    /// Current logical time.
    pub fn now(&self) -> f64 {
        self.scheduler.now()
    }

    /// Customers generated so far.
    pub fn arrivals(&self) -> u64 {
        self.arrivals
    }

    /// Customers generated but neither departed nor rejected.
    pub fn in_flight(&self) -> usize {
        self.processes.values().filter(|p| p.is_customer()).count()
    }

    pub fn pool(&self) -> &BoundedServerPool {
        &self.pool
    }

    pub fn metrics(&self) -> &MetricsAggregator {
        &self.metrics
    }

    /// Processes every resumption before the horizon. Calling it again after
    /// the horizon has been reached does nothing.
    pub fn run_to_horizon(&mut self) -> Result<(), SimulationError> {
        if self.finished {
            return Ok(());
        }

        let horizon = self.params.simulation_time;
        while let Some(process) = self.scheduler.next_before(horizon) {
            self.drive(process)?;
        }

        debug!(
            abandoned = self.scheduler.pending(),
            in_flight = self.in_flight(),
            "horizon reached"
        );
        self.scheduler.finish_at(horizon);
        self.finished = true;

        Ok(())
    }

    /// Runs to the horizon and reduces the run to its summary record.
    pub fn run(mut self) -> Result<SimulationResult, SimulationError> {
        self.run_to_horizon()?;
        Ok(self.summarize())
    }

    /// Summary of everything observed so far.
    pub fn summarize(&self) -> SimulationResult {
        let result = self.metrics.summarize(&self.params);
        debug!(
            arrivals = self.arrivals,
            served = result.customers_served,
            rejected = result.customers_rejected,
            utilization = result.utilization,
            "simulation complete"
        );
        result
    }

    fn spawn(&mut self, process: Process) -> ProcessId {
        let id = self.next_process;
        self.next_process += 1;
        self.processes.insert(id, process);
        id
    }

    /// Resumes `id` and keeps applying its steps until it suspends or ends.
    fn drive(&mut self, id: ProcessId) -> Result<(), SimulationError> {
        let Some(mut process) = self.processes.remove(&id) else {
            return Ok(());
        };

        loop {
            let step = process.resume(&mut ProcessContext {
                now: self.scheduler.now(),
                pool: &self.pool,
                variates: &mut self.variates,
                metrics: &mut self.metrics,
            });

            match step {
                Step::Timeout(duration) => {
                    self.scheduler.timeout(id, duration);
                    break;
                }
                Step::Acquire => match self.pool.request(id)? {
                    Grant::Granted => continue,
                    Grant::Queued => break,
                },
                // The child starts at this instant, after its parent suspends.
                Step::Spawn(customer) => {
                    self.arrivals += 1;
                    let child = self.spawn(Process::Customer(customer));
                    self.scheduler.wake(child);
                }
                Step::Release => {
                    if let Some(next) = self.pool.release() {
                        self.scheduler.wake(next);
                    }
                    return Ok(());
                }
                Step::Exit => return Ok(()),
            }
        }

        self.processes.insert(id, process);
        Ok(())
    }
}

/// Runs one simulation to completion.
pub fn simulate<V: VariateSource>(
    params: SimulationParameters,
    variates: V,
) -> Result<SimulationResult, SimulationError> {
    QueueSimulation::new(params, variates)?.run()
}
