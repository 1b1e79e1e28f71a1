// src/simulation/process.rs

use crate::model::arrivals::ArrivalGenerator;
use crate::model::customer::CustomerProcess;
use crate::model::server_pool::BoundedServerPool;
use crate::simulation::metrics::MetricsAggregator;
use crate::simulation::variates::VariateSource;

/// What a process asks the engine to do when it hands back control.
#[derive(Debug)]
pub enum Step {
    /// Suspend for this many units of logical time.
    Timeout(f64),
    /// Suspend until a server slot is granted.
    Acquire,
    /// Schedule a new customer at this instant and keep running the caller.
    Spawn(CustomerProcess),
    /// Give back the held server slot and finish.
    Release,
    /// Finish without holding anything.
    Exit,
}

/// The shared run state a process may look at while it is running.
///
/// Only one process runs at a time, so plain references are enough.
pub struct ProcessContext<'a> {
    pub now: f64,
    pub pool: &'a BoundedServerPool,
    pub variates: &'a mut dyn VariateSource,
    pub metrics: &'a mut MetricsAggregator,
}

/// Every kind of process the engine schedules.
#[derive(Debug)]
pub enum Process {
    Arrivals(ArrivalGenerator),
    Customer(CustomerProcess),
}

impl Process {
    /// Run until the next suspension point.
    pub fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Step {
        match self {
            Process::Arrivals(generator) => generator.resume(ctx),
            Process::Customer(customer) => customer.resume(ctx),
        }
    }

    pub fn is_customer(&self) -> bool {
        matches!(self, Process::Customer(_))
    }
}
