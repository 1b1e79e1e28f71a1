// src/model/arrivals.rs

use crate::model::customer::{Customer, CustomerProcess};
use crate::simulation::process::{ProcessContext, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GeneratorState {
    /// Not yet started: the first gap has not been drawn.
    Start,
    /// Sleeping until the next arrival.
    Waiting,
    /// A customer was just spawned; sample occupancy next.
    Spawned,
}

/// Unbounded process that injects customers at exponential intervals.
///
/// After each spawn it records the number of customers in the system. The
/// new customer has not reached the pool yet, so the sample is the occupancy
/// the arrival found. Samples are taken only at arrival instants and are
/// biased towards busy periods.
#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    state: GeneratorState,
    next_id: u64,
}

impl ArrivalGenerator {
    pub fn new() -> Self {
        Self {
            state: GeneratorState::Start,
            next_id: 0,
        }
    }

    pub fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Step {
        match self.state {
            GeneratorState::Start => self.sleep(ctx),
            GeneratorState::Waiting => {
                self.next_id += 1;
                self.state = GeneratorState::Spawned;
                Step::Spawn(CustomerProcess::new(Customer::new(self.next_id, ctx.now)))
            }
            GeneratorState::Spawned => {
                ctx.metrics.record_queue_length(ctx.pool.occupancy());
                self.sleep(ctx)
            }
        }
    }

    fn sleep(&mut self, ctx: &mut ProcessContext<'_>) -> Step {
        self.state = GeneratorState::Waiting;
        Step::Timeout(ctx.variates.inter_arrival())
    }
}

impl Default for ArrivalGenerator {
    fn default() -> Self {
        Self::new()
    }
}
