// src/model/customer.rs

use crate::model::server_pool::AdmissionDecision;
use crate::simulation::process::{ProcessContext, Step};
use tracing::trace;

/// One arriving customer. Only lives as long as its process.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: u64,
    pub arrival_time: f64,
    /// Set when a server is granted.
    pub wait_time: Option<f64>,
    /// Set when a server is granted.
    pub service_duration: Option<f64>,
}

impl Customer {
    pub fn new(id: u64, arrival_time: f64) -> Self {
        Self {
            id,
            arrival_time,
            wait_time: None,
            service_duration: None,
        }
    }
}

/// Where a customer is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerState {
    Arrived,
    Rejected,
    Queued,
    InService,
    Departed,
}

/// Lifecycle of a single customer:
/// `Arrived -> {Rejected | Queued} -> InService -> Departed`.
#[derive(Debug, Clone)]
pub struct CustomerProcess {
    customer: Customer,
    state: CustomerState,
}

impl CustomerProcess {
    pub fn new(customer: Customer) -> Self {
        Self {
            customer,
            state: CustomerState::Arrived,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn state(&self) -> CustomerState {
        self.state
    }

    pub fn resume(&mut self, ctx: &mut ProcessContext<'_>) -> Step {
        match self.state {
            CustomerState::Arrived => match ctx.pool.admit_check() {
                AdmissionDecision::Reject => {
                    trace!(customer = self.customer.id, t = ctx.now, "rejected");
                    ctx.metrics.record_rejection();
                    self.state = CustomerState::Rejected;
                    Step::Exit
                }
                AdmissionDecision::Admit => {
                    self.state = CustomerState::Queued;
                    Step::Acquire
                }
            },
            CustomerState::Queued => {
                let wait_time = ctx.now - self.customer.arrival_time;
                let service_duration = ctx.variates.service_duration();
                trace!(
                    customer = self.customer.id,
                    t = ctx.now,
                    wait_time,
                    service_duration,
                    "service started"
                );

                self.customer.wait_time = Some(wait_time);
                self.customer.service_duration = Some(service_duration);
                self.state = CustomerState::InService;
                Step::Timeout(service_duration)
            }
            CustomerState::InService => {
                let wait_time = self.customer.wait_time.unwrap_or_default();
                let service_duration = self.customer.service_duration.unwrap_or_default();
                trace!(customer = self.customer.id, t = ctx.now, "departed");

                ctx.metrics.record_departure(wait_time, service_duration);
                self.state = CustomerState::Departed;
                Step::Release
            }
            CustomerState::Rejected | CustomerState::Departed => Step::Exit,
        }
    }
}
