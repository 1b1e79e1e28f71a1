// src/model/server_pool.rs

use crate::error::PoolError;
use crate::simulation::scheduler::ProcessId;
use std::collections::VecDeque;

/// Outcome of the admission check for a new arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    Admit,
    /// The wait line is already full.
    Reject,
}

/// Outcome of a request for a server slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    /// A slot was free and is now held by the requester.
    Granted,
    /// The requester joined the back of the wait line.
    Queued,
}

/// `c` identical servers in front of a FIFO wait line holding at most `q`.
#[derive(Debug, Clone)]
pub struct BoundedServerPool {
    num_servers: usize,
    queue_capacity: usize,
    in_service: usize,
    waiting: VecDeque<ProcessId>,
}

impl BoundedServerPool {
    pub fn new(num_servers: usize, queue_capacity: usize) -> Self {
        Self {
            num_servers,
            queue_capacity,
            in_service: 0,
            waiting: VecDeque::with_capacity(queue_capacity),
        }
    }

    /// Decide whether a new arrival may enter the system.
    ///
    /// Only the wait line is consulted. With `q = 0` every arrival is turned
    /// away, idle servers or not.
    pub fn admit_check(&self) -> AdmissionDecision {
        if self.waiting.len() < self.queue_capacity {
            AdmissionDecision::Admit
        } else {
            AdmissionDecision::Reject
        }
    }

    /// Take a free slot or join the wait line.
    pub fn request(&mut self, process: ProcessId) -> Result<Grant, PoolError> {
        if self.has_free_server() {
            self.in_service += 1;
            return Ok(Grant::Granted);
        }

        if self.waiting.len() >= self.queue_capacity {
            return Err(PoolError::WaitLineFull {
                capacity: self.queue_capacity,
            });
        }

        self.waiting.push_back(process);
        Ok(Grant::Queued)
    }

    /// Free one slot. If anyone is waiting, the earliest waiter takes the slot
    /// straight away and is returned so it can be woken.
    pub fn release(&mut self) -> Option<ProcessId> {
        match self.waiting.pop_front() {
            Some(next) => Some(next),
            None => {
                self.in_service = self.in_service.saturating_sub(1);
                None
            }
        }
    }

    pub fn in_service(&self) -> usize {
        self.in_service
    }

    pub fn waiting(&self) -> usize {
        self.waiting.len()
    }

    /// Customers in the system: in service plus waiting.
    pub fn occupancy(&self) -> usize {
        self.in_service + self.waiting.len()
    }

    fn has_free_server(&self) -> bool {
        self.in_service < self.num_servers
    }
}
