use log::debug;

use super::BudgetSample;
use crate::category::Category;
use crate::config::EngineConfig;
use crate::consumer::EventConsumer;
use crate::time::{Budget, Duration, Instant};
use crate::trace::TraceEvent;

/// Replays the periodic budget of the aperiodic server.
///
/// For every event (in trace order):
/// 1. if the event lies at or beyond the next replenishment boundary,
///    the boundary advances to the last multiple of the period not
///    after the event, the budget is reset to the capacity, and a
///    sample is emitted at the boundary;
/// 2. if the event is a server execution sample, the budget is reduced
///    by the per-quantum cost (never below zero) and a sample is
///    emitted at the event's time.
///
/// The resulting series is ordered by time and every value lies in
/// `[0, capacity]`.
#[derive(Debug, Clone)]
pub struct ServerBudgetSimulator {
    capacity: Budget,
    period: Duration,
    quantum_cost: Budget,
    epsilon: Duration,
    remaining: Budget,
    last_boundary: Instant,
    // Quanta consumed since the last boundary. Deriving the budget from
    // a count keeps the depleted value exact.
    consumed: u32,
    server_samples: usize,
    samples: Vec<BudgetSample>,
}

impl ServerBudgetSimulator {
    pub fn new(config: &EngineConfig) -> Self {
        assert!(config.period > 0.0);
        ServerBudgetSimulator {
            capacity: config.capacity,
            period: config.period,
            quantum_cost: config.quantum_cost,
            epsilon: config.epsilon,
            remaining: config.capacity,
            last_boundary: 0.0,
            consumed: 0,
            server_samples: 0,
            samples: vec![BudgetSample {
                time: 0.0,
                remaining: config.capacity,
            }],
        }
    }

    pub fn capacity(&self) -> Budget {
        self.capacity
    }

    /// The budget left at the most recent event.
    pub fn remaining(&self) -> Budget {
        self.remaining
    }

    /// The most recent replenishment boundary.
    pub fn last_boundary(&self) -> Instant {
        self.last_boundary
    }

    /// Number of server execution samples observed.
    pub fn server_samples(&self) -> usize {
        self.server_samples
    }

    pub fn samples(&self) -> &[BudgetSample] {
        &self.samples
    }

    /// The budget curve, or `None` if the server never executed.
    pub fn into_samples(self) -> Option<Vec<BudgetSample>> {
        if self.server_samples > 0 {
            Some(self.samples)
        } else {
            None
        }
    }

    fn replenish_if_due(&mut self, time: Instant) {
        // tolerate timestamps that drifted just below the boundary
        let t = time + self.epsilon;
        if t >= self.last_boundary + self.period {
            self.last_boundary = (t / self.period).floor() * self.period;
            self.remaining = self.capacity;
            self.consumed = 0;
            debug!(
                "server budget replenished to {} at {}",
                self.capacity, self.last_boundary
            );
            self.samples.push(BudgetSample {
                time: self.last_boundary,
                remaining: self.remaining,
            });
        }
    }

    fn consume_quantum(&mut self, time: Instant) {
        self.consumed = self.consumed.saturating_add(1);
        let left = self.capacity - self.quantum_cost * f64::from(self.consumed);
        self.remaining = if left < self.epsilon { 0.0 } else { left };
        self.server_samples += 1;
        // a drifted timestamp may precede the boundary it triggered
        self.samples.push(BudgetSample {
            time: time.max(self.last_boundary),
            remaining: self.remaining,
        });
    }
}

impl EventConsumer for ServerBudgetSimulator {
    fn consume(&mut self, event: &TraceEvent<'_>) {
        self.replenish_if_due(event.time);
        if event.kind.consumes_budget() && Category::from_description(event.description).is_server() {
            self.consume_quantum(event.time);
        }
    }
}
