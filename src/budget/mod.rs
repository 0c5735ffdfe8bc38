/*! Replay of the aperiodic server's budget.

The trace does not record the server's budget, so the
[ServerBudgetSimulator] reconstructs it from a simple periodic-budget
model: the budget starts at the capacity `C`, every server execution
sample consumes a fixed cost, and the budget is reset to `C` at every
multiple of the period `T`.

The model parameters are taken from the
[EngineConfig][crate::config::EngineConfig] and are not inferred from
the simulator's own server configuration. */

use crate::time::{Budget, Instant};

/// Remaining server budget at a point in time.
///
/// A sequence of samples describes a step function: the budget stays
/// at `remaining` until the time of the next sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BudgetSample {
    pub time: Instant,
    pub remaining: Budget,
}

/// Evaluate the step function described by `samples` at time `t`.
///
/// Returns `None` if `t` precedes the first sample.
pub fn remaining_at(samples: &[BudgetSample], t: Instant) -> Option<Budget> {
    let n = samples.partition_point(|s| s.time <= t);
    n.checked_sub(1).map(|i| samples[i].remaining)
}

mod simulator;

pub use simulator::ServerBudgetSimulator;
