/*! Explicit configuration of the reconstruction engine.

All constants that shape the reconstruction (the sampling quantum, the
merge tolerance, the server budget model, the reserved task ids and the
lane geometry) live in [EngineConfig], which is handed to the
[Engine][crate::engine::Engine] and to each component at construction
time. */

use crate::error::TraceError;
use crate::time::{Budget, Duration};

/// Configuration of a single reconstruction run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Duration represented by one execution sample in the trace.
    pub quantum: Duration,
    /// Tolerance used when deciding whether two samples are adjacent
    /// and whether a replenishment boundary has been reached.
    pub epsilon: Duration,
    /// Budget capacity of the aperiodic server.
    pub capacity: Budget,
    /// Replenishment period of the aperiodic server.
    pub period: Duration,
    /// Budget consumed by one server execution sample.
    pub quantum_cost: Budget,
    /// Task id the simulator uses for idle ticks.
    pub idle_task: String,
    /// Task id the simulator uses for the aperiodic server.
    pub aggregate_task: String,
    /// Field separator of trace records.
    pub delimiter: char,
    /// Number of leading header lines that are always discarded.
    pub header_lines: usize,
    /// Vertical distance between two consecutive lanes.
    pub lane_pitch: f64,
    /// Height of the bar drawn within a lane.
    pub lane_height: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        // The server model is deliberately fixed at C = 2.0, T = 5.0
        // and is not derived from the simulator's task set.
        EngineConfig {
            quantum: 0.1,
            epsilon: 1e-4,
            capacity: 2.0,
            period: 5.0,
            quantum_cost: 0.1,
            idle_task: "-1".to_string(),
            aggregate_task: "999".to_string(),
            delimiter: '\t',
            header_lines: 2,
            lane_pitch: 10.0,
            lane_height: 9.0,
        }
    }
}

impl EngineConfig {
    /// Override the server budget model with capacity `capacity`
    /// replenished every `period` time units.
    pub fn with_server(mut self, capacity: Budget, period: Duration) -> Self {
        self.capacity = capacity;
        self.period = period;
        self
    }

    /// Override the reserved idle and aggregate task ids.
    pub fn with_sentinels(mut self, idle: impl Into<String>, aggregate: impl Into<String>) -> Self {
        self.idle_task = idle.into();
        self.aggregate_task = aggregate.into();
        self
    }

    /// Override the lane geometry, where `height <= pitch`.
    pub fn with_lanes(mut self, pitch: f64, height: f64) -> Self {
        self.lane_pitch = pitch;
        self.lane_height = height;
        self
    }

    /// Reject configurations under which the reconstruction is meaningless.
    pub fn validate(&self) -> Result<(), TraceError> {
        let reject = |reason: &str| {
            Err(TraceError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        if !(self.quantum > 0.0) {
            return reject("quantum must be positive");
        }
        if !(self.epsilon > 0.0) || self.epsilon >= self.quantum {
            return reject("epsilon must be positive and smaller than the quantum");
        }
        if !(self.period > 0.0) {
            return reject("server period must be positive");
        }
        if !(self.capacity >= 0.0) || !(self.quantum_cost >= 0.0) {
            return reject("server capacity and quantum cost must not be negative");
        }
        if !(self.lane_height > 0.0) || self.lane_height > self.lane_pitch {
            return reject("lane height must be positive and at most the lane pitch");
        }
        if self.idle_task == self.aggregate_task {
            return reject("idle and aggregate task ids must differ");
        }
        Ok(())
    }
}
