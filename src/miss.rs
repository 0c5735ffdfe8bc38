/*! Collection of deadline misses.

Every `DEADLINE_MISS` record is kept verbatim. A task that misses a
deadline without ever having executed would otherwise have no track at
all; [DeadlineMissCollector::ensure_tracks] gives such tasks an empty
[Category::Failed] track so that the failure remains visible. */

use log::warn;

use crate::category::Category;
use crate::config::EngineConfig;
use crate::consumer::EventConsumer;
use crate::time::Instant;
use crate::trace::{EventKind, TaskId, TraceEvent};
use crate::track::TrackSet;

/// A deadline miss reported by the simulator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DeadlineMissRecord {
    pub time: Instant,
    pub task_id: TaskId,
}

/// Gathers the deadline misses of a trace, in trace order.
#[derive(Debug, Clone)]
pub struct DeadlineMissCollector {
    idle_task: String,
    misses: Vec<DeadlineMissRecord>,
}

impl DeadlineMissCollector {
    pub fn new(config: &EngineConfig) -> Self {
        DeadlineMissCollector {
            idle_task: config.idle_task.clone(),
            misses: Vec::new(),
        }
    }

    pub fn misses(&self) -> &[DeadlineMissRecord] {
        &self.misses
    }

    /// Make sure every task that missed a deadline has a track,
    /// creating empty [Category::Failed] tracks where needed.
    ///
    /// Returns the number of tracks created.
    pub fn ensure_tracks(&self, tracks: &mut TrackSet) -> usize {
        self.misses
            .iter()
            .filter(|m| tracks.ensure(m.task_id.as_str(), Category::Failed))
            .count()
    }

    pub fn into_misses(self) -> Vec<DeadlineMissRecord> {
        self.misses
    }
}

impl EventConsumer for DeadlineMissCollector {
    fn consume(&mut self, event: &TraceEvent<'_>) {
        if event.kind == EventKind::DeadlineMiss {
            if event.task_id == self.idle_task {
                warn!("deadline miss at {} attributed to the idle task", event.time);
            }
            self.misses.push(DeadlineMissRecord {
                time: event.time,
                task_id: TaskId::from(event.task_id),
            });
        }
    }
}
