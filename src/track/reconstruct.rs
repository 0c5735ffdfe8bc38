use log::debug;

use super::{TaskTrack, TrackSet};
use crate::config::EngineConfig;
use crate::consumer::EventConsumer;
use crate::time::Duration;
use crate::trace::TraceEvent;

/// Coalesces consecutive execution samples of the same task into
/// contiguous intervals.
///
/// A sample at time `t` extends the task's last interval if
/// `t - (start + duration) < epsilon`; otherwise it opens a new
/// interval of one quantum. The tolerance absorbs the drift of
/// timestamps that the simulator accumulates in quantum-sized
/// floating-point steps.
#[derive(Debug, Clone)]
pub struct IntervalReconstructor {
    quantum: Duration,
    epsilon: Duration,
    tracks: TrackSet,
    samples: usize,
}

impl IntervalReconstructor {
    pub fn new(config: &EngineConfig) -> Self {
        IntervalReconstructor {
            quantum: config.quantum,
            epsilon: config.epsilon,
            tracks: TrackSet::new(),
            samples: 0,
        }
    }

    /// The tracks reconstructed so far.
    pub fn tracks(&self) -> &TrackSet {
        &self.tracks
    }

    /// The track of `task_id`, if the task executed at all.
    pub fn track(&self, task_id: &str) -> Option<&TaskTrack> {
        self.tracks.get(task_id)
    }

    /// Number of execution samples observed.
    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn into_tracks(self) -> TrackSet {
        debug!(
            "merged {} execution samples into {} intervals across {} tasks",
            self.samples,
            self.tracks.iter().map(|t| t.intervals.len()).sum::<usize>(),
            self.tracks.len()
        );
        self.tracks
    }
}

impl EventConsumer for IntervalReconstructor {
    fn consume(&mut self, event: &TraceEvent<'_>) {
        if event.kind.is_execution() {
            self.samples += 1;
            self.tracks
                .get_or_insert(event.task_id)
                .record_sample(event.time, self.quantum, self.epsilon);
        }
    }
}
