/*! Per-task execution intervals reconstructed from quantum samples.

The simulator samples the running task once per quantum, so a task
that executes contiguously for `n` quanta shows up as `n` records. The
[IntervalReconstructor] merges such runs into single [Interval]s, which
are collected per task in a [TaskTrack]. */

use std::collections::btree_map::{self, BTreeMap};

use crate::category::Category;
use crate::time::{adjoins, Duration, Instant};
use crate::trace::TaskId;

/// A contiguous stretch of execution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interval {
    pub start: Instant,
    pub duration: Duration,
}

impl Interval {
    pub fn new(start: Instant, duration: Duration) -> Self {
        Interval { start, duration }
    }

    /// The (exclusive) point in time at which the interval ends.
    pub fn end(&self) -> Instant {
        self.start + self.duration
    }
}

/// The reconstructed execution history of a single task.
///
/// **Invariant**: `intervals` is strictly ascending by start time and
/// pairwise non-overlapping, and each interval spans at least one
/// quantum.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TaskTrack {
    pub task_id: TaskId,
    pub category: Category,
    /// The raw trace description the category was derived from.
    pub label: String,
    pub intervals: Vec<Interval>,
}

impl TaskTrack {
    /// A track without any execution.
    pub fn new(task_id: TaskId, category: Category) -> Self {
        TaskTrack {
            task_id,
            category,
            label: category.label().to_string(),
            intervals: Vec::new(),
        }
    }

    /// Account for one execution sample of length `quantum` at time
    /// `time`, extending the last interval if the sample follows it
    /// within `epsilon`.
    pub fn record_sample(&mut self, time: Instant, quantum: Duration, epsilon: Duration) {
        match self.intervals.last_mut() {
            Some(last) if adjoins(last.end(), time, epsilon) => last.duration += quantum,
            _ => self.intervals.push(Interval::new(time, quantum)),
        }
    }

    /// Did the task execute at all?
    pub fn has_executed(&self) -> bool {
        !self.intervals.is_empty()
    }

    /// The end of the last interval, if any.
    pub fn last_end(&self) -> Option<Instant> {
        self.intervals.last().map(Interval::end)
    }

    /// Total execution time accounted to the task.
    pub fn busy_time(&self) -> Duration {
        self.intervals.iter().map(|i| i.duration).sum()
    }
}

/// The set of tracks of a trace, keyed by task id.
///
/// Tracks are created lazily on first reference to a task id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackSet {
    tracks: BTreeMap<TaskId, TaskTrack>,
}

impl TrackSet {
    pub fn new() -> Self {
        TrackSet::default()
    }

    /// Look up the track of `task_id`, creating an empty, unclassified
    /// one if it does not exist yet.
    pub fn get_or_insert(&mut self, task_id: &str) -> &mut TaskTrack {
        self.tracks
            .entry(TaskId::from(task_id))
            .or_insert_with_key(|id| TaskTrack::new(id.clone(), Category::Unknown))
    }

    /// Create an empty track of the given `category` for `task_id`
    /// unless one already exists. Returns whether a track was created.
    pub fn ensure(&mut self, task_id: &str, category: Category) -> bool {
        if self.tracks.contains_key(task_id) {
            false
        } else {
            let id = TaskId::from(task_id);
            self.tracks.insert(id.clone(), TaskTrack::new(id, category));
            true
        }
    }

    pub fn get(&self, task_id: &str) -> Option<&TaskTrack> {
        self.tracks.get(task_id)
    }

    pub fn get_mut(&mut self, task_id: &str) -> Option<&mut TaskTrack> {
        self.tracks.get_mut(task_id)
    }

    pub fn contains(&self, task_id: &str) -> bool {
        self.tracks.contains_key(task_id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskTrack> {
        self.tracks.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut TaskTrack> {
        self.tracks.values_mut()
    }
}

impl IntoIterator for TrackSet {
    type Item = TaskTrack;
    type IntoIter = btree_map::IntoValues<TaskId, TaskTrack>;

    fn into_iter(self) -> Self::IntoIter {
        self.tracks.into_values()
    }
}

mod reconstruct;

pub use reconstruct::IntervalReconstructor;

#[cfg(test)]
mod tests;
