use std::cmp::Ordering;

use itertools::Itertools;
use log::debug;

use super::{Lane, LayoutModel, Legend, PlacedTrack};
use crate::budget::BudgetSample;
use crate::config::EngineConfig;
use crate::miss::DeadlineMissRecord;
use crate::policy::ServerPolicy;
use crate::time::{Budget, Instant};
use crate::track::{Interval, TaskTrack, TrackSet};

/// Orders tracks into lanes and derives axis bounds and the legend.
///
/// Display order is ascending by numeric task id. The idle task is
/// left out, the aggregate (server) task always comes last, and ids
/// that are not numbers sort after all numeric ids but before the
/// aggregate task.
#[derive(Debug, Clone)]
pub struct TimelineLayoutBuilder {
    idle_task: String,
    aggregate_task: String,
    lane_pitch: f64,
    lane_height: f64,
    server_capacity: Budget,
    policy: Option<ServerPolicy>,
}

impl TimelineLayoutBuilder {
    pub fn new(config: &EngineConfig) -> Self {
        TimelineLayoutBuilder {
            idle_task: config.idle_task.clone(),
            aggregate_task: config.aggregate_task.clone(),
            lane_pitch: config.lane_pitch,
            lane_height: config.lane_height,
            server_capacity: config.capacity,
            policy: None,
        }
    }

    /// Label the layout with the policy the trace was produced with.
    pub fn with_policy(mut self, policy: ServerPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Sort key of a task id: numeric ids first (by value), then other
    /// ids, then the aggregate task. Ties are broken by the raw id to
    /// keep the order total.
    fn sort_key<'a>(&self, task_id: &'a str) -> (u8, i64, &'a str) {
        if task_id == self.aggregate_task {
            (2, 0, task_id)
        } else {
            match task_id.parse::<i64>() {
                Ok(n) => (0, n, task_id),
                Err(_) => (1, 0, task_id),
            }
        }
    }

    fn compare(&self, a: &TaskTrack, b: &TaskTrack) -> Ordering {
        self.sort_key(a.task_id.as_str())
            .cmp(&self.sort_key(b.task_id.as_str()))
    }

    fn lane(&self, index: usize) -> Lane {
        Lane {
            index,
            offset: index as f64 * self.lane_pitch,
            height: self.lane_height,
        }
    }

    /// Assemble the layout.
    pub fn build(
        &self,
        tracks: TrackSet,
        misses: Vec<DeadlineMissRecord>,
        budget: Option<Vec<BudgetSample>>,
    ) -> LayoutModel {
        let placed: Vec<PlacedTrack> = tracks
            .into_iter()
            .filter(|t| t.task_id != *self.idle_task.as_str())
            .sorted_by(|a, b| self.compare(a, b))
            .enumerate()
            .map(|(i, track)| PlacedTrack {
                track,
                lane: self.lane(i),
            })
            .collect();

        let time_bound = placed
            .iter()
            .flat_map(|p| p.track.intervals.iter().map(Interval::end))
            .chain(misses.iter().map(|m| m.time))
            .fold(0.0, Instant::max);

        let legend = Legend::new(
            placed.iter().map(|p| p.track.category),
            !misses.is_empty(),
        );

        debug!(
            "laid out {} tracks up to t={} with {} legend entries",
            placed.len(),
            time_bound,
            legend.len()
        );

        LayoutModel {
            tracks: placed,
            misses,
            budget,
            server_capacity: self.server_capacity,
            time_bound,
            legend,
            policy: self.policy,
        }
    }
}
