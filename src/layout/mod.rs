/*! The renderable timeline model.

A [LayoutModel] is the single artifact handed to a renderer: the tracks
of all tasks in display order (each placed in its own [Lane]), the
deadline misses, the optional server budget curve, the horizontal
extent of the timeline and the legend. It is built once per trace by
the [TimelineLayoutBuilder] and never modified afterwards. */

use std::collections::BTreeSet;

use crate::budget::{self, BudgetSample};
use crate::category::Category;
use crate::miss::DeadlineMissRecord;
use crate::policy::ServerPolicy;
use crate::time::{Budget, Duration, Instant};
use crate::track::TaskTrack;

/// The vertical slot occupied by one track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lane {
    /// Position of the lane in display order, starting at zero.
    pub index: usize,
    /// Lower edge of the bar.
    pub offset: f64,
    /// Height of the bar.
    pub height: f64,
}

impl Lane {
    /// Vertical middle of the bar, where labels and miss markers go.
    pub fn center(&self) -> f64 {
        self.offset + self.height / 2.0
    }
}

/// A track together with the lane it is drawn in.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlacedTrack {
    pub track: TaskTrack,
    pub lane: Lane,
}

/// One entry of the legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LegendEntry {
    Category(Category),
    DeadlineMiss,
}

/// The categories present in a layout, plus whether misses occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Legend {
    categories: BTreeSet<Category>,
    deadline_miss: bool,
}

impl Legend {
    pub fn new(categories: impl IntoIterator<Item = Category>, deadline_miss: bool) -> Self {
        Legend {
            categories: categories.into_iter().collect(),
            deadline_miss,
        }
    }

    /// Is `category` used by at least one track?
    pub fn contains(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn has_deadline_miss(&self) -> bool {
        self.deadline_miss
    }

    /// The legend entries in display order: categories in declaration
    /// order, followed by the miss marker if there are misses.
    pub fn entries(&self) -> impl Iterator<Item = LegendEntry> + '_ {
        self.categories
            .iter()
            .copied()
            .map(LegendEntry::Category)
            .chain(self.deadline_miss.then(|| LegendEntry::DeadlineMiss))
    }

    pub fn len(&self) -> usize {
        self.categories.len() + self.deadline_miss as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The complete, immutable timeline of one trace.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct LayoutModel {
    /// Tracks in display order.
    pub tracks: Vec<PlacedTrack>,
    /// Deadline misses in trace order.
    pub misses: Vec<DeadlineMissRecord>,
    /// Server budget curve, if the server executed at all.
    pub budget: Option<Vec<BudgetSample>>,
    /// Capacity of the server budget model.
    pub server_capacity: Budget,
    /// Latest point in time covered by any interval or miss.
    pub time_bound: Instant,
    pub legend: Legend,
    /// Aperiodic-service policy of the run, if known.
    pub policy: Option<ServerPolicy>,
}

impl LayoutModel {
    /// Does the layout contain no tracks at all?
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn track(&self, task_id: &str) -> Option<&TaskTrack> {
        self.placed(task_id).map(|p| &p.track)
    }

    pub fn lane_of(&self, task_id: &str) -> Option<Lane> {
        self.placed(task_id).map(|p| p.lane)
    }

    fn placed(&self, task_id: &str) -> Option<&PlacedTrack> {
        self.tracks.iter().find(|p| p.track.task_id == *task_id)
    }

    /// Positions `(time, lane center)` of the miss markers. Misses of
    /// tasks without a lane are not drawn.
    pub fn miss_markers(&self) -> impl Iterator<Item = (Instant, f64)> + '_ {
        self.misses.iter().filter_map(move |m| {
            self.lane_of(m.task_id.as_str())
                .map(|lane| (m.time, lane.center()))
        })
    }

    /// Right end of the time axis, leaving `margin` after the bound.
    pub fn axis_limit(&self, margin: Duration) -> Instant {
        self.time_bound + margin
    }

    /// Total height spanned by all lanes.
    pub fn height(&self) -> f64 {
        self.tracks
            .last()
            .map(|p| p.lane.offset + p.lane.height)
            .unwrap_or(0.0)
    }

    /// Remaining server budget at time `t`, if a budget curve exists.
    pub fn budget_at(&self, t: Instant) -> Option<Budget> {
        self.budget
            .as_deref()
            .and_then(|samples| budget::remaining_at(samples, t))
    }
}

mod builder;

pub use builder::TimelineLayoutBuilder;
