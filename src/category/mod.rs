/*! Display categories of tasks.

The simulator labels every record with a free-form description such as
`Periodic` or `Server(Poller)`. This module maps descriptions onto the
closed [Category] enumeration via an explicit rule table and provides
the [TaskClassifier], which tracks the category of each task id
across the whole trace. */

use std::fmt;

/// The display category of a task.
///
/// The declaration order is the order of legend entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Category {
    Periodic,
    Aperiodic,
    PollingServer,
    DeferrableServer,
    Background,
    Failed,
    Unknown,
}

/// Description markers, checked in order; the first rule whose
/// markers all occur in a description determines the category.
const RULES: &[(&[&str], Category)] = &[
    (&["Server", "Deferrable"], Category::DeferrableServer),
    (&["Server"], Category::PollingServer),
    (&["FAIL"], Category::Failed),
    (&["Failed"], Category::Failed),
    (&["Aperiodic"], Category::Aperiodic),
    (&["Periodic"], Category::Periodic),
    (&["Background"], Category::Background),
];

impl Category {
    /// All categories, in legend order.
    pub const ALL: [Category; 7] = [
        Category::Periodic,
        Category::Aperiodic,
        Category::PollingServer,
        Category::DeferrableServer,
        Category::Background,
        Category::Failed,
        Category::Unknown,
    ];

    /// Map a trace description onto a category. Total: descriptions
    /// that match no rule are [Category::Unknown].
    pub fn from_description(description: &str) -> Category {
        RULES
            .iter()
            .find(|(markers, _)| markers.iter().all(|m| description.contains(m)))
            .map(|(_, category)| *category)
            .unwrap_or(Category::Unknown)
    }

    /// Is this one of the aperiodic-server categories?
    pub fn is_server(self) -> bool {
        matches!(self, Category::PollingServer | Category::DeferrableServer)
    }

    /// Human-readable name, as used in legends.
    pub fn label(self) -> &'static str {
        match self {
            Category::Periodic => "Periodic",
            Category::Aperiodic => "Aperiodic",
            Category::PollingServer => "Polling Server",
            Category::DeferrableServer => "Deferrable Server",
            Category::Background => "Background",
            Category::Failed => "Failed",
            Category::Unknown => "Unknown",
        }
    }

    /// The category a task ends up in when it is currently `self` and
    /// a sample labeled `observed` arrives.
    ///
    /// Server categories are absorbing: once a task is a server, it
    /// stays the same server. Otherwise, an observed server category
    /// wins, a [Category::Failed] placeholder adopts whatever was
    /// observed, and any other category is kept.
    pub fn transition(self, observed: Category) -> Category {
        if self.is_server() {
            self
        } else if observed.is_server() || self == Category::Failed {
            observed
        } else {
            self
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

mod classifier;

pub use classifier::TaskClassifier;
