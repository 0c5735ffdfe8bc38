use std::collections::BTreeMap;

use log::debug;

use super::Category;
use crate::consumer::EventConsumer;
use crate::trace::{TaskId, TraceEvent};
use crate::track::TrackSet;

#[derive(Debug, Clone, PartialEq)]
struct Classification {
    category: Category,
    label: String,
}

/// Assigns every executing task a stable display category.
///
/// Only execution samples are considered; the category of a task id
/// evolves according to [Category::transition], so a task that has
/// been seen as a server can never fall back to a non-server
/// category. Task ids that never execute are [Category::Failed].
#[derive(Debug, Clone, Default)]
pub struct TaskClassifier {
    seen: BTreeMap<TaskId, Classification>,
}

impl TaskClassifier {
    pub fn new() -> Self {
        TaskClassifier::default()
    }

    /// Account for a sample of `task_id` labeled `description`.
    pub fn observe(&mut self, task_id: &str, description: &str) {
        let observed = Category::from_description(description);
        match self.seen.get_mut(task_id) {
            None => {
                self.seen.insert(
                    TaskId::from(task_id),
                    Classification {
                        category: observed,
                        label: description.to_string(),
                    },
                );
            }
            Some(current) => {
                let next = current.category.transition(observed);
                if next != current.category {
                    debug!(
                        "task {} reclassified from {} to {}",
                        task_id, current.category, next
                    );
                    current.category = next;
                    current.label = description.to_string();
                }
            }
        }
    }

    /// The category of `task_id` given everything observed so far.
    pub fn category(&self, task_id: &str) -> Category {
        self.seen
            .get(task_id)
            .map(|c| c.category)
            .unwrap_or(Category::Failed)
    }

    /// The description that determined the category of `task_id`.
    pub fn label(&self, task_id: &str) -> Option<&str> {
        self.seen.get(task_id).map(|c| c.label.as_str())
    }

    /// Stamp the final category and label onto every track.
    pub fn apply(&self, tracks: &mut TrackSet) {
        for track in tracks.iter_mut() {
            match self.seen.get(track.task_id.as_str()) {
                Some(c) => {
                    track.category = c.category;
                    track.label = c.label.clone();
                }
                None => {
                    track.category = Category::Failed;
                    track.label = Category::Failed.label().to_string();
                }
            }
        }
    }
}

impl EventConsumer for TaskClassifier {
    fn consume(&mut self, event: &TraceEvent<'_>) {
        if event.kind.is_execution() {
            self.observe(event.task_id, event.description);
        }
    }
}
