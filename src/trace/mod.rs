/*! Typed view of the execution trace emitted by the external simulator.

A trace is plain text: a fixed number of header lines followed by one
record per line, with fields `time, job, task, description, event`.
This module provides the typed [TraceEvent] and the lazy, restartable
[Trace::events] iterator that turns records into events. */

use std::borrow::Borrow;

use derive_more::{Display, From};

use crate::time::Instant;

/// Identifier of a task as it appears in the trace.
///
/// Task ids are kept verbatim (they are usually, but not necessarily,
/// decimal integers).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Interpret the id as a signed integer, if possible.
    pub fn numeric(&self) -> Option<i64> {
        self.0.parse().ok()
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        TaskId(id.to_string())
    }
}

impl Borrow<str> for TaskId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for TaskId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

/// The kind of a trace record, as given by its last field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A regular job executed for one quantum.
    Running,
    /// The polling server executed for one quantum.
    ServerExec,
    /// An aperiodic job executed in the background for one quantum.
    BackgroundRun,
    /// The deferrable server executed for one quantum.
    ServerExecDeferred,
    /// A job missed its deadline.
    DeadlineMiss,
    /// Anything else (e.g., idle ticks).
    Other,
}

impl EventKind {
    /// Does the event represent one quantum of execution?
    pub fn is_execution(self) -> bool {
        matches!(
            self,
            EventKind::Running
                | EventKind::ServerExec
                | EventKind::BackgroundRun
                | EventKind::ServerExecDeferred
        )
    }

    /// Can the event consume server budget, provided it belongs to a server?
    pub fn consumes_budget(self) -> bool {
        matches!(
            self,
            EventKind::Running | EventKind::ServerExec | EventKind::ServerExecDeferred
        )
    }
}

impl From<&str> for EventKind {
    fn from(field: &str) -> Self {
        match field {
            "Running" => EventKind::Running,
            "ServerExec" => EventKind::ServerExec,
            "BackgroundRun" => EventKind::BackgroundRun,
            "ServerExec(DS)" => EventKind::ServerExecDeferred,
            "DEADLINE_MISS" => EventKind::DeadlineMiss,
            _ => EventKind::Other,
        }
    }
}

/// A single parsed trace record.
///
/// Events borrow from the trace text and are meant to be consumed
/// immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceEvent<'a> {
    pub time: Instant,
    pub task_id: &'a str,
    pub description: &'a str,
    pub kind: EventKind,
}

mod parser;

pub use parser::{Events, Trace, REQUIRED_FIELDS};

#[cfg(test)]
mod tests;
