/*! Detection of the aperiodic-service policy of a run.

The simulator's task-set file tags aperiodic tasks with `(Poller)` or
`(Deferrable)` to select the server policy. The only thing this crate
reads from that file is the tag, which ends up in the title of the
layout. */

use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::TraceError;

/// The aperiodic-service policy a trace was produced with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ServerPolicy {
    /// No server: aperiodic jobs run in the background.
    #[default]
    Background,
    Polling,
    Deferrable,
}

impl ServerPolicy {
    /// Scan the text of a task-set file for a policy tag.
    ///
    /// Anything after a `#` is a comment. If several lines carry a tag,
    /// the last one wins; without any tag the policy is
    /// [ServerPolicy::Background].
    pub fn from_task_set(text: &str) -> ServerPolicy {
        text.lines()
            .filter_map(|line| {
                let content = line.split('#').next().unwrap_or("");
                if content.contains("(Poller)") {
                    Some(ServerPolicy::Polling)
                } else if content.contains("(Deferrable)") {
                    Some(ServerPolicy::Deferrable)
                } else {
                    None
                }
            })
            .last()
            .unwrap_or_default()
    }

    /// Read the task-set file at `path` and detect its policy.
    pub fn detect(path: impl AsRef<Path>) -> Result<ServerPolicy, TraceError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| TraceError::from_io(path, e))?;
        Ok(ServerPolicy::from_task_set(&String::from_utf8_lossy(&bytes)))
    }

    pub fn label(self) -> &'static str {
        match self {
            ServerPolicy::Background => "Background (None)",
            ServerPolicy::Polling => "Polling Server",
            ServerPolicy::Deferrable => "Deferrable Server",
        }
    }
}

impl fmt::Display for ServerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
