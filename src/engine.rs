/*! Single-pass driver turning a trace into a [LayoutModel].

The [Engine] parses the trace once and offers every event to the
interval reconstructor, the budget simulator, the miss collector and
the classifier. Afterwards, missing tracks of failed tasks are added,
categories are stamped onto the tracks, and the layout is built.

Parsing never fails on bad records; they are reported as
[SkippedLine]s in the [Analysis]. The only fatal error is a trace that
cannot be read ([TraceError::NotFound] or [TraceError::Io]). A trace
without any task is a valid, [Outcome::Empty] result. */

use std::path::Path;

use log::{debug, info, warn};

use crate::budget::ServerBudgetSimulator;
use crate::category::TaskClassifier;
use crate::config::EngineConfig;
use crate::consumer::EventConsumer;
use crate::error::{SkippedLine, TraceError};
use crate::layout::{LayoutModel, TimelineLayoutBuilder};
use crate::miss::DeadlineMissCollector;
use crate::policy::ServerPolicy;
use crate::trace::Trace;
use crate::track::IntervalReconstructor;

/// Whether an analysis found anything to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The layout has `tracks` tracks.
    Populated { tracks: usize },
    /// The trace was read, but no task was recognized.
    Empty,
}

/// The result of reconstructing one trace.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub layout: LayoutModel,
    /// Records that were skipped because they were malformed.
    pub skipped: Vec<SkippedLine>,
    /// Number of well-formed records.
    pub events: usize,
}

impl Analysis {
    pub fn outcome(&self) -> Outcome {
        if self.layout.is_empty() {
            Outcome::Empty
        } else {
            Outcome::Populated {
                tracks: self.layout.tracks.len(),
            }
        }
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn into_layout(self) -> LayoutModel {
        self.layout
    }
}

/// Reconstructs timelines according to a fixed [EngineConfig].
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    policy: Option<ServerPolicy>,
}

impl Engine {
    /// Create an engine, rejecting unusable configurations.
    pub fn new(config: EngineConfig) -> Result<Self, TraceError> {
        config.validate()?;
        Ok(Engine {
            config,
            policy: None,
        })
    }

    /// Label all layouts produced by this engine with `policy`.
    pub fn with_policy(mut self, policy: ServerPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Read the trace at `path` and reconstruct its timeline.
    pub fn analyze_path(&self, path: impl AsRef<Path>) -> Result<Analysis, TraceError> {
        let trace = Trace::open(path)?;
        Ok(self.analyze(&trace))
    }

    /// Reconstruct the timeline of `trace`.
    pub fn analyze(&self, trace: &Trace) -> Analysis {
        let mut intervals = IntervalReconstructor::new(&self.config);
        let mut budget = ServerBudgetSimulator::new(&self.config);
        let mut misses = DeadlineMissCollector::new(&self.config);
        let mut classifier = TaskClassifier::new();

        let mut skipped = Vec::new();
        let mut events = 0;
        {
            let mut consumers: [&mut dyn EventConsumer; 4] =
                [&mut intervals, &mut budget, &mut misses, &mut classifier];
            for item in trace.events(&self.config) {
                match item {
                    Ok(event) => {
                        events += 1;
                        for consumer in consumers.iter_mut() {
                            consumer.consume(&event);
                        }
                    }
                    Err(skip) => {
                        debug!("skipped {}", skip);
                        skipped.push(skip);
                    }
                }
            }
        }

        let mut tracks = intervals.into_tracks();
        let failed = misses.ensure_tracks(&mut tracks);
        classifier.apply(&mut tracks);

        let mut builder = TimelineLayoutBuilder::new(&self.config);
        if let Some(policy) = self.policy {
            builder = builder.with_policy(policy);
        }
        let layout = builder.build(tracks, misses.into_misses(), budget.into_samples());

        info!(
            "reconstructed {} events ({} skipped) into {} tracks, {} of them never scheduled, {} deadline misses",
            events,
            skipped.len(),
            layout.tracks.len(),
            failed,
            layout.misses.len()
        );
        if layout.is_empty() {
            warn!("trace contains no recognizable tasks");
        }

        Analysis {
            layout,
            skipped,
            events,
        }
    }
}
