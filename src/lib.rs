/*! Reconstruction of execution timelines from quantized scheduling traces.

An external real-time scheduling simulator emits a trace that samples
the running task once per scheduling quantum. This crate turns such a
trace into a renderable timeline model:

- [track] merges consecutive execution samples into per-task intervals,
- [budget] replays the periodic budget of the aperiodic server,
- [miss] collects deadline misses,
- [category] assigns each task a display category, and
- [layout] orders the tasks into lanes and computes axis bounds and
  the legend.

The [engine] drives all of the above in a single pass over a
[Trace][trace::Trace] and hands back an immutable
[LayoutModel][layout::LayoutModel]. Rendering the model is up to the
caller.
*/

pub mod budget;
pub mod category;
pub mod config;
pub mod consumer;
pub mod engine;
pub mod error;
pub mod layout;
pub mod miss;
pub mod policy;
pub mod time;
pub mod trace;
pub mod track;

pub use config::EngineConfig;
pub use engine::{Analysis, Engine, Outcome};
pub use error::{SkipReason, SkippedLine, TraceError};
