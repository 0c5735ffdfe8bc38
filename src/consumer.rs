use auto_impl::auto_impl;

use crate::trace::TraceEvent;

/// Generic interface for components that observe the event stream of
/// a trace.
///
/// The engine parses a trace once and offers each event, in trace
/// order, to all consumers; consumers must not assume they see any
/// particular subset of events.
#[auto_impl(&mut, Box)]
pub trait EventConsumer {
    /// Observe the next event of the trace.
    fn consume(&mut self, event: &TraceEvent<'_>);
}
