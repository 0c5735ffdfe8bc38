/// Trace timestamps are decimal seconds sampled at a fixed quantum,
/// so this library uses a floating-point time model.
pub type Time = f64;

/// Syntactic sugar to give a hint that a time value indicates a
/// point in time.
pub type Instant = Time;

/// Syntactic sugar to give a hint that a time value denotes an
/// interval length.
pub type Duration = Time;

/// Syntactic sugar to give a hint that a time value represents some
/// amount of server budget.
pub type Budget = Time;

/// Check whether `b` follows `a` without a gap, up to the tolerance `epsilon`.
pub(crate) fn adjoins(a: Instant, b: Instant, epsilon: Duration) -> bool {
    b - a < epsilon
}
