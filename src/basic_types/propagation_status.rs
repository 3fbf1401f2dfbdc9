/// The single infeasibility condition: a narrowing produced an empty domain.
///
/// Propagators let it unwind through `?`; [`crate::Space::propagate`] converts
/// it into the failed-space state, and the search drivers treat a failed space
/// as a dead branch. It never reaches the caller directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The outcome of one propagator step: the number of revision increments it
/// produced, or [`EmptyDomain`].
pub type PropagationStatus = Result<u64, EmptyDomain>;
