//! The narrowing operators behind each constraint.
//!
//! A propagator watches a fixed set of variables and, when stepped, narrows
//! their domains towards the constraint it enforces. Steps are cheap to call
//! redundantly: every implementation opens with a change-detection gate that
//! compares the summed revisions of its dependencies against the sum it
//! cached after its previous step, returning immediately when nothing moved.

pub(crate) mod equality;
pub(crate) mod less_than;
pub(crate) mod not_equal;
pub(crate) mod reified;
pub(crate) mod ring;
pub(crate) mod scale;

pub(crate) use equality::EqualityPropagator;
pub(crate) use less_than::LessThanPropagator;
pub(crate) use not_equal::NotEqualPropagator;
pub use reified::CmpOp;
pub(crate) use reified::ReifiedPropagator;
pub(crate) use ring::RingOperation;
pub(crate) use ring::RingPropagator;
pub(crate) use scale::ScaleDownPropagator;
pub(crate) use scale::ScaleUpPropagator;

use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::engine::VariableStore;

/// A constraint-specific narrowing operator over the variables of a space.
pub(crate) trait Propagator {
    /// A short tag for log output.
    fn name(&self) -> &str;

    /// Every variable the propagator references.
    fn variables(&self) -> &[VarName];

    /// The subset of [`Propagator::variables`] whose change re-triggers the
    /// propagator. Directed propagators exclude their target.
    fn dependencies(&self) -> &[VarName] {
        self.variables()
    }

    /// Narrows domains towards the constraint. Returns the number of revision
    /// increments produced, or [`crate::EmptyDomain`] when a domain ran dry.
    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus;

    /// True when the propagator can never narrow again. Once this reports
    /// `true` it must keep doing so; cloned spaces drop solved propagators.
    fn is_solved(&self, store: &VariableStore) -> bool {
        self.variables().iter().all(|name| store.is_fixed(name))
    }

    /// Rebuilds the propagator for a cloned space: same constraint, fresh
    /// change-detection and speculation state.
    fn fresh(&self) -> Box<dyn Propagator>;
}
