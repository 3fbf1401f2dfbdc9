use crate::basic_types::Domain;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::engine::VariableStore;
use crate::propagators::Propagator;

/// The interval operation a [`RingPropagator`] applies to its two sources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RingOperation {
    Add,
    Subtract,
    Multiply,
    DivideBy,
}

impl RingOperation {
    fn apply(&self, lhs: &Domain, rhs: &Domain) -> Domain {
        match self {
            RingOperation::Add => lhs.add(rhs),
            RingOperation::Subtract => lhs.subtract(rhs),
            RingOperation::Multiply => lhs.multiply(rhs),
            RingOperation::DivideBy => lhs.divide_by(rhs),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            RingOperation::Add => "ring+",
            RingOperation::Subtract => "ring-",
            RingOperation::Multiply => "ring*",
            RingOperation::DivideBy => "ring/",
        }
    }
}

/// One direction of an arithmetic ring: narrows `target` to its intersection
/// with `lhs ∘ rhs`.
///
/// `plus(x, y, s)` posts the three directions `s ← x + y`, `x ← s − y` and
/// `y ← s − x`; `times` does the same with multiply/divide. Only the two
/// sources re-trigger the propagator: narrowing the target cannot change what
/// this direction would compute.
#[derive(Clone, Debug)]
pub(crate) struct RingPropagator {
    /// `[target, lhs, rhs]`.
    variables: [VarName; 3],
    operation: RingOperation,
    last_step: Option<u64>,
}

impl RingPropagator {
    pub(crate) fn new(
        target: VarName,
        lhs: VarName,
        rhs: VarName,
        operation: RingOperation,
    ) -> RingPropagator {
        RingPropagator {
            variables: [target, lhs, rhs],
            operation,
            last_step: None,
        }
    }

    fn target(&self) -> &VarName {
        &self.variables[0]
    }

    fn lhs(&self) -> &VarName {
        &self.variables[1]
    }

    fn rhs(&self) -> &VarName {
        &self.variables[2]
    }
}

impl Propagator for RingPropagator {
    fn name(&self) -> &str {
        self.operation.name()
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn dependencies(&self) -> &[VarName] {
        &self.variables[1..]
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(self.dependencies());
        if self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        let image = self
            .operation
            .apply(store.domain(self.lhs()), store.domain(self.rhs()));
        let delta = store.constrain(self.target(), &image)?;
        // The sources were untouched, so the fingerprint is still current.
        self.last_step = Some(fingerprint);
        Ok(delta)
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(RingPropagator::new(
            self.target().clone(),
            self.lhs().clone(),
            self.rhs().clone(),
            self.operation,
        ))
    }
}
