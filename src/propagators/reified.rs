use log::trace;

use crate::basic_types::Domain;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::engine::VariableStore;
use crate::propagators::EqualityPropagator;
use crate::propagators::LessThanPropagator;
use crate::propagators::NotEqualPropagator;
use crate::propagators::Propagator;

/// The comparison operators that can be reified into a boolean variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CmpOp {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    /// The operator holding exactly when `self` does not.
    pub fn complement(&self) -> CmpOp {
        match self {
            CmpOp::Eq => CmpOp::Neq,
            CmpOp::Neq => CmpOp::Eq,
            CmpOp::Lt => CmpOp::Gte,
            CmpOp::Gte => CmpOp::Lt,
            CmpOp::Gt => CmpOp::Lte,
            CmpOp::Lte => CmpOp::Gt,
        }
    }

    /// The propagator enforcing `x (self) y`.
    pub(crate) fn build(&self, x: VarName, y: VarName) -> Box<dyn Propagator> {
        match self {
            CmpOp::Eq => Box::new(EqualityPropagator::new(x, y)),
            CmpOp::Neq => Box::new(NotEqualPropagator::new(x, y)),
            CmpOp::Lt => Box::new(LessThanPropagator::new(x, y, true)),
            CmpOp::Lte => Box::new(LessThanPropagator::new(x, y, false)),
            CmpOp::Gt => Box::new(LessThanPropagator::new(y, x, true)),
            CmpOp::Gte => Box::new(LessThanPropagator::new(y, x, false)),
        }
    }
}

impl std::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            CmpOp::Eq => "==",
            CmpOp::Neq => "!=",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
        };
        write!(f, "{symbol}")
    }
}

/// Ties the truth of `x (op) y` to a boolean variable `b`.
///
/// While `b` is undetermined the propagator speculates: it steps the positive
/// (and then the negative) constraint against a snapshot of the variables and
/// watches for failure. A constraint that cannot hold pins `b` to the other
/// side; either way the snapshot is restored, so speculation never leaks
/// narrowing into the space. Once `b` is determined the corresponding
/// constraint propagates for real.
///
/// The positive and negative sub-propagators are built lazily inside the
/// owning space, so each space carries private change-detection state for
/// them.
pub(crate) struct ReifiedPropagator {
    op: CmpOp,
    /// `[x, y, b]`.
    variables: [VarName; 3],
    positive: Option<Box<dyn Propagator>>,
    negative: Option<Box<dyn Propagator>>,
    last_step: Option<u64>,
}

impl ReifiedPropagator {
    pub(crate) fn new(op: CmpOp, x: VarName, y: VarName, b: VarName) -> ReifiedPropagator {
        ReifiedPropagator {
            op,
            variables: [x, y, b],
            positive: None,
            negative: None,
            last_step: None,
        }
    }

    fn x(&self) -> &VarName {
        &self.variables[0]
    }

    fn y(&self) -> &VarName {
        &self.variables[1]
    }

    fn b(&self) -> &VarName {
        &self.variables[2]
    }

    fn ensure_built(&mut self) {
        if self.positive.is_none() {
            self.positive = Some(self.op.build(self.x().clone(), self.y().clone()));
            self.negative = Some(
                self.op
                    .complement()
                    .build(self.x().clone(), self.y().clone()),
            );
        }
    }

    /// Steps a throwaway rebuild of `propagator` against a snapshot of `x`
    /// and `y`, reporting whether it failed. The snapshot is restored on
    /// every path, and the probe's private caches die with it.
    fn speculate(&self, propagator: &dyn Propagator, store: &mut VariableStore) -> bool {
        let snapshot = store.snapshot(&self.variables[..2]);
        let failed = propagator.fresh().step(store).is_err();
        store.restore(snapshot);
        failed
    }
}

impl Propagator for ReifiedPropagator {
    fn name(&self) -> &str {
        "reified"
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(&self.variables);
        if self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        self.ensure_built();
        let mut total = 0;
        loop {
            let before = store.revision_sum(&self.variables);
            match store.value(self.b()) {
                Some(1) => {
                    let positive = self.positive.as_mut().expect("built above");
                    total += positive.step(store)?;
                }
                Some(_) => {
                    let negative = self.negative.as_mut().expect("built above");
                    total += negative.step(store)?;
                }
                None => {
                    let positive = self.positive.as_deref().expect("built above");
                    if self.speculate(positive, store) {
                        trace!("reified {}: positive side is impossible", self.op);
                        total += store.constrain(self.b(), &Domain::singleton(0))?;
                    } else {
                        let negative = self.negative.as_deref().expect("built above");
                        if self.speculate(negative, store) {
                            trace!("reified {}: negative side is impossible", self.op);
                            total += store.constrain(self.b(), &Domain::singleton(1))?;
                        }
                    }
                }
            }
            if store.revision_sum(&self.variables) == before {
                break;
            }
        }
        self.last_step = Some(store.revision_sum(&self.variables));
        Ok(total)
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(ReifiedPropagator::new(
            self.op,
            self.x().clone(),
            self.y().clone(),
            self.b().clone(),
        ))
    }
}

impl std::fmt::Debug for ReifiedPropagator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReifiedPropagator")
            .field("op", &self.op)
            .field("variables", &self.variables)
            .finish()
    }
}
