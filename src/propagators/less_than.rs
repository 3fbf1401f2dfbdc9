use crate::basic_types::Domain;
use crate::basic_types::EmptyDomain;
use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::engine::VariableStore;
use crate::propagators::Propagator;

/// Enforces `x < y` (strict) or `x <= y` by bounds reasoning. The `>` and
/// `>=` constraints post this propagator with swapped arguments.
///
/// Once the upper bound of `x` drops below the lower bound of `y` the
/// constraint holds under any remaining narrowing and the propagator marks
/// itself entailed.
#[derive(Clone, Debug)]
pub(crate) struct LessThanPropagator {
    variables: [VarName; 2],
    strict: bool,
    last_step: Option<u64>,
    entailed: bool,
}

impl LessThanPropagator {
    pub(crate) fn new(x: VarName, y: VarName, strict: bool) -> LessThanPropagator {
        LessThanPropagator {
            variables: [x, y],
            strict,
            last_step: None,
            entailed: false,
        }
    }

    fn x(&self) -> &VarName {
        &self.variables[0]
    }

    fn y(&self) -> &VarName {
        &self.variables[1]
    }
}

impl Propagator for LessThanPropagator {
    fn name(&self) -> &str {
        if self.strict {
            "lt"
        } else {
            "lte"
        }
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(&self.variables);
        if self.entailed || self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        let offset = u64::from(self.strict);
        let mut delta = 0;
        // Bounds feed each other, so iterate to a local fixpoint before
        // handing control back to the engine.
        loop {
            let (x_lo, x_hi) = store.bounds(self.x());
            let (y_lo, y_hi) = store.bounds(self.y());
            if x_hi + offset <= y_lo {
                self.entailed = true;
                break;
            }
            if y_hi < offset {
                // x < 0 is unsatisfiable over the non-negative band.
                return Err(EmptyDomain);
            }
            let mut changed = 0;
            let x_cap = y_hi - offset;
            if x_cap < x_hi {
                changed += store.constrain(self.x(), &Domain::range(x_lo, x_cap))?;
            }
            let y_floor = x_lo + offset;
            if y_floor > y_lo {
                changed += store.constrain(self.y(), &Domain::range(y_floor, y_hi))?;
            }
            delta += changed;
            if changed == 0 {
                break;
            }
        }
        self.last_step = Some(store.revision_sum(&self.variables));
        Ok(delta)
    }

    fn is_solved(&self, store: &VariableStore) -> bool {
        self.entailed || self.variables.iter().all(|name| store.is_fixed(name))
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(LessThanPropagator::new(
            self.x().clone(),
            self.y().clone(),
            self.strict,
        ))
    }
}
