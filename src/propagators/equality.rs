use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::engine::VariableStore;
use crate::propagators::Propagator;

/// Enforces `x = y` by narrowing both variables to the intersection of their
/// domains.
#[derive(Clone, Debug)]
pub(crate) struct EqualityPropagator {
    variables: [VarName; 2],
    last_step: Option<u64>,
}

impl EqualityPropagator {
    pub(crate) fn new(x: VarName, y: VarName) -> EqualityPropagator {
        EqualityPropagator {
            variables: [x, y],
            last_step: None,
        }
    }

    fn x(&self) -> &VarName {
        &self.variables[0]
    }

    fn y(&self) -> &VarName {
        &self.variables[1]
    }
}

impl Propagator for EqualityPropagator {
    fn name(&self) -> &str {
        "eq"
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(&self.variables);
        if self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        let intersection = store.domain(self.x()).intersect(store.domain(self.y()));
        let mut delta = store.constrain(self.x(), &intersection)?;
        delta += store.constrain(self.y(), &intersection)?;
        self.last_step = Some(store.revision_sum(&self.variables));
        Ok(delta)
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(EqualityPropagator::new(self.x().clone(), self.y().clone()))
    }
}
