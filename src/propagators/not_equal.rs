use crate::basic_types::PropagationStatus;
use crate::basic_types::VarName;
use crate::engine::VariableStore;
use crate::propagators::Propagator;

/// Enforces `x != y`. Prunes only once one side is determined, removing that
/// value from the other side; marks itself entailed as soon as the two
/// domains can no longer collide.
#[derive(Clone, Debug)]
pub(crate) struct NotEqualPropagator {
    variables: [VarName; 2],
    last_step: Option<u64>,
    entailed: bool,
}

impl NotEqualPropagator {
    pub(crate) fn new(x: VarName, y: VarName) -> NotEqualPropagator {
        NotEqualPropagator {
            variables: [x, y],
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

impl Propagator for NotEqualPropagator {
    fn name(&self) -> &str {
        "neq"
    }

    fn variables(&self) -> &[VarName] {
        &self.variables
    }

    fn step(&mut self, store: &mut VariableStore) -> PropagationStatus {
        let fingerprint = store.revision_sum(&self.variables);
        if self.entailed || self.last_step == Some(fingerprint) {
            return Ok(0);
        }
        let (x_lo, x_hi) = store.bounds(self.x());
        let (y_lo, y_hi) = store.bounds(self.y());
        if x_hi < y_lo || y_hi < x_lo {
            self.entailed = true;
            return Ok(0);
        }
        if store.domain(self.x()).intersect(store.domain(self.y())).is_empty() {
            self.entailed = true;
            return Ok(0);
        }

        let mut delta = 0;
        if let Some(value) = store.value(self.x()) {
            delta += store.remove_value(self.y(), value)?;
        } else if let Some(value) = store.value(self.y()) {
            delta += store.remove_value(self.x(), value)?;
        }
        self.last_step = Some(store.revision_sum(&self.variables));
        Ok(delta)
    }

    fn is_solved(&self, store: &VariableStore) -> bool {
        self.entailed || self.variables.iter().all(|name| store.is_fixed(name))
    }

    fn fresh(&self) -> Box<dyn Propagator> {
        Box::new(NotEqualPropagator::new(self.x().clone(), self.y().clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Domain;
    use crate::basic_types::EmptyDomain;
    use crate::basic_types::FdVariable;

    fn store(x: Domain, y: Domain) -> VariableStore {
        let mut store = VariableStore::default();
        store.insert("x".into(), FdVariable::new(x));
        store.insert("y".into(), FdVariable::new(y));
        store
    }

    #[test]
    fn a_determined_side_is_pruned_from_the_other() {
        let mut store = store(Domain::singleton(4), Domain::range(0, 9));
        let mut propagator = NotEqualPropagator::new("x".into(), "y".into());

        assert_eq!(propagator.step(&mut store), Ok(1));
        assert_eq!(
            store.domain(&"y".into()),
            &Domain::from_intervals([(0, 3), (5, 9)])
        );
    }

    #[test]
    fn undetermined_sides_are_left_alone() {
        let mut store = store(Domain::range(0, 5), Domain::range(3, 9));
        let mut propagator = NotEqualPropagator::new("x".into(), "y".into());

        assert_eq!(propagator.step(&mut store), Ok(0));
        assert_eq!(store.domain(&"x".into()), &Domain::range(0, 5));
    }

    #[test]
    fn disjoint_bounds_entail_the_constraint() {
        let mut store = store(Domain::range(0, 3), Domain::range(7, 9));
        let mut propagator = NotEqualPropagator::new("x".into(), "y".into());

        assert_eq!(propagator.step(&mut store), Ok(0));
        assert!(propagator.is_solved(&store));
    }

    #[test]
    fn interleaved_but_disjoint_domains_entail_the_constraint() {
        let mut store = store(
            Domain::from_intervals([(0, 0), (4, 4)]),
            Domain::from_intervals([(2, 2), (6, 6)]),
        );
        let mut propagator = NotEqualPropagator::new("x".into(), "y".into());

        assert_eq!(propagator.step(&mut store), Ok(0));
        assert!(propagator.is_solved(&store));
    }

    #[test]
    fn equal_singletons_fail() {
        let mut store = store(Domain::singleton(5), Domain::singleton(5));
        let mut propagator = NotEqualPropagator::new("x".into(), "y".into());

        assert_eq!(propagator.step(&mut store), Err(EmptyDomain));
    }
}
