use crate::basic_types::VarName;
use crate::engine::Space;

/// Filters a strategy's variable list down to the names still worth branching
/// on.
#[derive(Clone, Copy, Debug, Default)]
pub enum VariableFilter {
    /// Keep the variables whose domain holds more than one value.
    #[default]
    Undetermined,
    /// A caller-supplied filter.
    Custom(fn(&Space, &[VarName]) -> Vec<VarName>),
}

impl VariableFilter {
    pub(crate) fn apply(&self, space: &Space, names: &[VarName]) -> Vec<VarName> {
        match self {
            VariableFilter::Undetermined => names
                .iter()
                .filter(|name| !space.is_fixed(name))
                .cloned()
                .collect(),
            VariableFilter::Custom(filter) => filter(space, names),
        }
    }
}

/// Orders branching candidates; `before(space, a, b)` decides whether `a`
/// should be branched on in preference to `b`.
#[derive(Clone, Copy, Debug, Default)]
pub enum VariableOrdering {
    /// Keep the script's order.
    #[default]
    InputOrder,
    /// Prefer the smallest domain (first-fail).
    FirstFail,
    /// Prefer the smallest lower bound.
    SmallestMin,
    /// Prefer the largest upper bound.
    LargestMax,
    /// A caller-supplied ordering.
    Custom(fn(&Space, &VarName, &VarName) -> bool),
}

impl VariableOrdering {
    pub(crate) fn before(&self, space: &Space, a: &VarName, b: &VarName) -> bool {
        match self {
            VariableOrdering::InputOrder => true,
            VariableOrdering::FirstFail => space.domain_size(a) < space.domain_size(b),
            VariableOrdering::SmallestMin => space.lower_bound(a) < space.lower_bound(b),
            VariableOrdering::LargestMax => space.upper_bound(a) > space.upper_bound(b),
            VariableOrdering::Custom(ordering) => ordering(space, a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Domain;

    fn space() -> (Space, Vec<VarName>) {
        let mut space = Space::new();
        let _ = space
            .decl_with("a", Domain::range(5, 9))
            .decl_with("b", Domain::range(0, 20))
            .decl_with("c", Domain::singleton(3));
        let names = vec!["a".into(), "b".into(), "c".into()];
        (space, names)
    }

    #[test]
    fn undetermined_filter_drops_fixed_variables() {
        let (space, names) = space();
        let kept = VariableFilter::Undetermined.apply(&space, &names);
        assert_eq!(kept, vec![VarName::from("a"), VarName::from("b")]);
    }

    #[test]
    fn first_fail_prefers_the_smaller_domain() {
        let (space, names) = space();
        assert!(VariableOrdering::FirstFail.before(&space, &names[0], &names[1]));
        assert!(!VariableOrdering::FirstFail.before(&space, &names[1], &names[0]));
    }

    #[test]
    fn smallest_min_and_largest_max() {
        let (space, names) = space();
        assert!(VariableOrdering::SmallestMin.before(&space, &names[1], &names[0]));
        assert!(VariableOrdering::LargestMax.before(&space, &names[1], &names[0]));
    }
}
