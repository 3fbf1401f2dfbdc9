use crate::basic_types::VarName;
use crate::branching::Choice;
use crate::branching::ValueSelection;
use crate::branching::VariableFilter;
use crate::branching::VariableOrdering;
use crate::engine::Space;

/// One entry of a space's branching queue: a variable list plus the three
/// pluggable pieces that turn a stable space into a choice.
#[derive(Clone, Debug)]
pub struct BranchStrategy {
    variables: Vec<VarName>,
    filter: VariableFilter,
    ordering: VariableOrdering,
    value: ValueSelection,
}

impl BranchStrategy {
    pub fn new(
        variables: Vec<VarName>,
        filter: VariableFilter,
        ordering: VariableOrdering,
        value: ValueSelection,
    ) -> BranchStrategy {
        BranchStrategy {
            variables,
            filter,
            ordering,
            value,
        }
    }

    /// The next choice for `space`, or [`None`] when every variable of the
    /// strategy is already determined and the brancher should fall through to
    /// the next queued strategy.
    ///
    /// Selection is stable: among candidates the ordering considers equal,
    /// the earliest in the script's list wins.
    pub(crate) fn branch(&self, space: &Space) -> Option<Choice> {
        let candidates = self.filter.apply(space, &self.variables);
        let mut candidates = candidates.into_iter();
        let mut best = candidates.next()?;
        for candidate in candidates {
            if self.ordering.before(space, &candidate, &best)
                && !self.ordering.before(space, &best, &candidate)
            {
                best = candidate;
            }
        }
        Some(Choice::new(best, self.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Domain;

    fn strategy(ordering: VariableOrdering) -> BranchStrategy {
        BranchStrategy::new(
            vec!["a".into(), "b".into(), "c".into()],
            VariableFilter::Undetermined,
            ordering,
            ValueSelection::InDomainMin,
        )
    }

    #[test]
    fn input_order_picks_the_first_undetermined() {
        let mut space = Space::new();
        let _ = space
            .decl_with("a", Domain::singleton(1))
            .decl_with("b", Domain::range(0, 9))
            .decl_with("c", Domain::range(0, 9));
        let choice = strategy(VariableOrdering::InputOrder)
            .branch(&space)
            .expect("undetermined variables remain");
        assert_eq!(choice.variable(), &VarName::from("b"));
    }

    #[test]
    fn first_fail_picks_the_smallest_domain() {
        let mut space = Space::new();
        let _ = space
            .decl_with("a", Domain::range(0, 9))
            .decl_with("b", Domain::range(4, 6))
            .decl_with("c", Domain::range(0, 2));
        let choice = strategy(VariableOrdering::FirstFail)
            .branch(&space)
            .expect("undetermined variables remain");
        assert_eq!(choice.variable(), &VarName::from("b"));
    }

    #[test]
    fn ties_keep_script_order() {
        let mut space = Space::new();
        let _ = space
            .decl_with("a", Domain::range(0, 4))
            .decl_with("b", Domain::range(10, 14))
            .decl_with("c", Domain::range(20, 24));
        let choice = strategy(VariableOrdering::FirstFail)
            .branch(&space)
            .expect("undetermined variables remain");
        assert_eq!(choice.variable(), &VarName::from("a"));
    }

    #[test]
    fn fully_determined_strategies_yield_nothing() {
        let mut space = Space::new();
        let _ = space
            .decl_with("a", Domain::singleton(0))
            .decl_with("b", Domain::singleton(1))
            .decl_with("c", Domain::singleton(2));
        assert!(strategy(VariableOrdering::InputOrder).branch(&space).is_none());
    }
}
