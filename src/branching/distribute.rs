//! Distribution presets: queue a branching strategy onto a space.
//!
//! A script typically finishes with one `distribute` call naming the decision
//! variables; several calls queue layered strategies which the brancher works
//! through in order.

use log::warn;

use crate::basic_types::VarName;
use crate::branching::BranchStrategy;
use crate::branching::ValueSelection;
use crate::branching::VariableFilter;
use crate::branching::VariableOrdering;
use crate::engine::Space;

/// The three pluggable pieces of a [`BranchStrategy`], for
/// [`generic`] distribution.
#[derive(Clone, Copy, Debug, Default)]
pub struct DistributionOptions {
    pub filter: VariableFilter,
    pub ordering: VariableOrdering,
    pub value: ValueSelection,
}

/// Script order, smallest value first.
pub fn naive(space: &mut Space, variables: &[VarName]) {
    generic(
        space,
        variables,
        DistributionOptions {
            filter: VariableFilter::Undetermined,
            ordering: VariableOrdering::InputOrder,
            value: ValueSelection::InDomainMin,
        },
    );
}

/// Smallest domain first, smallest value first.
pub fn fail_first(space: &mut Space, variables: &[VarName]) {
    generic(
        space,
        variables,
        DistributionOptions {
            filter: VariableFilter::Undetermined,
            ordering: VariableOrdering::FirstFail,
            value: ValueSelection::InDomainMin,
        },
    );
}

/// Smallest domain first, splitting domains in half.
pub fn split(space: &mut Space, variables: &[VarName]) {
    generic(
        space,
        variables,
        DistributionOptions {
            filter: VariableFilter::Undetermined,
            ordering: VariableOrdering::FirstFail,
            value: ValueSelection::InDomainSplit,
        },
    );
}

/// Queues a strategy with caller-picked filter, ordering and value selection.
pub fn generic(space: &mut Space, variables: &[VarName], options: DistributionOptions) {
    if variables.is_empty() {
        warn!("distributing over an empty variable list; the strategy will never branch");
    }
    for variable in variables {
        space.ensure_declared(variable);
    }
    space.add_branch_strategy(BranchStrategy::new(
        variables.to_vec(),
        options.filter,
        options.ordering,
        options.value,
    ));
}
