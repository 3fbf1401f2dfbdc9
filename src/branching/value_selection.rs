use crate::basic_types::Domain;
use crate::basic_types::VarName;
use crate::engine::Space;

/// Turns a selected variable into a two-way split of its domain.
///
/// Every selection offers exactly two alternatives; alternative 0 is the one
/// the search tries first. The restriction is computed against the domain of
/// the space being committed, which at that point still equals the branching
/// space's domain.
#[derive(Clone, Copy, Debug, Default)]
pub enum ValueSelection {
    /// Try the minimum, then the rest of the domain above it.
    #[default]
    InDomainMin,
    /// Try the maximum, then the rest of the domain below it.
    InDomainMax,
    /// Try the median, then the domain without it.
    InDomainMedian,
    /// Try the lower half of the bounds, then the upper half.
    InDomainSplit,
    /// Try the upper half of the bounds, then the lower half.
    InDomainSplitMax,
    /// A caller-supplied selection mapping `(space, variable, alternative)`
    /// to the domain to constrain the variable with.
    Custom(fn(&Space, &VarName, u64) -> Domain),
}

impl ValueSelection {
    /// The domain restriction of the `alternative`-th branch for `name`.
    ///
    /// The variable is undetermined whenever this is called (determined
    /// variables are filtered out before selection), so both alternatives of
    /// each built-in selection are well-formed.
    pub(crate) fn restriction(&self, space: &Space, name: &VarName, alternative: u64) -> Domain {
        let (lo, hi) = (space.lower_bound(name), space.upper_bound(name));
        match self {
            ValueSelection::InDomainMin => match alternative {
                0 => Domain::singleton(lo),
                _ => Domain::range(lo + 1, hi),
            },
            ValueSelection::InDomainMax => match alternative {
                0 => Domain::singleton(hi),
                _ => Domain::range(lo, hi - 1),
            },
            ValueSelection::InDomainMedian => {
                let median = space.domain(name).median();
                match alternative {
                    0 => Domain::singleton(median),
                    _ => space.domain(name).remove(median),
                }
            }
            ValueSelection::InDomainSplit => {
                let middle = (lo + hi) / 2;
                match alternative {
                    0 => Domain::range(lo, middle),
                    _ => Domain::range(middle + 1, hi),
                }
            }
            ValueSelection::InDomainSplitMax => {
                let middle = (lo + hi) / 2;
                match alternative {
                    0 => Domain::range(middle + 1, hi),
                    _ => Domain::range(lo, middle),
                }
            }
            ValueSelection::Custom(selection) => selection(space, name, alternative),
        }
    }
}
