use crate::basic_types::EmptyDomain;
use crate::basic_types::VarName;
use crate::branching::ValueSelection;
use crate::emerald_assert_simple;
use crate::engine::Space;

/// A committed-to branching decision: which variable to split and how.
///
/// A choice stands for [`Choice::num_choices`] alternative child spaces; the
/// search clones the branching space once per alternative and applies
/// [`Choice::commit`] with the alternative's index.
#[derive(Clone, Debug)]
pub struct Choice {
    variable: VarName,
    selection: ValueSelection,
}

impl Choice {
    pub(crate) fn new(variable: VarName, selection: ValueSelection) -> Choice {
        Choice { variable, selection }
    }

    pub fn variable(&self) -> &VarName {
        &self.variable
    }

    /// The number of alternatives this choice offers. Every built-in value
    /// selection is a two-way split.
    pub fn num_choices(&self) -> u64 {
        2
    }

    /// Applies the `alternative`-th branch to `space` (normally a fresh clone
    /// of the space that produced the choice).
    ///
    /// # Panics
    /// Panics when `alternative` is not below [`Choice::num_choices`].
    pub fn commit(&self, space: &mut Space, alternative: u64) -> Result<(), EmptyDomain> {
        emerald_assert_simple!(
            alternative < self.num_choices(),
            "choice alternative {alternative} out of range"
        );
        let restriction = self.selection.restriction(space, &self.variable, alternative);
        let _ = space.constrain(&self.variable, &restriction)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Domain;

    #[test]
    fn commit_applies_the_selected_alternative() {
        let mut space = Space::new();
        let _ = space.decl_with("x", Domain::range(2, 6));
        let choice = Choice::new("x".into(), ValueSelection::InDomainMin);

        let mut first = space.clone_space();
        choice.commit(&mut first, 0).expect("non-empty");
        assert_eq!(first.domain(&"x".into()), &Domain::singleton(2));

        let mut second = space.clone_space();
        choice.commit(&mut second, 1).expect("non-empty");
        assert_eq!(second.domain(&"x".into()), &Domain::range(3, 6));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn commit_rejects_an_out_of_range_alternative() {
        let mut space = Space::new();
        let _ = space.decl_with("x", Domain::range(2, 6));
        let choice = Choice::new("x".into(), ValueSelection::InDomainMin);
        let _ = choice.commit(&mut space, 2);
    }
}
