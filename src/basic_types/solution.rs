use crate::basic_types::domain::Domain;
use crate::containers::HashMap;

/// The value recorded for one user-named variable in a [`Solution`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolutionValue {
    /// The variable was determined to a single value.
    Assigned(u64),
    /// The space was stable but the variable still holds several values.
    Unresolved(Domain),
    /// The space failed; no value exists.
    Failed,
}

/// A snapshot of the user-named variables of a space. Engine temporaries are
/// omitted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Solution {
    values: HashMap<String, SolutionValue>,
}

impl Solution {
    pub(crate) fn new(values: HashMap<String, SolutionValue>) -> Solution {
        Solution { values }
    }

    pub fn get(&self, name: &str) -> Option<&SolutionValue> {
        self.values.get(name)
    }

    /// The assigned value of `name`.
    ///
    /// # Panics
    /// Panics when the variable is unknown or not assigned; solutions handed
    /// out by a search driver always assign every variable of its solved test.
    pub fn get_integer_value(&self, name: &str) -> u64 {
        match self.values.get(name) {
            Some(SolutionValue::Assigned(value)) => *value,
            other => panic!("expected {name} to be assigned in the solution, found {other:?}"),
        }
    }

    pub fn is_assigned(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(SolutionValue::Assigned(_)))
    }

    /// Iterates over `(name, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SolutionValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
