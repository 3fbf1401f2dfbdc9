use crate::basic_types::Domain;
use crate::basic_types::EmptyDomain;
use crate::basic_types::FdVariable;
use crate::basic_types::VarName;
use crate::containers::HashMap;

/// The name-keyed variable state of a space.
///
/// Stored domains are never empty: a narrowing that would empty a domain
/// leaves the variable untouched and unwinds with [`EmptyDomain`] instead.
/// Propagators program against this store the way they would against a domain
/// manager: bound queries on the read side, `constrain` on the write side.
#[derive(Clone, Debug, Default)]
pub struct VariableStore {
    variables: HashMap<VarName, FdVariable>,
}

impl VariableStore {
    pub(crate) fn insert(&mut self, name: VarName, variable: FdVariable) {
        let _ = self.variables.insert(name, variable);
    }

    pub fn contains(&self, name: &VarName) -> bool {
        self.variables.contains_key(name)
    }

    pub fn get(&self, name: &VarName) -> &FdVariable {
        self.variables
            .get(name)
            .unwrap_or_else(|| panic!("unknown variable {name}"))
    }

    fn get_mut(&mut self, name: &VarName) -> &mut FdVariable {
        self.variables
            .get_mut(name)
            .unwrap_or_else(|| panic!("unknown variable {name}"))
    }

    pub fn domain(&self, name: &VarName) -> &Domain {
        self.get(name).domain()
    }

    /// The extreme bounds of `name`'s domain.
    pub fn bounds(&self, name: &VarName) -> (u64, u64) {
        let domain = self.domain(name);
        (domain.min(), domain.max())
    }

    pub fn lower_bound(&self, name: &VarName) -> u64 {
        self.domain(name).min()
    }

    pub fn upper_bound(&self, name: &VarName) -> u64 {
        self.domain(name).max()
    }

    pub fn domain_size(&self, name: &VarName) -> u64 {
        self.domain(name).size()
    }

    pub fn is_fixed(&self, name: &VarName) -> bool {
        !self.get(name).is_undetermined()
    }

    /// The value of a determined variable, [`None`] while undetermined.
    pub fn value(&self, name: &VarName) -> Option<u64> {
        self.domain(name).value()
    }

    /// Narrows `name` to the intersection of its domain with `restriction`.
    pub fn constrain(&mut self, name: &VarName, restriction: &Domain) -> Result<u64, EmptyDomain> {
        self.get_mut(name).constrain(restriction)
    }

    /// Removes a single value from `name`'s domain.
    pub fn remove_value(&mut self, name: &VarName, value: u64) -> Result<u64, EmptyDomain> {
        self.constrain(name, &Domain::singleton(value).complement())
    }

    /// The sum of the revision counters of `names`, the change-detection
    /// fingerprint propagators cache between steps.
    pub fn revision_sum(&self, names: &[VarName]) -> u64 {
        names.iter().map(|name| self.get(name).revision()).sum()
    }

    /// True iff every variable in the store is determined.
    pub fn all_fixed(&self) -> bool {
        self.variables.values().all(|variable| !variable.is_undetermined())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VarName, &FdVariable)> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Saves `(domain, revision)` pairs ahead of a speculative step.
    pub(crate) fn snapshot(&self, names: &[VarName]) -> Vec<(VarName, Domain, u64)> {
        names
            .iter()
            .map(|name| {
                let variable = self.get(name);
                (name.clone(), variable.domain().clone(), variable.revision())
            })
            .collect()
    }

    /// Restores a snapshot taken by [`VariableStore::snapshot`].
    pub(crate) fn restore(&mut self, snapshot: Vec<(VarName, Domain, u64)>) {
        for (name, domain, revision) in snapshot {
            self.get_mut(&name).restore(domain, revision);
        }
    }

    /// A copy of the store for a child space: identical domains, revision
    /// counters reset.
    pub(crate) fn clone_reset(&self) -> VariableStore {
        VariableStore {
            variables: self
                .variables
                .iter()
                .map(|(name, variable)| (name.clone(), FdVariable::new(variable.domain().clone())))
                .collect(),
        }
    }
}
