use std::rc::Rc;

use log::debug;
use log::trace;

use crate::basic_types::Domain;
use crate::basic_types::EmptyDomain;
use crate::basic_types::FdVariable;
use crate::basic_types::ModelError;
use crate::basic_types::Solution;
use crate::basic_types::SolutionValue;
use crate::basic_types::VarName;
use crate::basic_types::SUP;
use crate::branching::Brancher;
use crate::branching::BranchStrategy;
use crate::branching::Choice;
use crate::containers::HashMap;
use crate::engine::statistics::ChildOutcome;
use crate::engine::statistics::SpaceStatistics;
use crate::engine::VariableStore;
use crate::propagators::Propagator;

/// The state of a space after running [`Space::propagate`] to fixpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpaceStatus {
    /// Some narrowing emptied a domain; the space holds no solutions.
    Failed,
    /// Every variable is determined.
    Solved,
    /// No propagator can narrow further, but choices remain open.
    Stable,
}

/// A computation space: variables, the propagators constraining them, and a
/// branching queue for splitting the space once it goes stable.
///
/// Spaces are the unit of search. A script populates the root space; the
/// search drivers repeatedly run it to fixpoint, and, when it neither solves
/// nor fails, clone it and commit each clone to one alternative of a branching
/// choice. Clones are independent: variables are copied, propagators are
/// rebuilt (solved ones are dropped), and only the branching strategy queue is
/// shared, each space holding its own cursor into it.
pub struct Space {
    store: VariableStore,
    propagators: Vec<Box<dyn Propagator>>,
    brancher: Brancher,
    statistics: SpaceStatistics,
    failed: bool,
    next_temporary: u64,
    constant_cache: HashMap<u64, VarName>,
}

impl Default for Space {
    fn default() -> Space {
        Space::new()
    }
}

impl std::fmt::Debug for Space {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Space")
            .field("variables", &self.store.len())
            .field("propagators", &self.propagators.len())
            .field("failed", &self.failed)
            .field("statistics", &self.statistics)
            .finish()
    }
}

impl Space {
    pub fn new() -> Space {
        Space {
            store: VariableStore::default(),
            propagators: Vec::new(),
            brancher: Brancher::new(),
            statistics: SpaceStatistics::default(),
            failed: false,
            next_temporary: 0,
            constant_cache: HashMap::default(),
        }
    }

    /// Declares `name` over the full band if it does not exist yet.
    pub fn decl(&mut self, name: impl Into<VarName>) -> &mut Space {
        let name = name.into();
        self.ensure_declared(&name);
        self
    }

    /// Declares `name` with `domain`; when the variable already exists its
    /// domain is narrowed to the intersection instead. An empty intersection
    /// fails the space.
    pub fn decl_with(&mut self, name: impl Into<VarName>, domain: Domain) -> &mut Space {
        let name = name.into();
        if self.store.contains(&name) {
            let _ = self.constrain(&name, &domain);
        } else {
            if domain.is_empty() {
                self.failed = true;
            }
            self.store
                .insert(name, FdVariable::new(if domain.is_empty() { Domain::full() } else { domain }));
        }
        self
    }

    /// Declares every name in `names` over the full band.
    pub fn decl_all(&mut self, names: impl IntoIterator<Item = impl Into<VarName>>) -> &mut Space {
        for name in names {
            let _ = self.decl(name);
        }
        self
    }

    /// Allocates a fresh temporary over the full band. Temporaries never show
    /// up in solutions.
    pub fn temp(&mut self) -> VarName {
        self.temp_with(Domain::full())
    }

    /// Allocates a fresh temporary with the given domain.
    pub fn temp_with(&mut self, domain: Domain) -> VarName {
        let name = VarName::Temp(self.next_temporary);
        self.next_temporary += 1;
        let _ = self.decl_with(name.clone(), domain);
        name
    }

    /// Allocates `count` temporaries over the full band.
    pub fn temps(&mut self, count: usize) -> Vec<VarName> {
        (0..count).map(|_| self.temp()).collect()
    }

    /// Allocates `count` temporaries sharing the given initial domain.
    pub fn temps_with(&mut self, count: usize, domain: &Domain) -> Vec<VarName> {
        (0..count).map(|_| self.temp_with(domain.clone())).collect()
    }

    /// Declares `name` as the constant `value`.
    pub fn num(&mut self, name: impl Into<VarName>, value: u64) -> Result<&mut Space, ModelError> {
        if value > SUP {
            return Err(ModelError::ConstantOutOfRange(value));
        }
        Ok(self.decl_with(name, Domain::singleton(value)))
    }

    /// A temporary fixed to `value`. Constants are cached per space, so
    /// posting the same constant twice shares one variable.
    pub fn konst(&mut self, value: u64) -> Result<VarName, ModelError> {
        if value > SUP {
            return Err(ModelError::ConstantOutOfRange(value));
        }
        if let Some(name) = self.constant_cache.get(&value) {
            return Ok(name.clone());
        }
        let name = self.temp_with(Domain::singleton(value));
        let _ = self.constant_cache.insert(value, name.clone());
        Ok(name)
    }

    /// Runs a problem script against this space; a convenience for composing
    /// model-building functions.
    pub fn inject<F>(&mut self, script: F) -> Result<&mut Space, ModelError>
    where
        F: FnOnce(&mut Space) -> Result<(), ModelError>,
    {
        script(self)?;
        Ok(self)
    }

    pub(crate) fn ensure_declared(&mut self, name: &VarName) {
        if !self.store.contains(name) {
            self.store.insert(name.clone(), FdVariable::new(Domain::full()));
        }
    }

    pub(crate) fn add_propagator(&mut self, propagator: Box<dyn Propagator>) {
        self.propagators.push(propagator);
    }

    pub(crate) fn add_branch_strategy(&mut self, strategy: BranchStrategy) {
        self.brancher.push(strategy);
    }

    /// Narrows `name` to the intersection of its domain with `restriction`.
    /// An empty intersection fails the space.
    pub fn constrain(&mut self, name: &VarName, restriction: &Domain) -> Result<u64, EmptyDomain> {
        match self.store.constrain(name, restriction) {
            Ok(delta) => Ok(delta),
            Err(EmptyDomain) => {
                self.failed = true;
                Err(EmptyDomain)
            }
        }
    }

    pub fn domain(&self, name: &VarName) -> &Domain {
        self.store.domain(name)
    }

    pub fn lower_bound(&self, name: &VarName) -> u64 {
        self.store.lower_bound(name)
    }

    pub fn upper_bound(&self, name: &VarName) -> u64 {
        self.store.upper_bound(name)
    }

    pub fn domain_size(&self, name: &VarName) -> u64 {
        self.store.domain_size(name)
    }

    pub fn is_fixed(&self, name: &VarName) -> bool {
        self.store.is_fixed(name)
    }

    /// Runs every propagator, in insertion order, over and over until a full
    /// pass produces no revision increment. Any propagator emptying a domain
    /// fails the space and aborts the loop.
    ///
    /// Termination: domains only shrink and revisions only increase on
    /// shrinkage, so a zero-delta pass is eventually reached.
    pub fn propagate(&mut self) -> SpaceStatus {
        if self.failed {
            return SpaceStatus::Failed;
        }
        let store = &mut self.store;
        let mut passes = 0u64;
        loop {
            let mut pass_delta = 0;
            for propagator in self.propagators.iter_mut() {
                match propagator.step(store) {
                    Ok(delta) => pass_delta += delta,
                    Err(EmptyDomain) => {
                        debug!("space failed in {}", propagator.name());
                        self.failed = true;
                        return SpaceStatus::Failed;
                    }
                }
            }
            passes += 1;
            trace!("propagation pass {passes}: {pass_delta} revision increments");
            if pass_delta == 0 {
                break;
            }
        }
        if self.store.all_fixed() {
            SpaceStatus::Solved
        } else {
            SpaceStatus::Stable
        }
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// True iff every variable, temporaries included, is determined.
    pub fn is_solved(&self) -> bool {
        self.store.all_fixed()
    }

    /// True iff every listed variable is determined.
    pub fn variables_fixed(&self, names: &[VarName]) -> bool {
        names.iter().all(|name| self.store.is_fixed(name))
    }

    /// True iff every propagator reports itself solved.
    pub fn all_propagators_solved(&self) -> bool {
        self.propagators
            .iter()
            .all(|propagator| propagator.is_solved(&self.store))
    }

    /// A snapshot of the user-named variables: their value when determined,
    /// their remaining domain otherwise, or the failure marker throughout if
    /// the space failed.
    pub fn solution(&self) -> Solution {
        let mut values = HashMap::default();
        for (name, variable) in self.store.iter() {
            let VarName::User(user_name) = name else {
                continue;
            };
            let value = if self.failed {
                SolutionValue::Failed
            } else {
                match variable.domain().value() {
                    Some(value) => SolutionValue::Assigned(value),
                    None => SolutionValue::Unresolved(variable.domain().clone()),
                }
            };
            let _ = values.insert(user_name.clone(), value);
        }
        Solution::new(values)
    }

    /// An independent copy for committing to one branching alternative.
    ///
    /// Variables are copied with their revisions reset; propagators which can
    /// still narrow are rebuilt with fresh caches; the branching queue is
    /// shared, with the cursor copied.
    pub fn clone_space(&self) -> Space {
        let propagators = self
            .propagators
            .iter()
            .filter(|propagator| !propagator.is_solved(&self.store))
            .map(|propagator| propagator.fresh())
            .collect();
        Space {
            store: self.store.clone_reset(),
            propagators,
            brancher: self.brancher.clone_for_child(),
            statistics: SpaceStatistics::default(),
            failed: self.failed,
            next_temporary: self.next_temporary,
            constant_cache: self.constant_cache.clone(),
        }
    }

    /// The next branching choice for this space, advancing past strategies
    /// with nothing left to decide. [`None`] once the queue is exhausted.
    pub fn branch(&mut self) -> Option<Choice> {
        let queue = Rc::clone(self.brancher.queue());
        while self.brancher.cursor() < queue.len() {
            if let Some(choice) = queue[self.brancher.cursor()].branch(self) {
                return Some(choice);
            }
            self.brancher.advance();
        }
        None
    }

    pub fn statistics(&self) -> SpaceStatistics {
        self.statistics
    }

    /// Rolls a discarded child's counters into this space.
    pub(crate) fn absorb_child(&mut self, child: SpaceStatistics, outcome: ChildOutcome) {
        self.statistics.absorb(child);
        self.statistics.record(outcome);
    }
}
