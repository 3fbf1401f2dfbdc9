use log::debug;

use crate::basic_types::EmptyDomain;
use crate::basic_types::Solution;
use crate::engine::ChildOutcome;
use crate::engine::Space;
use crate::engine::SpaceStatistics;
use crate::engine::SpaceStatus;
use crate::search::SearchNode;
use crate::search::SearchResult;
use crate::search::SolvedTest;

/// Depth-first branch-and-bound.
///
/// The driver keeps the best solution found so far and, through the
/// caller-supplied `constrain_better` hook, forces every space it still
/// explores to be strictly better than that incumbent. The hook posts
/// whatever ordering constraint defines "better" (e.g. a lower bound on an
/// objective variable); spaces that cannot beat the incumbent then fail
/// during propagation and are discarded.
///
/// [`BranchAndBound::next_improvement`] is the single-step mode: it returns
/// after every strictly improving solution. [`BranchAndBound::run`] drives
/// the search to exhaustion and returns the final incumbent.
pub struct BranchAndBound<C: FnMut(&mut Space, &Solution)> {
    stack: Vec<SearchNode>,
    solved_test: SolvedTest,
    constrain_better: C,
    best: Option<Solution>,
    /// Bumped per incumbent; nodes remember which version they were last
    /// constrained against so newer incumbents re-constrain them lazily.
    incumbent_version: u64,
    statistics: SpaceStatistics,
}

impl<C: FnMut(&mut Space, &Solution)> BranchAndBound<C> {
    pub fn new(root: Space, constrain_better: C) -> BranchAndBound<C> {
        BranchAndBound::with_solved_test(root, constrain_better, SolvedTest::default())
    }

    pub fn with_solved_test(
        root: Space,
        constrain_better: C,
        solved_test: SolvedTest,
    ) -> BranchAndBound<C> {
        BranchAndBound {
            stack: vec![SearchNode::new(root)],
            solved_test,
            constrain_better,
            best: None,
            incumbent_version: 0,
            statistics: SpaceStatistics::default(),
        }
    }

    /// Runs until a solution strictly better than the incumbent is found, or
    /// until the tree is exhausted.
    pub fn next_improvement(&mut self) -> SearchResult {
        loop {
            if self.stack.is_empty() {
                debug!("branch-and-bound exhausted: {:?}", self.statistics);
                return SearchResult::Exhausted;
            }
            let top = self.stack.len() - 1;

            // A newer incumbent arrived since this space was last touched:
            // constrain it to beat the incumbent and re-run to fixpoint.
            if self.stack[top].incumbent_version < self.incumbent_version {
                self.stack[top].incumbent_version = self.incumbent_version;
                let best = self.best.as_ref().expect("version only moves with a best");
                (self.constrain_better)(&mut self.stack[top].space, best);
                self.stack[top].propagated = false;
            }

            if !self.stack[top].propagated {
                self.stack[top].propagated = true;
                if self.stack[top].space.propagate() == SpaceStatus::Failed {
                    self.discard_top(ChildOutcome::Failed);
                    continue;
                }
                if self.solved_test.is_met(&self.stack[top].space) {
                    let solution = self.stack[top].space.solution();
                    self.discard_top(ChildOutcome::Succeeded);
                    self.best = Some(solution.clone());
                    self.incumbent_version += 1;
                    debug!(
                        "incumbent {} found, {} spaces still open",
                        self.incumbent_version,
                        self.stack.len()
                    );
                    return SearchResult::Solved {
                        solution,
                        more: !self.stack.is_empty(),
                    };
                }
            }

            if !self.stack[top].branched {
                self.stack[top].branched = true;
                self.stack[top].choice = self.stack[top].space.branch();
            }

            let exhausted = match &self.stack[top].choice {
                Some(choice) => self.stack[top].next_alternative >= choice.num_choices(),
                None => true,
            };
            if exhausted {
                self.discard_top(ChildOutcome::Stable);
                continue;
            }

            let alternative = self.stack[top].next_alternative;
            self.stack[top].next_alternative += 1;
            let mut child = self.stack[top].space.clone_space();
            let commit = self.stack[top]
                .choice
                .as_ref()
                .expect("exhaustion check passed")
                .commit(&mut child, alternative);
            match commit {
                Ok(()) => {
                    let mut node = SearchNode::new(child);
                    // The child inherits the parent's incumbent version: the
                    // parent's constraints-against-best are part of the clone.
                    node.incumbent_version = self.stack[top].incumbent_version;
                    self.stack.push(node);
                }
                Err(EmptyDomain) => {
                    let child_statistics = child.statistics();
                    self.stack[top]
                        .space
                        .absorb_child(child_statistics, ChildOutcome::Failed);
                }
            }
        }
    }

    /// Drives the search to exhaustion and returns the best solution found,
    /// if any.
    pub fn run(&mut self) -> Option<Solution> {
        while let SearchResult::Solved { .. } = self.next_improvement() {}
        self.best.clone()
    }

    /// The best solution found so far.
    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    /// The space counters accumulated at the root.
    pub fn statistics(&self) -> SpaceStatistics {
        let mut statistics = self.statistics;
        for node in &self.stack {
            statistics.absorb(node.space.statistics());
        }
        statistics
    }

    fn discard_top(&mut self, outcome: ChildOutcome) {
        let node = self.stack.pop().expect("caller checked for a top entry");
        let child_statistics = node.space.statistics();
        let outcome = match outcome {
            ChildOutcome::Stable
                if child_statistics.succeeded_children == 0
                    && child_statistics.failed_children > 0 =>
            {
                ChildOutcome::Failed
            }
            other => other,
        };
        match self.stack.last_mut() {
            Some(parent) => parent.space.absorb_child(child_statistics, outcome),
            None => {
                self.statistics.absorb(child_statistics);
                self.statistics.record(outcome);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::Domain;
    use crate::basic_types::VarName;
    use crate::branching::distribute;

    /// Maximize "z" by forcing each explored space past the incumbent.
    fn greater_z(space: &mut Space, best: &Solution) {
        let incumbent = best.get_integer_value("z");
        let _ = space.constrain(&"z".into(), &Domain::range(incumbent + 1, crate::SUP));
    }

    #[test]
    fn maximizes_a_sum() {
        let mut space = Space::new();
        let _ = space.decl_with("x", Domain::range(1, 5));
        let _ = space.decl_with("y", Domain::range(1, 5));
        let _ = space.plus_into("x", "y", "z");
        let names: Vec<VarName> = vec!["x".into(), "y".into()];
        distribute::naive(&mut space, &names);

        let mut search = BranchAndBound::new(space, greater_z);
        let best = search.run().expect("satisfiable");
        assert_eq!(best.get_integer_value("z"), 10);
        assert_eq!(best.get_integer_value("x"), 5);
        assert_eq!(best.get_integer_value("y"), 5);
    }

    #[test]
    fn improvements_are_strictly_increasing() {
        let mut space = Space::new();
        let _ = space.decl_with("x", Domain::range(0, 3));
        let _ = space.decl_with("y", Domain::range(0, 3));
        let _ = space.plus_into("x", "y", "z");
        let names: Vec<VarName> = vec!["x".into(), "y".into()];
        distribute::naive(&mut space, &names);

        let mut search = BranchAndBound::new(space, greater_z);
        let mut objectives = Vec::new();
        while let SearchResult::Solved { solution, .. } = search.next_improvement() {
            objectives.push(solution.get_integer_value("z"));
        }
        assert!(objectives.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(objectives.last(), Some(&6));
    }

    #[test]
    fn an_unsatisfiable_problem_has_no_best() {
        let mut space = Space::new();
        let _ = space.decl_with("z", Domain::range(0, 5));
        let _ = space.num("a", 7).expect("in range");
        let _ = space.eq("z", "a");

        let mut search = BranchAndBound::new(space, greater_z);
        assert!(search.run().is_none());
    }
}
