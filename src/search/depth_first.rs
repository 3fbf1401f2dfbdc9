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

/// Depth-first exploration of the space tree.
///
/// Each call to [`DepthFirstSearch::next_solution`] resumes where the
/// previous one stopped, so enumerating all solutions is a matter of calling
/// it until [`SearchResult::Exhausted`].
pub struct DepthFirstSearch {
    stack: Vec<SearchNode>,
    solved_test: SolvedTest,
    statistics: SpaceStatistics,
}

impl DepthFirstSearch {
    pub fn new(root: Space) -> DepthFirstSearch {
        DepthFirstSearch::with_solved_test(root, SolvedTest::default())
    }

    pub fn with_solved_test(root: Space, solved_test: SolvedTest) -> DepthFirstSearch {
        DepthFirstSearch {
            stack: vec![SearchNode::new(root)],
            solved_test,
            statistics: SpaceStatistics::default(),
        }
    }

    /// Runs until the next solution or until the tree is exhausted.
    pub fn next_solution(&mut self) -> SearchResult {
        loop {
            if self.stack.is_empty() {
                debug!("search exhausted: {:?}", self.statistics);
                return SearchResult::Exhausted;
            }
            let top = self.stack.len() - 1;

            if !self.stack[top].propagated {
                self.stack[top].propagated = true;
                if self.stack[top].space.propagate() == SpaceStatus::Failed {
                    self.discard_top(ChildOutcome::Failed);
                    continue;
                }
                if self.solved_test.is_met(&self.stack[top].space) {
                    let solution = self.stack[top].space.solution();
                    self.discard_top(ChildOutcome::Succeeded);
                    debug!("solution found, {} spaces still open", self.stack.len());
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
                Ok(()) => self.stack.push(SearchNode::new(child)),
                Err(EmptyDomain) => {
                    // The child failed before it was even pushed.
                    let child_statistics = child.statistics();
                    self.stack[top]
                        .space
                        .absorb_child(child_statistics, ChildOutcome::Failed);
                }
            }
        }
    }

    /// Enumerates every remaining solution.
    pub fn all_solutions(&mut self) -> Vec<Solution> {
        let mut solutions = Vec::new();
        while let SearchResult::Solved { solution, .. } = self.next_solution() {
            solutions.push(solution);
        }
        solutions
    }

    /// The space counters accumulated at the root.
    pub fn statistics(&self) -> SpaceStatistics {
        let mut statistics = self.statistics;
        for node in &self.stack {
            statistics.absorb(node.space.statistics());
        }
        statistics
    }

    /// Pops the top space, reclassifying a stable space none of whose
    /// children succeeded (while at least one failed) as failed, and rolls
    /// its counters into its parent.
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
