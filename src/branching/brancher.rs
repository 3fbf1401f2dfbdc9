use std::rc::Rc;

use crate::branching::BranchStrategy;

/// The branching state of a space: a queue of [`BranchStrategy`]s shared by
/// the whole family of spaces, plus this space's private cursor into it.
///
/// The queue is append-only while the problem script runs and read-only once
/// search begins, so sharing it by [`Rc`] across clones is safe. Each space
/// advances its own cursor past strategies whose variables are already
/// determined, falling through to deeper strategies.
#[derive(Debug)]
pub(crate) struct Brancher {
    queue: Rc<Vec<BranchStrategy>>,
    cursor: usize,
}

impl Brancher {
    pub(crate) fn new() -> Brancher {
        Brancher {
            queue: Rc::new(Vec::new()),
            cursor: 0,
        }
    }

    /// Appends a strategy. Only called during problem construction, before
    /// the queue is shared with any clone.
    pub(crate) fn push(&mut self, strategy: BranchStrategy) {
        Rc::make_mut(&mut self.queue).push(strategy);
    }

    pub(crate) fn queue(&self) -> &Rc<Vec<BranchStrategy>> {
        &self.queue
    }

    pub(crate) fn cursor(&self) -> usize {
        self.cursor
    }

    pub(crate) fn advance(&mut self) {
        self.cursor += 1;
    }

    /// The brancher for a cloned space: same queue, copied cursor.
    pub(crate) fn clone_for_child(&self) -> Brancher {
        Brancher {
            queue: Rc::clone(&self.queue),
            cursor: self.cursor,
        }
    }
}
