//! # Emerald
//! Emerald is a finite-domain constraint solver built around cloneable
//! computation spaces, in the tradition of the Mozart/Oz programming system.
//!
//! A [`Space`] holds integer variables over finite domains, propagators that
//! narrow those domains, and a queue of branching strategies. Solving is a
//! tree search: the engine runs a space to a propagation fixpoint and, when
//! the space is stable but not solved, clones it once per branching
//! alternative and explores the clones depth-first. Because spaces are
//! self-contained there is no trail and no undo: discarding a clone discards
//! its narrowing.
//!
//! # Using Emerald
//! Solving a problem starts with **declaring variables** over their domains:
//! ```rust
//! # use emerald_solver::{Domain, Space};
//! let mut space = Space::new();
//! space.decl_with("x", Domain::range(0, 9));
//! space.decl_with("y", Domain::range(0, 9));
//! ```
//!
//! Then **constraints** are posted; composite constraints return the name of
//! their (possibly temporary) result variable:
//! ```rust
//! # use emerald_solver::{Domain, Space};
//! # let mut space = Space::new();
//! # space.decl_with("x", Domain::range(0, 9));
//! # space.decl_with("y", Domain::range(0, 9));
//! space.neq("x", "y");
//! space.plus_into("x", "y", "s");
//! space.num("s", 9).expect("within the band");
//! ```
//!
//! Finally a **distribution strategy** names the decision variables and a
//! **search driver** walks the space tree:
//! ```rust
//! # use emerald_solver::{distribute, DepthFirstSearch, Domain, SearchResult, Space, VarName};
//! # let mut space = Space::new();
//! # space.decl_with("x", Domain::range(0, 9));
//! # space.decl_with("y", Domain::range(0, 9));
//! # space.neq("x", "y");
//! # space.plus_into("x", "y", "s");
//! # space.num("s", 9).expect("within the band");
//! let decisions: Vec<VarName> = vec!["x".into(), "y".into()];
//! distribute::fail_first(&mut space, &decisions);
//!
//! let mut search = DepthFirstSearch::new(space);
//! match search.next_solution() {
//!     SearchResult::Solved { solution, .. } => {
//!         assert_eq!(
//!             solution.get_integer_value("x") + solution.get_integer_value("y"),
//!             9
//!         );
//!     }
//!     SearchResult::Exhausted => panic!("this problem has solutions"),
//! }
//! ```
//!
//! Optimisation runs through [`BranchAndBound`], which re-constrains every
//! open space to beat the incumbent solution via a caller-supplied hook.

pub mod asserts;
pub(crate) mod basic_types;
pub mod branching;
pub(crate) mod constraints;
pub mod containers;
pub(crate) mod engine;
pub(crate) mod propagators;
pub mod search;

// A private module with public re-exports, so that the main types are
// importable directly from the crate root.
mod api;

pub use api::*;
