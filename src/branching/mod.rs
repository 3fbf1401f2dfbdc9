//! Splitting stable spaces into child spaces.
//!
//! A branching strategy picks an undetermined variable (filter + ordering)
//! and a two-way split of its domain (value selection); the resulting
//! [`Choice`] is committed onto clones of the space. Strategies queue up on
//! the space and the queue is shared across the whole family of clones, each
//! space keeping its own cursor.

pub(crate) mod brancher;
pub(crate) mod branch_strategy;
pub(crate) mod choice;
pub mod distribute;
pub(crate) mod value_selection;
pub(crate) mod variable_selection;

pub use branch_strategy::BranchStrategy;
pub use choice::Choice;
pub use distribute::DistributionOptions;
pub use value_selection::ValueSelection;
pub use variable_selection::VariableFilter;
pub use variable_selection::VariableOrdering;

pub(crate) use brancher::Brancher;
