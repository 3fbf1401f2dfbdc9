pub use crate::basic_types::Domain;
pub use crate::basic_types::EmptyDomain;
pub use crate::basic_types::FdVariable;
pub use crate::basic_types::Interval;
pub use crate::basic_types::ModelError;
pub use crate::basic_types::PropagationStatus;
pub use crate::basic_types::Solution;
pub use crate::basic_types::SolutionValue;
pub use crate::basic_types::VarName;
pub use crate::basic_types::INF;
pub use crate::basic_types::SUP;
pub use crate::branching::distribute;
pub use crate::branching::BranchStrategy;
pub use crate::branching::Choice;
pub use crate::branching::DistributionOptions;
pub use crate::branching::ValueSelection;
pub use crate::branching::VariableFilter;
pub use crate::branching::VariableOrdering;
pub use crate::engine::Space;
pub use crate::engine::SpaceStatistics;
pub use crate::engine::SpaceStatus;
pub use crate::engine::VariableStore;
pub use crate::propagators::CmpOp;
pub use crate::search::BranchAndBound;
pub use crate::search::DepthFirstSearch;
pub use crate::search::SearchResult;
pub use crate::search::SolvedTest;
