pub(crate) mod domain;
mod domain_arithmetic;
pub(crate) mod model_error;
pub(crate) mod propagation_status;
pub(crate) mod solution;
pub(crate) mod var_name;
pub(crate) mod variable;

pub use domain::Domain;
pub use domain::Interval;
pub use domain::INF;
pub use domain::SUP;
pub use model_error::ModelError;
pub use propagation_status::EmptyDomain;
pub use propagation_status::PropagationStatus;
pub use solution::Solution;
pub use solution::SolutionValue;
pub use var_name::VarName;
pub use variable::FdVariable;
