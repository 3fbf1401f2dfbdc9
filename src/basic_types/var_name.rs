use std::fmt::Display;

/// Identifies a variable within a space.
///
/// Scripts refer to their variables by string name; the engine allocates
/// numbered temporaries for intermediate results of composite constraints.
/// Temporaries are excluded from solutions.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VarName {
    /// A variable named by the problem script.
    User(String),
    /// An engine-allocated temporary.
    Temp(u64),
}

impl VarName {
    pub fn is_temporary(&self) -> bool {
        matches!(self, VarName::Temp(_))
    }
}

impl From<&str> for VarName {
    fn from(name: &str) -> VarName {
        VarName::User(name.to_owned())
    }
}

impl From<String> for VarName {
    fn from(name: String) -> VarName {
        VarName::User(name)
    }
}

impl From<&VarName> for VarName {
    fn from(name: &VarName) -> VarName {
        name.clone()
    }
}

impl Display for VarName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VarName::User(name) => write!(f, "{name}"),
            VarName::Temp(id) => write!(f, "_t{id}"),
        }
    }
}
