use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Execution,
    Consensus,
    Validator,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Execution, Role::Consensus, Role::Validator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Execution => "execution",
            Role::Consensus => "consensus",
            Role::Validator => "validator",
        }
    }

    /// Prefix of every environment variable the role contributes.
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Role::Execution => "EC",
            Role::Consensus => "CC",
            Role::Validator => "VL",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "execution" => Ok(Role::Execution),
            "consensus" => Ok(Role::Consensus),
            "validator" => Ok(Role::Validator),
            other => Err(format!("unknown client role '{other}'")),
        }
    }
}
