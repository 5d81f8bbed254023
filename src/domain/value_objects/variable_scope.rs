//! Variable scope value object

use serde::{Deserialize, Serialize};

/// Lifetime of a variable binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableScope {
    /// Cleared when the current output file is finished
    #[default]
    File,
    /// Cleared when the current generation unit is finished
    Generation,
    /// Kept for the whole run
    Run,
}

impl std::str::FromStr for VariableScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "file" => Ok(VariableScope::File),
            "generation" => Ok(VariableScope::Generation),
            "run" => Ok(VariableScope::Run),
            other => Err(format!(
                "unknown variable scope '{}' (expected file, generation or run)",
                other
            )),
        }
    }
}

impl std::fmt::Display for VariableScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VariableScope::File => write!(f, "file"),
            VariableScope::Generation => write!(f, "generation"),
            VariableScope::Run => write!(f, "run"),
        }
    }
}
