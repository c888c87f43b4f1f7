//! Descriptive labels about the invoking CI environment.

use serde::{Deserialize, Serialize};

/// Placeholder used for any label the environment does not provide.
pub const UNKNOWN: &str = "unknown";
/// Branch assumed when no branch label is set.
pub const DEFAULT_BRANCH: &str = "main";
/// Number of characters kept from the commit identifier.
pub const COMMIT_PREFIX_LEN: usize = 8;

pub const BRANCH_VAR: &str = "GITHUB_REF_NAME";
pub const COMMIT_VAR: &str = "GITHUB_SHA";
pub const WORKFLOW_VAR: &str = "GITHUB_WORKFLOW";
pub const RUN_NUMBER_VAR: &str = "GITHUB_RUN_NUMBER";
pub const ACTOR_VAR: &str = "GITHUB_ACTOR";

/// Read-only snapshot of the run environment, attached to reports verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub branch: String,
    pub commit: String,
    pub workflow: String,
    pub run_number: String,
    pub actor: String,
}

impl Default for RunContext {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl RunContext {
    /// Reads labels from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a context from an arbitrary variable lookup. Empty values are
    /// treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            branch: get(BRANCH_VAR, DEFAULT_BRANCH),
            commit: get(COMMIT_VAR, UNKNOWN)
                .chars()
                .take(COMMIT_PREFIX_LEN)
                .collect(),
            workflow: get(WORKFLOW_VAR, UNKNOWN),
            run_number: get(RUN_NUMBER_VAR, UNKNOWN),
            actor: get(ACTOR_VAR, UNKNOWN),
        }
    }
}
