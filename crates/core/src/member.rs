//! Members, groups, and grouping modes.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Opaque identifier of a channel member (e.g. a Slack user id `U1234`).
///
/// No internal structure is inspected; two members are the same member
/// exactly when their identifiers are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The members destined for one conversation. Order carries no meaning.
pub type Group = Vec<MemberId>;

/// Which grouping configuration a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupMode {
    /// Small groups at the minimum size; a trailing singleton is merged.
    Pairing,
    /// Larger groups at the maximum size; never rebalanced.
    Group,
}

impl GroupMode {
    /// The tag handed to the conversation sink.
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupMode::Pairing => "pairing",
            GroupMode::Group => "group",
        }
    }
}

impl std::fmt::Display for GroupMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pairing" | "pairs" | "pair" => Ok(GroupMode::Pairing),
            "group" | "groups" => Ok(GroupMode::Group),
            other => Err(format!("Unknown group mode '{other}' (expected 'pairing' or 'group')")),
        }
    }
}
