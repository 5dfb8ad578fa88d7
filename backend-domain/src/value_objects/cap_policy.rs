// Cap policy value object

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// What the accrual updater does with a player whose projected focus reaches the cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPolicy {
    /// Leave the record untouched, timestamp included.
    #[default]
    LeaveStale,
    /// Write the cap and reset the timestamp.
    ClampAndCommit,
}

impl CapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapPolicy::LeaveStale => "leave_stale",
            CapPolicy::ClampAndCommit => "clamp_and_commit",
        }
    }
}

impl FromStr for CapPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "leave_stale" => Ok(CapPolicy::LeaveStale),
            "clamp_and_commit" => Ok(CapPolicy::ClampAndCommit),
            other => Err(ValidationError::UnknownCapPolicy(other.to_string())),
        }
    }
}
