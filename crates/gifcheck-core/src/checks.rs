//! Check-run model and status aggregation

use serde::{
    Deserialize,
    Serialize,
};

/// Lifecycle status GitHub reports for a check run.
///
/// Unknown wire values map to `Unknown` instead of failing the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Queued,
    InProgress,
    Completed,
    #[serde(other)]
    Unknown,
}

/// Conclusion of a completed check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckConclusion {
    Success,
    Failure,
    Neutral,
    Cancelled,
    TimedOut,
    ActionRequired,
    Skipped,
    Stale,
    #[serde(other)]
    Unknown,
}

/// One check run attached to the target commit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRun {
    pub name: String,
    pub status: CheckStatus,
    #[serde(default)]
    pub conclusion: Option<CheckConclusion>,
}

/// The reduced status of all check runs on a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateStatus {
    Failure,
    InProgress,
    Success,
}

/// Reduces a check-run collection to a single aggregate status.
///
/// The run named `own_name` is the notifier's own check and never counts;
/// it would otherwise hold itself in progress forever. A completed failure
/// wins over checks still running, so a fast-failing check short-circuits
/// the wait. An empty post-exclusion set is a success.
pub fn aggregate_status(runs: &[CheckRun], own_name: &str) -> AggregateStatus {
    let relevant: Vec<&CheckRun> = runs.iter().filter(|run| run.name != own_name).collect();

    let failed = relevant.iter().any(|run| {
        run.status == CheckStatus::Completed && run.conclusion == Some(CheckConclusion::Failure)
    });
    if failed {
        return AggregateStatus::Failure;
    }

    let pending = relevant
        .iter()
        .any(|run| matches!(run.status, CheckStatus::Queued | CheckStatus::InProgress));
    if pending {
        return AggregateStatus::InProgress;
    }

    AggregateStatus::Success
}
