//! Seams between the run loop and the outside services
//!
//! The binary plugs octocrab and reqwest implementations into these traits;
//! tests plug in in-memory fakes.

use async_trait::async_trait;

use crate::{
    checks::CheckRun,
    comment::Gif,
    error::NotifierResult,
};

/// One comment on the pull request, reduced to what cleanup needs.
#[derive(Debug, Clone)]
pub struct IssueComment {
    pub id: u64,
    pub body: String,
}

/// Operations the notifier needs against the pull request and its commit.
#[async_trait]
pub trait PullRequestHost: Send + Sync {
    /// Lists all check runs attached to the target commit.
    async fn list_check_runs(&self) -> NotifierResult<Vec<CheckRun>>;

    /// Lists the comments on the pull request.
    async fn list_comments(&self) -> NotifierResult<Vec<IssueComment>>;

    /// Deletes one comment by id.
    async fn delete_comment(&self, id: u64) -> NotifierResult<()>;

    /// Posts a new comment with the given body.
    async fn create_comment(&self, body: &str) -> NotifierResult<()>;
}

/// Source of a random gif matching a tag.
#[async_trait]
pub trait GifProvider: Send + Sync {
    async fn random_gif(&self, tag: &str) -> NotifierResult<Gif>;
}
