//! GitHub host implementation backed by octocrab

use async_trait::async_trait;
use gifcheck_core::{
    CheckRun,
    IssueComment,
    NotifierError,
    NotifierResult,
    PullRequestHost,
};
use octocrab::models::CommentId;
use octocrab::Octocrab;
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::config::Config;

/// Wire shape of the check-runs listing for a commit.
#[derive(Debug, Deserialize)]
struct CheckRunList {
    check_runs: Vec<CheckRun>,
}

pub struct GitHubHost {
    octocrab: Octocrab,
    owner: String,
    repo: String,
    sha: String,
    number: u64,
}

impl GitHubHost {
    pub fn new(config: &Config, number: u64) -> NotifierResult<Self> {
        let octocrab = Octocrab::builder()
            .personal_token(config.github_token.expose_secret().to_string())
            .build()
            .map_err(|e| {
                NotifierError::InvalidConfig(format!("Failed to build GitHub client: {e}"))
            })?;

        Ok(Self {
            octocrab,
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            sha: config.sha.clone(),
            number,
        })
    }
}

#[async_trait]
impl PullRequestHost for GitHubHost {
    async fn list_check_runs(&self) -> NotifierResult<Vec<CheckRun>> {
        let route = format!(
            "/repos/{}/{}/commits/{}/check-runs",
            self.owner, self.repo, self.sha
        );

        let list: CheckRunList = self
            .octocrab
            .get(route, None::<&()>)
            .await
            .map_err(|e| NotifierError::ApiError(format!("Failed to list check runs: {e}")))?;

        Ok(list.check_runs)
    }

    async fn list_comments(&self) -> NotifierResult<Vec<IssueComment>> {
        // First page only; marker comments past it are missed.
        let page = self
            .octocrab
            .issues(&self.owner, &self.repo)
            .list_comments(self.number)
            .per_page(100)
            .send()
            .await
            .map_err(|e| NotifierError::ApiError(format!("Failed to list comments: {e}")))?;

        Ok(page
            .items
            .into_iter()
            .map(|comment| IssueComment {
                id: comment.id.0,
                body: comment.body.unwrap_or_default(),
            })
            .collect())
    }

    async fn delete_comment(&self, id: u64) -> NotifierResult<()> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .delete_comment(CommentId(id))
            .await
            .map_err(|e| NotifierError::ApiError(format!("Failed to delete comment {id}: {e}")))
    }

    async fn create_comment(&self, body: &str) -> NotifierResult<()> {
        self.octocrab
            .issues(&self.owner, &self.repo)
            .create_comment(self.number, body)
            .await
            .map(|_| ())
            .map_err(|e| NotifierError::ApiError(format!("Failed to create comment: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use gifcheck_core::{
        CheckConclusion,
        CheckStatus,
    };

    use super::*;

    #[test]
    fn test_check_run_listing_deserializes() {
        // Trimmed from the real API response; unknown fields are ignored.
        let raw = serde_json::json!({
            "total_count": 2,
            "check_runs": [
                {
                    "id": 4,
                    "head_sha": "ce587453ced02b1526dfb4cb910479d431683101",
                    "status": "completed",
                    "conclusion": "success",
                    "name": "build",
                    "started_at": "2018-05-04T01:14:52Z"
                },
                {
                    "id": 5,
                    "head_sha": "ce587453ced02b1526dfb4cb910479d431683101",
                    "status": "in_progress",
                    "conclusion": null,
                    "name": "test"
                }
            ]
        });

        let list: CheckRunList = serde_json::from_value(raw).unwrap();
        assert_eq!(list.check_runs.len(), 2);
        assert_eq!(list.check_runs[0].name, "build");
        assert_eq!(list.check_runs[0].status, CheckStatus::Completed);
        assert_eq!(
            list.check_runs[0].conclusion,
            Some(CheckConclusion::Success)
        );
        assert_eq!(list.check_runs[1].conclusion, None);
    }
}
