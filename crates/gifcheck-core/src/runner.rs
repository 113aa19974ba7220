//! The notifier run loop
//!
//! Cleanup, poll, post: delete the comments left by earlier runs, poll the
//! aggregate check status until it settles, then post the matching gif.
//! The whole pipeline runs under one hard timeout.

use std::time::Duration;

use futures::future::try_join_all;
use tracing::{
    debug,
    info,
};

use crate::{
    checks::{
        aggregate_status,
        AggregateStatus,
    },
    comment::{
        gif_comment_body,
        is_notifier_comment,
    },
    error::{
        NotifierError,
        NotifierResult,
    },
    provider::{
        GifProvider,
        PullRequestHost,
    },
};

/// Gif search tag posted when every check settled green.
pub const SUCCESS_TAG: &str = "thumbs-up";

/// Gif search tag posted when a check failed.
pub const FAILURE_TAG: &str = "thumbs-down";

/// Timing and identity settings for one notifier run.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Check-run name this action reports under; excluded from aggregation.
    pub action_name: String,
    /// Delay between polls while checks are still running.
    pub poll_interval: Duration,
    /// Hard bound on the whole cleanup-and-poll pipeline.
    pub timeout: Duration,
}

/// Which terminal comment a completed run posted.
///
/// Both variants are successful runs of the notifier itself; they record
/// the fate of the checks being watched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Succeeded,
    Failed,
}

/// Runs the notifier to completion under the global timeout.
pub async fn run<H, G>(host: &H, gifs: &G, settings: &RunSettings) -> NotifierResult<RunOutcome>
where
    H: PullRequestHost,
    G: GifProvider,
{
    tokio::time::timeout(settings.timeout, run_pipeline(host, gifs, settings))
        .await
        .map_err(|_| NotifierError::Timeout(settings.timeout.as_secs()))?
}

async fn run_pipeline<H, G>(
    host: &H, gifs: &G, settings: &RunSettings,
) -> NotifierResult<RunOutcome>
where
    H: PullRequestHost,
    G: GifProvider,
{
    delete_notifier_comments(host).await?;

    loop {
        let runs = host.list_check_runs().await?;

        match aggregate_status(&runs, &settings.action_name) {
            AggregateStatus::Failure => {
                info!("A check failed, posting a {FAILURE_TAG} gif");
                post_gif_for_tag(host, gifs, FAILURE_TAG).await?;
                return Ok(RunOutcome::Failed);
            }
            AggregateStatus::Success => {
                info!("All checks passed, posting a {SUCCESS_TAG} gif");
                post_gif_for_tag(host, gifs, SUCCESS_TAG).await?;
                return Ok(RunOutcome::Succeeded);
            }
            AggregateStatus::InProgress => {
                debug!(
                    "Checks still running, polling again in {}s",
                    settings.poll_interval.as_secs()
                );
                tokio::time::sleep(settings.poll_interval).await;
            }
        }
    }
}

/// Deletes every comment the notifier posted on earlier runs.
///
/// Deletions run concurrently and all must succeed for cleanup to succeed.
/// Only the first page of comments is fetched, so marker comments buried in
/// a very long thread can be missed.
pub async fn delete_notifier_comments<H>(host: &H) -> NotifierResult<()>
where
    H: PullRequestHost,
{
    let comments = host.list_comments().await?;

    let stale: Vec<u64> = comments
        .into_iter()
        .filter(|comment| is_notifier_comment(&comment.body))
        .map(|comment| comment.id)
        .collect();

    if stale.is_empty() {
        return Ok(());
    }

    debug!("Deleting {} stale notifier comment(s)", stale.len());
    try_join_all(stale.into_iter().map(|id| host.delete_comment(id))).await?;

    Ok(())
}

/// Fetches a random gif for the tag and posts it as a comment.
pub async fn post_gif_for_tag<H, G>(host: &H, gifs: &G, tag: &str) -> NotifierResult<()>
where
    H: PullRequestHost,
    G: GifProvider,
{
    let gif = gifs.random_gif(tag).await?;
    host.create_comment(&gif_comment_body(&gif)).await
}
