mod config;
mod github;
mod giphy;

use std::process::exit;

use anyhow::Result;
use gifcheck_core::{
    logging,
    runner::{
        self,
        RunSettings,
    },
    PullRequestEvent,
    RunOutcome,
};
use tracing::{
    error,
    info,
};

use crate::config::Config;
use crate::github::GitHubHost;
use crate::giphy::GiphyClient;

/// Exit code signalling "skip, not a failure" to workflow orchestration.
const NEUTRAL_EXIT_CODE: i32 = 78;

#[tokio::main]
async fn main() {
    logging::init();

    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let code = match run().await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            1
        }
    };

    exit(code);
}

async fn run() -> Result<i32> {
    let config = Config::from_env()?;

    let event = match PullRequestEvent::from_path(&config.event_path)? {
        Some(event) => event,
        None => {
            info!("No event payload found, nothing to do");
            return Ok(skip_code(&config));
        }
    };

    if !event.is_notifiable() {
        info!("Ignoring pull-request event with action {:?}", event.action);
        return Ok(skip_code(&config));
    }

    info!(
        "Watching checks on {}/{}@{} for pull request #{}",
        config.owner, config.repo, config.sha, event.number
    );

    let host = GitHubHost::new(&config, event.number)?;
    let gifs = GiphyClient::new(config.giphy_api_key.clone())?;
    let settings = RunSettings {
        action_name: config.action_name.clone(),
        poll_interval: config.poll_interval,
        timeout: config.timeout,
    };

    match runner::run(&host, &gifs, &settings).await? {
        RunOutcome::Succeeded => info!("Checks passed, posted the success gif"),
        RunOutcome::Failed => info!("Checks failed, posted the failure gif"),
    }

    Ok(0)
}

fn skip_code(config: &Config) -> i32 {
    if config.in_workflow {
        NEUTRAL_EXIT_CODE
    } else {
        0
    }
}
