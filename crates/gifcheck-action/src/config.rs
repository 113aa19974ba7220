//! Environment-derived configuration
//!
//! Everything the action needs is read from the environment once at startup
//! into an immutable `Config` that is passed explicitly from `main`.
//! Parsing works over a plain string map so it stays unit-testable without
//! touching the process environment.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use gifcheck_core::{
    NotifierError,
    NotifierResult,
};
use secrecy::SecretString;

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the pull-request event payload.
    pub event_path: PathBuf,
    /// Name this action's own check run reports under.
    pub action_name: String,
    pub owner: String,
    pub repo: String,
    /// Commit whose check runs are watched.
    pub sha: String,
    pub github_token: SecretString,
    pub giphy_api_key: SecretString,
    /// Set when running inside an automated workflow; switches the skip
    /// exit code from 0 to the neutral code.
    pub in_workflow: bool,
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Config {
    pub fn from_env() -> NotifierResult<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_map(&vars)
    }

    pub fn from_map(vars: &HashMap<String, String>) -> NotifierResult<Self> {
        let repository = require(vars, "GITHUB_REPOSITORY")?;
        let (owner, repo) = parse_repo(&repository).ok_or_else(|| {
            NotifierError::InvalidConfig(format!("Invalid repository format: {repository}"))
        })?;

        Ok(Self {
            event_path: PathBuf::from(require(vars, "GITHUB_EVENT_PATH")?),
            action_name: require(vars, "GITHUB_ACTION")?,
            owner,
            repo,
            sha: require(vars, "GITHUB_SHA")?,
            github_token: SecretString::from(require(vars, "GITHUB_TOKEN")?),
            giphy_api_key: SecretString::from(require(vars, "GIPHY_API_KEY")?),
            in_workflow: vars.contains_key("GITHUB_WORKFLOW"),
            poll_interval: seconds_var(
                vars,
                "GIFCHECK_POLL_INTERVAL_SECS",
                DEFAULT_POLL_INTERVAL_SECS,
            )?,
            timeout: seconds_var(vars, "GIFCHECK_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?,
        })
    }
}

fn require(vars: &HashMap<String, String>, name: &str) -> NotifierResult<String> {
    vars.get(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| NotifierError::InvalidConfig(format!("Missing {name}")))
}

/// Parses a repository string into owner and name
fn parse_repo(repo: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = repo.split('/').collect();
    if parts.len() == 2 {
        Some((parts[0].to_string(), parts[1].to_string()))
    } else {
        None
    }
}

fn seconds_var(
    vars: &HashMap<String, String>, name: &str, default: u64,
) -> NotifierResult<Duration> {
    match vars.get(name) {
        None => Ok(Duration::from_secs(default)),
        Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
            NotifierError::InvalidConfig(format!("{name} must be a whole number of seconds"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        [
            ("GITHUB_EVENT_PATH", "/github/workflow/event.json"),
            ("GITHUB_ACTION", "gifcheck"),
            ("GITHUB_REPOSITORY", "octocat/hello-world"),
            ("GITHUB_SHA", "ffac537e6cbbf934b08745a378932722df287a53"),
            ("GITHUB_TOKEN", "ghp_secret"),
            ("GIPHY_API_KEY", "giphy_secret"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    #[test]
    fn test_parses_complete_environment() {
        let config = Config::from_map(&base_vars()).unwrap();

        assert_eq!(config.event_path, PathBuf::from("/github/workflow/event.json"));
        assert_eq!(config.action_name, "gifcheck");
        assert_eq!(config.owner, "octocat");
        assert_eq!(config.repo, "hello-world");
        assert!(!config.in_workflow);
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(300));
    }

    #[test]
    fn test_missing_variable_is_rejected() {
        for name in [
            "GITHUB_EVENT_PATH",
            "GITHUB_ACTION",
            "GITHUB_REPOSITORY",
            "GITHUB_SHA",
            "GITHUB_TOKEN",
            "GIPHY_API_KEY",
        ] {
            let mut vars = base_vars();
            vars.remove(name);

            let result = Config::from_map(&vars);
            assert!(
                matches!(result, Err(NotifierError::InvalidConfig(_))),
                "{name} should be required"
            );
        }
    }

    #[test]
    fn test_empty_variable_is_rejected() {
        let mut vars = base_vars();
        vars.insert("GITHUB_TOKEN".to_string(), "  ".to_string());

        assert!(matches!(
            Config::from_map(&vars),
            Err(NotifierError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_malformed_repository_is_rejected() {
        for repository in ["invalid", "a/b/c", ""] {
            let mut vars = base_vars();
            vars.insert("GITHUB_REPOSITORY".to_string(), repository.to_string());

            assert!(
                matches!(Config::from_map(&vars), Err(NotifierError::InvalidConfig(_))),
                "{repository:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_workflow_flag_from_presence() {
        let mut vars = base_vars();
        vars.insert("GITHUB_WORKFLOW".to_string(), "ci".to_string());

        let config = Config::from_map(&vars).unwrap();
        assert!(config.in_workflow);
    }

    #[test]
    fn test_interval_and_timeout_overrides() {
        let mut vars = base_vars();
        vars.insert("GIFCHECK_POLL_INTERVAL_SECS".to_string(), "2".to_string());
        vars.insert("GIFCHECK_TIMEOUT_SECS".to_string(), "60".to_string());

        let config = Config::from_map(&vars).unwrap();
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_non_numeric_override_is_rejected() {
        let mut vars = base_vars();
        vars.insert("GIFCHECK_TIMEOUT_SECS".to_string(), "soon".to_string());

        assert!(matches!(
            Config::from_map(&vars),
            Err(NotifierError::InvalidConfig(_))
        ));
    }
}
