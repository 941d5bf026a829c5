//! Action configuration from the environment.
//!
//! GitHub Actions delivers inputs and the triggering event through
//! environment variables: the token as `INPUT_GITHUB_TOKEN` (or the
//! workflow-level `GITHUB_TOKEN`), the repository as `GITHUB_REPOSITORY`,
//! and the event payload as a JSON file named by `GITHUB_EVENT_PATH`.
//! Everything is resolved once at startup into an [`ActionContext`] that
//! the rest of the run receives explicitly.

use crate::error::AppError;
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default REST endpoint when `GITHUB_API_URL` is not set.
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default location of the username -> display name cache file.
const DEFAULT_CACHE_PATH: &str = "cache.json";

/// Repository coordinates, parsed from `owner/name` form.
#[derive(Debug, Clone)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    /// Parse `owner/name`. Both segments must be non-empty.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => Ok(Self {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(AppError::configuration(format!(
                "Invalid repository '{}', expected owner/name",
                raw
            ))),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Everything one invocation needs, resolved up front.
#[derive(Debug, Clone)]
pub struct ActionContext {
    /// API access token. Never logged.
    pub token: String,

    /// Repository the triggering pull request belongs to.
    pub repository: Repository,

    /// Number of the triggering pull request.
    pub pull_number: u64,

    /// Base URL of the REST endpoint.
    pub api_base_url: String,

    /// Location of the persistent name cache.
    pub cache_path: PathBuf,
}

/// Subset of the workflow event payload this action reads.
#[derive(Debug, Deserialize)]
struct EventPayload {
    pull_request: Option<EventPullRequest>,
}

#[derive(Debug, Deserialize)]
struct EventPullRequest {
    number: u64,
}

impl ActionContext {
    /// Build the context from the GitHub Actions environment.
    ///
    /// A missing token, repository, or pull request context is a fatal
    /// configuration error.
    pub fn from_env() -> Result<Self, AppError> {
        let token = non_empty_var("INPUT_GITHUB_TOKEN")
            .or_else(|| non_empty_var("GITHUB_TOKEN"))
            .ok_or_else(|| AppError::configuration("No GITHUB_TOKEN found in input"))?;

        let repository = non_empty_var("GITHUB_REPOSITORY")
            .ok_or_else(|| AppError::configuration("GITHUB_REPOSITORY is not set"))
            .and_then(|raw| Repository::parse(&raw))?;

        let event_path = non_empty_var("GITHUB_EVENT_PATH")
            .ok_or_else(|| AppError::configuration("GITHUB_EVENT_PATH is not set"))?;
        let payload = fs::read_to_string(&event_path).map_err(|e| {
            AppError::configuration(format!("Failed to read event payload {}: {}", event_path, e))
        })?;
        let pull_number = pull_number_from_payload(&payload)?;

        let api_base_url = non_empty_var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let cache_path = non_empty_var("APPROVED_BY_CACHE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_PATH));

        Ok(Self {
            token,
            repository,
            pull_number,
            api_base_url,
            cache_path,
        })
    }
}

/// Extract the pull request number from an event payload.
fn pull_number_from_payload(raw: &str) -> Result<u64, AppError> {
    let payload: EventPayload = serde_json::from_str(raw)
        .map_err(|e| AppError::configuration(format!("Malformed event payload: {}", e)))?;

    payload
        .pull_request
        .map(|pull| pull.number)
        .ok_or_else(|| AppError::configuration("No pull request found in payload"))
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.is_empty())
}
