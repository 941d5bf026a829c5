//! Pull request model.

use serde::Deserialize;

/// The slice of a pull request this action reads and writes.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Pull request number within the repository.
    pub number: u64,

    pub title: String,

    /// Description (Markdown); `None` when the author left it empty.
    pub body: Option<String>,

    /// URL of the pull request in the web UI.
    pub html_url: String,
}
