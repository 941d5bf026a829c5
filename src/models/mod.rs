//! Data models for the action.
//!
//! Wire types deserialized from the GitHub REST API, plus the resolved
//! reviewer pair consumed by the body rewriter.

pub mod pull_request;
pub mod review;
pub mod reviewer;

// Re-exports for convenient access
pub use pull_request::PullRequest;
pub use review::{Review, ReviewState, ReviewUser};
pub use reviewer::{Reviewer, User};
