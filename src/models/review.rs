//! Review model.

use serde::Deserialize;

/// State of a submitted review.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewState {
    Approved,
    ChangesRequested,
    Dismissed,
    Commented,
    Pending,
}

impl From<&str> for ReviewState {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "approved" => Self::Approved,
            "changes_requested" => Self::ChangesRequested,
            "dismissed" => Self::Dismissed,
            "commented" => Self::Commented,
            _ => Self::Pending,
        }
    }
}

impl std::fmt::Display for ReviewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::ChangesRequested => write!(f, "changes_requested"),
            Self::Dismissed => write!(f, "dismissed"),
            Self::Commented => write!(f, "commented"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

/// Review author as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewUser {
    pub id: i64,
    pub login: String,
}

/// A submitted review on a pull request.
///
/// `user` is absent when the author's account no longer exists. The API
/// delivers reviews oldest-first; the reduction relies on that order.
#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub id: i64,

    pub user: Option<ReviewUser>,

    /// Review state as delivered: `APPROVED`, `CHANGES_REQUESTED`,
    /// `DISMISSED`, `COMMENTED`, `PENDING`.
    pub state: String,

    /// Submission timestamp (ISO 8601); absent on pending reviews.
    pub submitted_at: Option<String>,
}

impl Review {
    /// Parse the state string into an enum.
    pub fn state_enum(&self) -> ReviewState {
        ReviewState::from(self.state.as_str())
    }

    /// Author identity used to deduplicate reviews. Authorless reviews
    /// share the `None` key.
    pub fn author_id(&self) -> Option<i64> {
        self.user.as_ref().map(|user| user.id)
    }

    /// Author login, if the account still exists.
    pub fn author_login(&self) -> Option<&str> {
        self.user.as_ref().map(|user| user.login.as_str())
    }
}
