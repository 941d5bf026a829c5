//! Approval reduction and description rewriting.
//!
//! Both halves are pure: [`latest_approvals`] reduces a review history to
//! the set of standing approvals, [`body_with_approvals`] splices the
//! matching `Approved-by:` block into the description text.

use std::collections::HashSet;

use crate::models::{Review, ReviewState, Reviewer};

/// Token searched for anywhere in the body to decide whether a block
/// already exists.
const MARKER: &str = "Approved-by";

/// Anchored form the replacement is pinned to. The loose search and the
/// anchored replacement can disagree (a body containing the bare token
/// without this form is left untouched); downstream consumers depend on
/// that behavior, so both checks are kept as-is.
const ANCHORED_MARKER: &str = "\nApproved-by:";

/// Reduce a review history to the standing approvals.
///
/// Reviews arrive oldest-first. A newest-first scan keeps each author's
/// most recent non-comment review, then keeps those that are approvals.
/// Comments are invisible to the reduction: they neither grant nor clear
/// approval. Output order is the scan order, newest first.
pub fn latest_approvals(reviews: Vec<Review>) -> Vec<Review> {
    let mut seen: HashSet<Option<i64>> = HashSet::new();

    reviews
        .into_iter()
        .rev()
        .filter(|review| review.state_enum() != ReviewState::Commented)
        .filter(|review| seen.insert(review.author_id()))
        .filter(|review| review.state_enum() == ReviewState::Approved)
        .collect()
}

/// Rewrite a pull request description to carry the current approvals.
///
/// Replaces everything from the first `\nApproved-by:` line to the end of
/// the text, or appends a fresh block when no marker is present at all.
pub fn body_with_approvals(body: Option<&str>, reviewers: &[Reviewer]) -> String {
    let mut body = body.unwrap_or_default().to_string();

    let mut block = String::new();
    for reviewer in reviewers {
        block.push_str("\nApproved-by: ");
        block.push_str(&reviewer.username);
        if !reviewer.name.is_empty() {
            block.push_str(" (");
            block.push_str(&reviewer.name);
            block.push(')');
        }
    }

    if body.contains(MARKER) {
        if let Some(index) = body.find(ANCHORED_MARKER) {
            body.truncate(index);
            body.push_str(&block);
        }
    } else if !block.is_empty() {
        body.push('\n');
        body.push_str(&block);
    }

    body
}
