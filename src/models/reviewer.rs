//! Resolved reviewer identity.

use serde::Deserialize;

/// User record from the directory lookup endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub login: String,

    /// Display name; `None` when the user never set one.
    pub name: Option<String>,
}

/// A reviewer with a resolved display name.
///
/// An empty `name` means the user has no display name; the body rewriter
/// then omits the parenthetical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reviewer {
    pub username: String,
    pub name: String,
}
