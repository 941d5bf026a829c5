//! Display-name resolution for approved reviewers.
//!
//! Consults the persistent name cache first and falls back to one
//! directory lookup per miss, storing the result back into the cache.

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{Review, Reviewer};
use crate::services::name_cache::NameCache;

/// Lookup capability resolving a username to an optional display name.
#[async_trait]
pub trait UserDirectory {
    async fn display_name(&self, username: &str) -> Result<Option<String>, AppError>;
}

/// Resolve display names for the given reviews, preserving input order.
///
/// Reviews without an author are skipped. Every cache miss costs exactly
/// one directory lookup; the result is stored back even when the user has
/// no display name, so later runs skip the lookup too.
pub async fn resolve_reviewers<D: UserDirectory>(
    directory: &D,
    reviews: &[Review],
    cache: &mut NameCache,
) -> Result<Vec<Reviewer>, AppError> {
    let mut reviewers = Vec::with_capacity(reviews.len());

    for review in reviews {
        let Some(username) = review.author_login() else {
            continue;
        };
        reviewers.push(resolve_reviewer(directory, username, cache).await?);
    }

    Ok(reviewers)
}

async fn resolve_reviewer<D: UserDirectory>(
    directory: &D,
    username: &str,
    cache: &mut NameCache,
) -> Result<Reviewer, AppError> {
    if let Some(name) = cache.get(username) {
        return Ok(Reviewer {
            username: username.to_string(),
            name: name.to_string(),
        });
    }

    log::info!("Looking up display name for {}", username);
    let name = directory.display_name(username).await?.unwrap_or_default();
    cache.insert(username, &name);

    Ok(Reviewer {
        username: username.to_string(),
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewUser;
    use std::sync::Mutex;

    struct StubDirectory {
        names: Vec<(&'static str, Option<&'static str>)>,
        calls: Mutex<Vec<String>>,
    }

    impl StubDirectory {
        fn new(names: Vec<(&'static str, Option<&'static str>)>) -> Self {
            Self {
                names,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UserDirectory for StubDirectory {
        async fn display_name(&self, username: &str) -> Result<Option<String>, AppError> {
            self.calls.lock().unwrap().push(username.to_string());
            Ok(self
                .names
                .iter()
                .find(|(login, _)| *login == username)
                .and_then(|(_, name)| name.map(String::from)))
        }
    }

    struct FailingDirectory;

    #[async_trait]
    impl UserDirectory for FailingDirectory {
        async fn display_name(&self, _username: &str) -> Result<Option<String>, AppError> {
            Err(AppError::network("connection reset"))
        }
    }

    fn approved(id: i64, user_id: i64, login: &str) -> Review {
        Review {
            id,
            user: Some(ReviewUser {
                id: user_id,
                login: login.to_string(),
            }),
            state: "APPROVED".to_string(),
            submitted_at: None,
        }
    }

    fn authorless(id: i64) -> Review {
        Review {
            id,
            user: None,
            state: "APPROVED".to_string(),
            submitted_at: None,
        }
    }

    #[tokio::test]
    async fn test_cache_miss_costs_one_lookup() {
        let directory = StubDirectory::new(vec![("alice", Some("Alice A."))]);
        let mut cache = NameCache::default();
        let reviews = [approved(1, 10, "alice")];

        let reviewers = resolve_reviewers(&directory, &reviews, &mut cache)
            .await
            .unwrap();
        assert_eq!(reviewers[0].name, "Alice A.");
        assert_eq!(directory.call_count(), 1);
        assert_eq!(cache.get("alice"), Some("Alice A."));

        // Second pass with the same cache: no further lookups
        let again = resolve_reviewers(&directory, &reviews, &mut cache)
            .await
            .unwrap();
        assert_eq!(again, reviewers);
        assert_eq!(directory.call_count(), 1);
    }

    #[tokio::test]
    async fn test_missing_display_name_is_cached_as_empty() {
        let directory = StubDirectory::new(vec![("bob", None)]);
        let mut cache = NameCache::default();
        let reviews = [approved(1, 20, "bob")];

        let reviewers = resolve_reviewers(&directory, &reviews, &mut cache)
            .await
            .unwrap();
        assert_eq!(reviewers[0].name, "");
        assert_eq!(cache.get("bob"), Some(""));

        resolve_reviewers(&directory, &reviews, &mut cache)
            .await
            .unwrap();
        assert_eq!(directory.call_count(), 1);
    }

    #[tokio::test]
    async fn test_input_order_preserved_and_authorless_skipped() {
        let directory = StubDirectory::new(vec![("carol", Some("Carol")), ("dave", None)]);
        let mut cache = NameCache::default();
        let reviews = [
            approved(1, 30, "carol"),
            authorless(2),
            approved(3, 40, "dave"),
        ];

        let reviewers = resolve_reviewers(&directory, &reviews, &mut cache)
            .await
            .unwrap();
        let usernames: Vec<&str> = reviewers.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(usernames, ["carol", "dave"]);
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let mut cache = NameCache::default();
        let reviews = [approved(1, 10, "alice")];

        let result = resolve_reviewers(&FailingDirectory, &reviews, &mut cache).await;
        assert!(matches!(result, Err(AppError::Network { .. })));
        assert_eq!(cache.get("alice"), None);
    }
}
