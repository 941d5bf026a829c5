//! approved-by - keeps an `Approved-by:` block in a pull request
//! description in sync with the reviews that currently stand approved.
//!
//! One invocation processes one pull request: fetch the description and
//! the review history, reduce the history to standing approvals, resolve
//! the approvers' display names through a persistent cache, and write the
//! description back only when the text actually changed.

pub mod config;
pub mod error;
pub mod models;
pub mod services;

use config::ActionContext;
use error::AppError;
use services::approvals::{body_with_approvals, latest_approvals};
use services::github_client::{GitHubClient, GitHubClientConfig};
use services::name_cache::NameCache;
use services::reviewers::resolve_reviewers;

/// Run the action once against the pull request named by `context`.
pub async fn run(context: &ActionContext) -> Result<(), AppError> {
    let client = GitHubClient::new(GitHubClientConfig {
        base_url: context.api_base_url.clone(),
        token: context.token.clone(),
        ..Default::default()
    })?;

    let pull = client
        .get_pull_request(&context.repository, context.pull_number)
        .await?;
    log::debug!(
        "Processing {}#{}: {}",
        context.repository,
        pull.number,
        pull.title
    );

    let reviews = client
        .list_reviews(&context.repository, context.pull_number)
        .await?;
    log::debug!("Fetched {} reviews", reviews.len());

    let approvals = latest_approvals(reviews);
    for review in &approvals {
        log::debug!(
            "{} is {}",
            review.author_login().unwrap_or("<deleted>"),
            review.state_enum()
        );
    }

    let mut cache = NameCache::load(&context.cache_path);
    log::debug!("Name cache holds {} entries", cache.len());
    let reviewers = resolve_reviewers(&client, &approvals, &mut cache).await?;
    cache.save(&context.cache_path);

    let body = body_with_approvals(pull.body.as_deref(), &reviewers);

    if pull.body.as_deref() == Some(body.as_str()) {
        log::debug!("Description unchanged, skipping update");
    } else {
        client
            .update_pull_request_body(&context.repository, context.pull_number, &body)
            .await?;
        log::info!(
            "Updated description of {}#{}",
            context.repository,
            context.pull_number
        );
    }

    Ok(())
}
