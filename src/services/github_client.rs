//! GitHub API client.
//!
//! Provides an HTTP client for the GitHub REST API with token
//! authentication and uniform error handling.

use crate::config::Repository;
use crate::error::AppError;
use crate::models::{PullRequest, Review, User};
use crate::services::reviewers::UserDirectory;
use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode};
use serde::de::DeserializeOwned;

/// User agent sent with every request; GitHub rejects anonymous clients.
const USER_AGENT: &str = concat!("approved-by/", env!("CARGO_PKG_VERSION"));

const API_VERSION: &str = "2022-11-28";

/// GitHub API client configuration.
#[derive(Debug, Clone)]
pub struct GitHubClientConfig {
    /// Base URL of the REST endpoint (e.g. `https://api.github.com`).
    pub base_url: String,

    /// Access token for authentication.
    pub token: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GitHubClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.github.com".to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// GitHub API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    config: GitHubClientConfig,
}

impl GitHubClient {
    /// Create a new GitHub client.
    pub fn new(config: GitHubClientConfig) -> Result<Self, AppError> {
        let mut headers = header::HeaderMap::new();

        // Add the bearer token header for authentication
        let mut token_value = header::HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|_| AppError::authentication("Invalid token format"))?;
        token_value.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, token_value);
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static(API_VERSION),
        );

        // Build the HTTP client
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Get the full URL for an API request.
    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Handle API response errors.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        endpoint: &str,
    ) -> Result<T, AppError> {
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| AppError::internal(format!("Failed to parse response: {}", e)))
        } else if status == StatusCode::UNAUTHORIZED {
            // 401 Unauthorized - token is expired or revoked
            Err(AppError::authentication_expired(
                "GitHub token expired or revoked",
            ))
        } else {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();
            // GitHub returns errors as {"message": "..."}
            let body_message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str().map(String::from)));

            let message = match (status, &body_message) {
                (StatusCode::FORBIDDEN, _) => "Access denied".to_string(),
                (StatusCode::NOT_FOUND, _) => "Resource not found".to_string(),
                (StatusCode::TOO_MANY_REQUESTS, _) => "Rate limit exceeded".to_string(),
                (_, Some(msg)) => msg.clone(),
                _ => format!("Request failed ({}): {}", status_code, body),
            };

            Err(AppError::github_api_full(message, status_code, endpoint))
        }
    }

    /// Get a single pull request.
    pub async fn get_pull_request(
        &self,
        repo: &Repository,
        number: u64,
    ) -> Result<PullRequest, AppError> {
        let endpoint = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.name, number);
        let url = self.api_url(&endpoint);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, &endpoint).await
    }

    /// List submitted reviews for a pull request, oldest first.
    ///
    /// Fetches a single page of up to 100 reviews; later pages are not
    /// requested.
    pub async fn list_reviews(
        &self,
        repo: &Repository,
        number: u64,
    ) -> Result<Vec<Review>, AppError> {
        let endpoint = format!(
            "/repos/{}/{}/pulls/{}/reviews",
            repo.owner, repo.name, number
        );
        let url = self.api_url(&endpoint);
        let response = self
            .client
            .get(&url)
            .query(&[("per_page", "100")])
            .send()
            .await?;
        self.handle_response(response, &endpoint).await
    }

    /// Look up a user account.
    pub async fn get_user(&self, username: &str) -> Result<User, AppError> {
        let endpoint = format!("/users/{}", username);
        let url = self.api_url(&endpoint);
        let response = self.client.get(&url).send().await?;
        self.handle_response(response, &endpoint).await
    }

    /// Replace the pull request description.
    pub async fn update_pull_request_body(
        &self,
        repo: &Repository,
        number: u64,
        body: &str,
    ) -> Result<(), AppError> {
        let endpoint = format!("/repos/{}/{}/pulls/{}", repo.owner, repo.name, number);
        let url = self.api_url(&endpoint);

        let response = self
            .client
            .patch(&url)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?;

        let _: PullRequest = self.handle_response(response, &endpoint).await?;
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for GitHubClient {
    async fn display_name(&self, username: &str) -> Result<Option<String>, AppError> {
        let user = self.get_user(username).await?;
        Ok(user.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_construction() {
        let client = GitHubClient::new(GitHubClientConfig {
            base_url: "https://api.github.com/".to_string(),
            token: "test-token".to_string(),
            timeout_secs: 30,
        })
        .unwrap();

        assert_eq!(
            client.api_url("/repos/octo-org/widgets/pulls/12"),
            "https://api.github.com/repos/octo-org/widgets/pulls/12"
        );
    }

    #[test]
    fn test_enterprise_base_url() {
        let client = GitHubClient::new(GitHubClientConfig {
            base_url: "https://github.example.com/api/v3".to_string(),
            token: "test-token".to_string(),
            timeout_secs: 30,
        })
        .unwrap();

        assert_eq!(
            client.api_url("/users/octocat"),
            "https://github.example.com/api/v3/users/octocat"
        );
    }

    #[test]
    fn test_rejects_unencodable_token() {
        let result = GitHubClient::new(GitHubClientConfig {
            token: "bad\ntoken".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(AppError::Authentication { .. })));
    }
}
