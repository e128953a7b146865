use crate::config::GitHubConfig;
use crate::errors::GitHubError;
use crate::github::types::*;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// GitHub API client. Anonymous clients can only read public data; clients
/// built with a bearer token act as that token's owner.
pub struct GitHubClient {
    client: Client,
    base_url: String,
    token: Option<SecretString>,
}

impl GitHubClient {
    /// Create a public-read client without credentials
    pub fn anonymous(config: &GitHubConfig) -> Result<Self, GitHubError> {
        Self::build(config, None)
    }

    /// Create a client authenticated with a bearer token. The token is held
    /// as a secret and exposed only while building a request header.
    pub fn with_token(config: &GitHubConfig, token: SecretString) -> Result<Self, GitHubError> {
        Self::build(config, Some(token))
    }

    fn build(config: &GitHubConfig, token: Option<SecretString>) -> Result<Self, GitHubError> {
        let client = Client::builder()
            .user_agent(format!("gh-console/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GitHubError::Network { source: e })?;

        Ok(GitHubClient {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, url)
            .header("Accept", "application/vnd.github.v3+json");

        if let Some(token) = &self.token {
            builder = builder.header("Authorization", format!("Bearer {}", token.expose_secret()));
        }

        builder
    }

    /// Create a repository owned by the authenticated user
    pub async fn create_repository(&self, repo: &NewRepository) -> Result<Repository, GitHubError> {
        let url = format!("{}/user/repos", self.base_url);

        let response = self.request(Method::POST, &url).json(repo).send().await?;

        match response.status() {
            status if status.is_success() => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication),
            StatusCode::UNPROCESSABLE_ENTITY => {
                // Name collision or invalid repository parameters
                let text = response.text().await?;
                Err(GitHubError::Api { message: text })
            }
            StatusCode::FORBIDDEN => {
                let text = response.text().await?;
                Err(classify_forbidden(text))
            }
            _ => Err(handle_error_response(response).await),
        }
    }

    /// List the repositories of a user
    pub async fn list_repositories(&self, username: &str) -> Result<Vec<Repository>, GitHubError> {
        let url = format!("{}/users/{}/repos", self.base_url, username);

        let response = self.request(Method::GET, &url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "user".to_string(),
                resource_id: username.to_string(),
            }),
            StatusCode::FORBIDDEN => {
                let text = response.text().await?;
                Err(classify_forbidden(text))
            }
            _ => Err(handle_error_response(response).await),
        }
    }

    /// List the contributors of a repository
    pub async fn list_contributors(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Contributor>, GitHubError> {
        let url = format!("{}/repos/{}/{}/contributors", self.base_url, owner, repo);

        let response = self.request(Method::GET, &url).send().await?;

        match response.status() {
            status if status.is_success() => {
                // Empty repositories answer 204 with no body
                if status == StatusCode::NO_CONTENT {
                    return Ok(Vec::new());
                }
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "repository".to_string(),
                resource_id: format!("{}/{}", owner, repo),
            }),
            StatusCode::FORBIDDEN => {
                let text = response.text().await?;
                Err(classify_forbidden(text))
            }
            _ => Err(handle_error_response(response).await),
        }
    }

    /// List the accounts that starred a repository
    pub async fn list_stargazers(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<Stargazer>, GitHubError> {
        let url = format!("{}/repos/{}/{}/stargazers", self.base_url, owner, repo);

        let response = self.request(Method::GET, &url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "repository".to_string(),
                resource_id: format!("{}/{}", owner, repo),
            }),
            StatusCode::FORBIDDEN => {
                let text = response.text().await?;
                Err(classify_forbidden(text))
            }
            _ => Err(handle_error_response(response).await),
        }
    }

    /// Get the current topic set of a repository
    pub async fn get_topics(&self, owner: &str, repo: &str) -> Result<TopicSet, GitHubError> {
        let url = format!("{}/repos/{}/{}/topics", self.base_url, owner, repo);

        let response = self.request(Method::GET, &url).send().await?;

        match response.status() {
            status if status.is_success() => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "repository".to_string(),
                resource_id: format!("{}/{}", owner, repo),
            }),
            StatusCode::FORBIDDEN => {
                let text = response.text().await?;
                Err(classify_forbidden(text))
            }
            _ => Err(handle_error_response(response).await),
        }
    }

    /// Replace the topic set of a repository. The upstream endpoint replaces
    /// wholesale, so `names` must be the complete desired set, never a delta.
    pub async fn set_topics(
        &self,
        owner: &str,
        repo: &str,
        names: &[String],
    ) -> Result<TopicSet, GitHubError> {
        let url = format!("{}/repos/{}/{}/topics", self.base_url, owner, repo);
        let body = TopicSet {
            names: names.to_vec(),
        };

        let response = self.request(Method::PUT, &url).json(&body).send().await?;

        match response.status() {
            status if status.is_success() => {
                let text = response.text().await?;
                Ok(serde_json::from_str(&text)?)
            }
            StatusCode::UNAUTHORIZED => Err(GitHubError::Authentication),
            StatusCode::NOT_FOUND => Err(GitHubError::NotFound {
                resource_type: "repository".to_string(),
                resource_id: format!("{}/{}", owner, repo),
            }),
            StatusCode::FORBIDDEN => {
                let text = response.text().await?;
                Err(classify_forbidden(text))
            }
            _ => Err(handle_error_response(response).await),
        }
    }

    /// Add one topic: read the full current set, union locally, write the
    /// full new set. Read and write run on this same client so both legs see
    /// the same credential and visibility context. Adding a topic that is
    /// already present leaves the set untouched.
    pub async fn add_topic(
        &self,
        owner: &str,
        repo: &str,
        topic: &str,
    ) -> Result<TopicSet, GitHubError> {
        let current = self.get_topics(owner, repo).await?;
        if current.contains(topic) {
            return Ok(current);
        }

        let mut names = current.names;
        names.push(topic.to_string());
        self.set_topics(owner, repo, &names).await
    }

    /// Remove one topic by exact string match: read the full current set,
    /// subtract locally, write the full new set. Removing an absent topic is
    /// a no-op, not a failure; the write is skipped entirely.
    pub async fn remove_topic(
        &self,
        owner: &str,
        repo: &str,
        topic: &str,
    ) -> Result<TopicSet, GitHubError> {
        let current = self.get_topics(owner, repo).await?;
        if !current.contains(topic) {
            return Ok(current);
        }

        let names: Vec<String> = current
            .names
            .into_iter()
            .filter(|name| name != topic)
            .collect();
        self.set_topics(owner, repo, &names).await
    }
}

/// Map a 403 body to the most specific error it describes
fn classify_forbidden(text: String) -> GitHubError {
    if text.contains("Bad credentials") || text.contains("Invalid token") {
        GitHubError::Authentication
    } else if text.contains("rate limit") {
        GitHubError::RateLimitExceeded
    } else {
        GitHubError::Api { message: text }
    }
}

/// Fallback for any other non-success response
async fn handle_error_response(response: Response) -> GitHubError {
    let status = response.status();
    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    GitHubError::Server {
        status: status.as_u16(),
        message: text,
    }
}
