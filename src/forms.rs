//! Typed form payloads. Every POST route deserializes into one of these
//! structs and calls `validate()` before any upstream call is issued, so a
//! missing required field never turns into an upstream 4xx. Token fields are
//! secrets: they are never logged, persisted, or echoed back into a view.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn token_is_blank(token: &SecretString) -> bool {
    token.expose_secret().trim().is_empty()
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

/// POST /create
#[derive(Debug, Deserialize)]
pub struct CreateRepoForm {
    #[serde(default)]
    pub repo_name: String,
    #[serde(default)]
    pub description: String,
    /// Write credential, scoped to this one request
    #[serde(default = "empty_secret")]
    pub token: SecretString,
    #[serde(default)]
    pub visibility: String,
}

impl CreateRepoForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.repo_name) {
            return Err("Repository name is required");
        }
        if token_is_blank(&self.token) {
            return Err("A GitHub token is required to create a repository");
        }
        Ok(())
    }
}

/// Visibility label mapping, label-faithful: a "public" submission yields a
/// public repository, anything else a private one.
pub fn visibility_to_private(label: &str) -> bool {
    label.trim() != "public"
}

/// POST /show and POST /count
#[derive(Debug, Deserialize)]
pub struct UsernameForm {
    #[serde(default)]
    pub username: String,
}

/// POST /contributors and POST /list_topic
#[derive(Debug, Deserialize)]
pub struct RepoLookupForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub repo_name: String,
}

impl RepoLookupForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.repo_name) {
            return Err("Repository name is required");
        }
        Ok(())
    }
}

/// POST /update_topic and POST /delete_topic
#[derive(Debug, Deserialize)]
pub struct TopicForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub repo_name: String,
    /// Write credential, scoped to this one request
    #[serde(default = "empty_secret")]
    pub token: SecretString,
    #[serde(default)]
    pub topic: String,
}

impl TopicForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.repo_name) {
            return Err("Repository name is required");
        }
        if is_blank(&self.topic) {
            return Err("A topic is required");
        }
        if token_is_blank(&self.token) {
            return Err("A GitHub token is required to change topics");
        }
        Ok(())
    }
}

/// POST /register
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
    /// Optional stored read token
    #[serde(default)]
    pub github_token: String,
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), &'static str> {
        if is_blank(&self.username) {
            return Err("Username is required");
        }
        if token_is_blank(&self.password) {
            return Err("Password is required");
        }
        Ok(())
    }
}

/// POST /login
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default = "empty_secret")]
    pub password: SecretString,
}
