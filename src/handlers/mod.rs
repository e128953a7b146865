//! Request handlers. Each one is a boundary adapter: typed form in, at most
//! one upstream client call (two for the contributors view), a rendered page
//! or redirect out. Upstream failures are recovered here and become a flash
//! message plus a safe redirect; nothing propagates past the handler.

pub mod pages;
pub mod repos;
pub mod topics;
pub mod users;

use actix_web::http::header::{self, ContentType};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::FlashMessage;
use secrecy::SecretString;
use std::sync::{Arc, Mutex};

use crate::config::GitHubConfig;
use crate::errors::GitHubError;
use crate::github::GitHubClient;
use crate::session::SessionUser;
use crate::storage::UserStorage;

/// Shared user store handle, as registered via `web::Data`
pub type UserStore = web::Data<Arc<Mutex<UserStorage>>>;

pub(crate) fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Flash an error and redirect somewhere safe
pub(crate) fn fail(message: &str, location: &str) -> HttpResponse {
    FlashMessage::error(message.to_string()).send();
    see_other(location)
}

pub(crate) fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(body)
}

/// Recover an upstream failure at the handler boundary: log the operation
/// (never the credential), flash the user-facing message, redirect.
pub(crate) fn upstream_failure(
    operation: &str,
    error: &GitHubError,
    location: &str,
) -> HttpResponse {
    tracing::error!("upstream call failed during {}: {}", operation, error);
    fail(&error.to_string(), location)
}

/// A read client scoped to the given token, or anonymous without one
pub(crate) fn client_for(
    github: &GitHubConfig,
    token: Option<SecretString>,
) -> Result<GitHubClient, GitHubError> {
    match token {
        Some(token) => GitHubClient::with_token(github, token),
        None => GitHubClient::anonymous(github),
    }
}

/// The session identity's stored read token, when one exists. Lookup
/// failures degrade to anonymous reads.
pub(crate) fn stored_token(
    users: &UserStore,
    session_user: Option<&SessionUser>,
) -> Option<SecretString> {
    let username = &session_user?.username;
    let store = users.lock().unwrap();
    match store.find_user(username) {
        Ok(Some(user)) => user.github_token.map(SecretString::new),
        Ok(None) => None,
        Err(error) => {
            tracing::warn!("stored token lookup failed for {}: {}", username, error);
            None
        }
    }
}
