//! Repository handlers: create, list, contributors/stargazers, popularity
//! filter.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use super::{UserStore, client_for, fail, html, see_other, stored_token, upstream_failure};
use crate::config::GitHubConfig;
use crate::forms::{CreateRepoForm, RepoLookupForm, UsernameForm, visibility_to_private};
use crate::github::GitHubClient;
use crate::github::types::{NewRepository, Repository};
use crate::session::{SessionUser, resolve_username};
use crate::views;

const CREATE_HOMEPAGE: &str = "https://github.com";

/// POST /create (gated). Write-with-credential: the client is scoped to the
/// token from this form submission, never to anything stored server-side.
pub async fn create(
    form: web::Form<CreateRepoForm>,
    github: web::Data<GitHubConfig>,
) -> HttpResponse {
    let form = form.into_inner();
    if let Err(reason) = form.validate() {
        return fail(reason, "/create");
    }

    let client = match GitHubClient::with_token(&github, form.token.clone()) {
        Ok(client) => client,
        Err(error) => return upstream_failure("create repository", &error, "/create"),
    };

    let new_repo = NewRepository {
        name: form.repo_name.trim().to_string(),
        description: form.description.trim().to_string(),
        homepage: CREATE_HOMEPAGE.to_string(),
        private: visibility_to_private(&form.visibility),
    };

    match client.create_repository(&new_repo).await {
        Ok(repo) => {
            FlashMessage::success(format!("Successfully created new repo {}!", repo.full_name))
                .send();
            see_other("/options")
        }
        Err(error) => upstream_failure("create repository", &error, "/create"),
    }
}

/// POST /show (gated). Read-with-fallback: a blank username means the
/// session identity's own repositories.
pub async fn show(
    form: web::Form<UsernameForm>,
    session: Session,
    users: UserStore,
    github: web::Data<GitHubConfig>,
    messages: IncomingFlashMessages,
) -> HttpResponse {
    let session_user = SessionUser::from_session(&session);
    let Some(username) = resolve_username(&form.username, session_user.as_ref()) else {
        return fail("Username missing", "/repo_list");
    };

    let token = stored_token(&users, session_user.as_ref());
    let client = match client_for(&github, token) {
        Ok(client) => client,
        Err(error) => return upstream_failure("list repositories", &error, "/repo_list"),
    };

    match client.list_repositories(&username).await {
        Ok(repos) => html(views::repo_list_page(&username, &repos, None, &messages)),
        Err(error) => upstream_failure("list repositories", &error, "/repo_list"),
    }
}

/// POST /contributors (gated). With owner and repo given this performs the
/// two read calls; with a blank owner it falls back to the session
/// identity's own repository list.
pub async fn contributors(
    form: web::Form<RepoLookupForm>,
    session: Session,
    users: UserStore,
    github: web::Data<GitHubConfig>,
    messages: IncomingFlashMessages,
) -> HttpResponse {
    let session_user = SessionUser::from_session(&session);
    let token = stored_token(&users, session_user.as_ref());
    let client = match client_for(&github, token) {
        Ok(client) => client,
        Err(error) => return upstream_failure("list contributors", &error, "/contri_list"),
    };

    let owner = form.username.trim();
    if owner.is_empty() {
        return own_repo_fallback(
            &client,
            session_user.as_ref(),
            Some("Username missing"),
            "/contri_list",
            &messages,
        )
        .await;
    }

    if let Err(reason) = form.validate() {
        return fail(reason, "/contri_list");
    }
    let repo_name = form.repo_name.trim();

    let contributors = match client.list_contributors(owner, repo_name).await {
        Ok(contributors) => contributors,
        Err(error) => return upstream_failure("list contributors", &error, "/contri_list"),
    };
    let stargazers = match client.list_stargazers(owner, repo_name).await {
        Ok(stargazers) => stargazers,
        Err(error) => return upstream_failure("list stargazers", &error, "/contri_list"),
    };

    html(views::contributors_page(
        owner,
        repo_name,
        &contributors,
        &stargazers,
        &messages,
    ))
}

/// POST /count. Lists a user's repositories and keeps the popular ones.
pub async fn count(
    form: web::Form<UsernameForm>,
    session: Session,
    users: UserStore,
    github: web::Data<GitHubConfig>,
    messages: IncomingFlashMessages,
) -> HttpResponse {
    let session_user = SessionUser::from_session(&session);
    let Some(username) = resolve_username(&form.username, session_user.as_ref()) else {
        return fail("Username missing", "/count");
    };

    let token = stored_token(&users, session_user.as_ref());
    let client = match client_for(&github, token) {
        Ok(client) => client,
        Err(error) => return upstream_failure("list repositories", &error, "/count"),
    };

    match client.list_repositories(&username).await {
        Ok(repos) => {
            let popular = filter_popular(repos);
            html(views::repo_list_page(&username, &popular, None, &messages))
        }
        Err(error) => upstream_failure("list repositories", &error, "/count"),
    }
}

/// Repositories with more than 5 stars and more than 5 forks
pub fn filter_popular(repos: Vec<Repository>) -> Vec<Repository> {
    repos
        .into_iter()
        .filter(|repo| repo.stargazers_count > 5 && repo.forks_count > 5)
        .collect()
}

/// Shared blank-username fallback: render the session identity's own
/// repository list, or redirect when nobody is signed in.
pub(crate) async fn own_repo_fallback(
    client: &GitHubClient,
    session_user: Option<&SessionUser>,
    notice: Option<&str>,
    redirect: &str,
    messages: &IncomingFlashMessages,
) -> HttpResponse {
    let Some(user) = session_user else {
        return fail("Username missing", redirect);
    };

    match client.list_repositories(&user.username).await {
        Ok(repos) => html(views::repo_list_page(&user.username, &repos, notice, messages)),
        Err(error) => upstream_failure("list repositories", &error, redirect),
    }
}
