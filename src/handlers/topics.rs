//! Topic handlers. Topic addition and deletion are full-set rewrites: the
//! current set is read, the new set computed locally, and the complete
//! result written back, with both legs on the same token-scoped client.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};

use super::repos::own_repo_fallback;
use super::{UserStore, client_for, fail, html, see_other, stored_token, upstream_failure};
use crate::config::GitHubConfig;
use crate::forms::{RepoLookupForm, TopicForm};
use crate::github::GitHubClient;
use crate::session::SessionUser;
use crate::views;

/// POST /list_topic. Read-with-fallback.
pub async fn list_topic(
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
        Err(error) => return upstream_failure("list topics", &error, "/list_topic"),
    };

    let owner = form.username.trim();
    if owner.is_empty() {
        return own_repo_fallback(
            &client,
            session_user.as_ref(),
            Some("Username missing"),
            "/list_topic",
            &messages,
        )
        .await;
    }

    if let Err(reason) = form.validate() {
        return fail(reason, "/list_topic");
    }
    let repo_name = form.repo_name.trim();

    match client.get_topics(owner, repo_name).await {
        Ok(topics) => html(views::topics_page(repo_name, &topics.names, &messages)),
        Err(error) => upstream_failure("list topics", &error, "/list_topic"),
    }
}

/// POST /update_topic. Write-with-credential: union the submitted topic
/// into the current set and write the whole set back.
pub async fn update_topic(
    form: web::Form<TopicForm>,
    session: Session,
    users: UserStore,
    github: web::Data<GitHubConfig>,
    messages: IncomingFlashMessages,
) -> HttpResponse {
    let form = form.into_inner();
    let session_user = SessionUser::from_session(&session);

    let owner = form.username.trim().to_string();
    if owner.is_empty() {
        let token = stored_token(&users, session_user.as_ref());
        let client = match client_for(&github, token) {
            Ok(client) => client,
            Err(error) => return upstream_failure("add topic", &error, "/update_topic"),
        };
        return own_repo_fallback(&client, session_user.as_ref(), None, "/update_topic", &messages)
            .await;
    }

    if let Err(reason) = form.validate() {
        return fail(reason, "/update_topic");
    }

    let client = match GitHubClient::with_token(&github, form.token.clone()) {
        Ok(client) => client,
        Err(error) => return upstream_failure("add topic", &error, "/update_topic"),
    };

    match client
        .add_topic(&owner, form.repo_name.trim(), form.topic.trim())
        .await
    {
        Ok(_) => {
            FlashMessage::success("Successfully updated!!").send();
            see_other("/options")
        }
        Err(error) => upstream_failure("add topic", &error, "/update_topic"),
    }
}

/// POST /delete_topic. Write-with-credential: subtract the submitted topic
/// from the current set and write the whole set back. Deleting an absent
/// topic succeeds without a write.
pub async fn delete_topic(
    form: web::Form<TopicForm>,
    session: Session,
    users: UserStore,
    github: web::Data<GitHubConfig>,
    messages: IncomingFlashMessages,
) -> HttpResponse {
    let form = form.into_inner();
    let session_user = SessionUser::from_session(&session);

    let owner = form.username.trim().to_string();
    if owner.is_empty() {
        let token = stored_token(&users, session_user.as_ref());
        let client = match client_for(&github, token) {
            Ok(client) => client,
            Err(error) => return upstream_failure("delete topic", &error, "/delete_topic"),
        };
        return own_repo_fallback(&client, session_user.as_ref(), None, "/delete_topic", &messages)
            .await;
    }

    if let Err(reason) = form.validate() {
        return fail(reason, "/delete_topic");
    }

    let client = match GitHubClient::with_token(&github, form.token.clone()) {
        Ok(client) => client,
        Err(error) => return upstream_failure("delete topic", &error, "/delete_topic"),
    };

    match client
        .remove_topic(&owner, form.repo_name.trim(), form.topic.trim())
        .await
    {
        Ok(_) => {
            FlashMessage::success("Successfully Deleted").send();
            see_other("/options")
        }
        Err(error) => upstream_failure("delete topic", &error, "/delete_topic"),
    }
}
