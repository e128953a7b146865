//! GET pages: the landing page, the menu, and one form per operation.

use actix_session::Session;
use actix_web::HttpResponse;
use actix_web_flash_messages::IncomingFlashMessages;

use super::html;
use crate::session::SessionUser;
use crate::views::{self, Field};

pub async fn home(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::home_page(&messages))
}

pub async fn options(session: Session, messages: IncomingFlashMessages) -> HttpResponse {
    // The guard ran already; fall back to a placeholder rather than panic
    let username = SessionUser::from_session(&session)
        .map(|user| user.username)
        .unwrap_or_else(|| "unknown".to_string());
    html(views::options_page(&username, &messages))
}

pub async fn create_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Create a repository",
        "/create",
        &[
            Field::text("repo_name", "Repository name"),
            Field::text("description", "Description"),
            Field::password("token", "GitHub token"),
            Field {
                name: "visibility",
                label: "Visibility",
                kind: views::FieldKind::Visibility,
            },
        ],
        "Create",
        &messages,
    ))
}

pub async fn repo_list_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "List repositories",
        "/show",
        &[Field::text("username", "Username (blank for your own)")],
        "Show",
        &messages,
    ))
}

pub async fn contri_list_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Contributors and stargazers",
        "/contributors",
        &[
            Field::text("username", "Owner"),
            Field::text("repo_name", "Repository name"),
        ],
        "Show",
        &messages,
    ))
}

pub async fn list_topic_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "List topics",
        "/list_topic",
        &[
            Field::text("username", "Owner"),
            Field::text("repo_name", "Repository name"),
        ],
        "Show",
        &messages,
    ))
}

pub async fn update_topic_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Add a topic",
        "/update_topic",
        &[
            Field::text("username", "Owner"),
            Field::text("repo_name", "Repository name"),
            Field::text("topic", "Topic to add"),
            Field::password("token", "GitHub token"),
        ],
        "Add topic",
        &messages,
    ))
}

pub async fn delete_topic_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Delete a topic",
        "/delete_topic",
        &[
            Field::text("username", "Owner"),
            Field::text("repo_name", "Repository name"),
            Field::text("topic", "Topic to delete"),
            Field::password("token", "GitHub token"),
        ],
        "Delete topic",
        &messages,
    ))
}

pub async fn count_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Popular repositories",
        "/count",
        &[Field::text("username", "Username (blank for your own)")],
        "Show",
        &messages,
    ))
}

pub async fn register_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Register",
        "/register",
        &[
            Field::text("username", "Username"),
            Field::password("password", "Password"),
            Field::password("github_token", "GitHub read token (optional)"),
        ],
        "Register",
        &messages,
    ))
}

pub async fn login_form(messages: IncomingFlashMessages) -> HttpResponse {
    html(views::form_page(
        "Login",
        "/login",
        &[
            Field::text("username", "Username"),
            Field::password("password", "Password"),
        ],
        "Sign in",
        &messages,
    ))
}
