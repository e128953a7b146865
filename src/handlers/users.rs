//! Registration, login, logout.

use actix_session::Session;
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::FlashMessage;

use super::{UserStore, fail, see_other};
use crate::auth;
use crate::forms::{LoginForm, RegisterForm};
use crate::session::{SessionUser, take_return_to};

/// POST /register
pub async fn register(form: web::Form<RegisterForm>, users: UserStore) -> HttpResponse {
    let form = form.into_inner();
    if let Err(reason) = form.validate() {
        return fail(reason, "/register");
    }

    let password_hash = match auth::hash_password(&form.password) {
        Ok(hash) => hash,
        Err(error) => {
            tracing::error!("password hashing failed: {}", error);
            return fail("Registration is unavailable right now", "/register");
        }
    };

    let username = form.username.trim();
    let github_token = form.github_token.trim();
    let github_token = (!github_token.is_empty()).then_some(github_token);

    let created = {
        let store = users.lock().unwrap();
        store.create_user(username, &password_hash, github_token)
    };

    match created {
        Ok(()) => {
            tracing::info!("registered user {}", username);
            FlashMessage::success("Welcome! Please sign in.").send();
            see_other("/login")
        }
        Err(error) if error.is_constraint_violation() => {
            fail("That username is already taken", "/register")
        }
        Err(error) => {
            tracing::error!("user creation failed: {}", error);
            fail("Registration is unavailable right now", "/register")
        }
    }
}

/// POST /login. On success the session is renewed, the identity stored, and
/// any captured return path consumed.
pub async fn login(
    form: web::Form<LoginForm>,
    session: Session,
    users: UserStore,
) -> HttpResponse {
    let form = form.into_inner();
    let username = form.username.trim();

    let lookup = {
        let store = users.lock().unwrap();
        store.find_user(username)
    };

    let user = match lookup {
        Ok(user) => user,
        Err(error) => {
            tracing::error!("user lookup failed: {}", error);
            return fail("Login is unavailable right now", "/login");
        }
    };

    let verified = match &user {
        Some(user) => match auth::verify_password(&form.password, &user.password_hash) {
            Ok(verified) => verified,
            Err(error) => {
                tracing::error!("password verification failed: {}", error);
                false
            }
        },
        None => false,
    };

    if !verified {
        return fail("Invalid username or password", "/login");
    }

    if let Err(error) = SessionUser::store(&session, username) {
        tracing::error!("session write failed: {}", error);
        return fail("Login is unavailable right now", "/login");
    }

    tracing::info!("user {} signed in", username);
    FlashMessage::success(format!("Welcome back, {}!", username)).send();

    let destination = take_return_to(&session).unwrap_or_else(|| "/options".to_string());
    see_other(&destination)
}

/// GET /logout
pub async fn logout(session: Session) -> HttpResponse {
    session.purge();
    FlashMessage::success("Signed out. Goodbye!").send();
    see_other("/")
}
