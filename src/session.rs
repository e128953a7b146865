use actix_session::{Session, SessionExt};
use actix_web::body::BoxBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::HttpResponse;
use actix_web_flash_messages::FlashMessage;
use serde::{Deserialize, Serialize};

/// Session key of the signed-in identity
pub const SESSION_USER_KEY: &str = "user";

/// Session key of the URL to return to after a forced login
pub const RETURN_TO_KEY: &str = "return_to";

/// The identity stored in the session. Only the username lives here; stored
/// tokens stay in the user database and are looked up per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    pub username: String,
}

impl SessionUser {
    /// Read the signed-in identity, if any
    pub fn from_session(session: &Session) -> Option<SessionUser> {
        session.get(SESSION_USER_KEY).ok().flatten()
    }

    /// Record a fresh identity in the session
    pub fn store(session: &Session, username: &str) -> Result<(), actix_web::Error> {
        session.renew();
        session.insert(
            SESSION_USER_KEY,
            SessionUser {
                username: username.to_string(),
            },
        )?;
        Ok(())
    }
}

/// Consume the post-login redirect target, if one was captured
pub fn take_return_to(session: &Session) -> Option<String> {
    session
        .remove_as::<String>(RETURN_TO_KEY)
        .and_then(|parsed| parsed.ok())
}

/// Guard for session-dependent routes, injected per route in the router
/// configuration. Unauthenticated callers are redirected to the login view
/// with the originally requested path captured for the post-login redirect;
/// the wrapped handler never runs.
pub async fn require_login(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
    let session = req.get_session();

    if SessionUser::from_session(&session).is_none() {
        session.insert(RETURN_TO_KEY, req.path().to_string())?;
        FlashMessage::error("You must be signed in first!").send();

        let (req, _payload) = req.into_parts();
        let response = HttpResponse::SeeOther()
            .insert_header((header::LOCATION, "/login"))
            .finish();
        return Ok(ServiceResponse::new(req, response));
    }

    next.call(req).await
}

/// The one blank-username fallback: a non-blank submitted value wins,
/// otherwise the session identity's username, otherwise nothing.
pub fn resolve_username(submitted: &str, session_user: Option<&SessionUser>) -> Option<String> {
    let trimmed = submitted.trim();
    if !trimmed.is_empty() {
        return Some(trimmed.to_string());
    }
    session_user.map(|user| user.username.clone())
}
