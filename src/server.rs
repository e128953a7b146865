use actix_session::SessionMiddleware;
use actix_session::config::PersistentSession;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::cookie::time::Duration;
use actix_web::middleware::{Logger, from_fn};
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::handlers::{pages, repos, topics, users};
use crate::session::require_login;
use crate::storage::UserStorage;

/// Route table. The gate is injected per route: every session-dependent
/// route wraps `require_login`, everything else stays open.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(pages::home))
        .service(
            web::resource("/options")
                .route(web::get().to(pages::options).wrap(from_fn(require_login))),
        )
        .service(
            web::resource("/create")
                .route(web::get().to(pages::create_form))
                .route(web::post().to(repos::create).wrap(from_fn(require_login))),
        )
        .service(
            web::resource("/repo_list")
                .route(web::get().to(pages::repo_list_form).wrap(from_fn(require_login))),
        )
        .service(
            web::resource("/show")
                .route(web::post().to(repos::show).wrap(from_fn(require_login))),
        )
        .service(
            web::resource("/contri_list")
                .route(web::get().to(pages::contri_list_form).wrap(from_fn(require_login))),
        )
        .service(
            web::resource("/contributors")
                .route(web::post().to(repos::contributors).wrap(from_fn(require_login))),
        )
        .service(
            web::resource("/list_topic")
                .route(web::get().to(pages::list_topic_form))
                .route(web::post().to(topics::list_topic)),
        )
        .service(
            web::resource("/update_topic")
                .route(web::get().to(pages::update_topic_form))
                .route(web::post().to(topics::update_topic)),
        )
        .service(
            web::resource("/delete_topic")
                .route(web::get().to(pages::delete_topic_form))
                .route(web::post().to(topics::delete_topic)),
        )
        .service(
            web::resource("/count")
                .route(web::get().to(pages::count_form))
                .route(web::post().to(repos::count)),
        )
        .service(
            web::resource("/register")
                .route(web::get().to(pages::register_form))
                .route(web::post().to(users::register)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(pages::login_form))
                .route(web::post().to(users::login)),
        )
        .route("/logout", web::get().to(users::logout));
}

/// The web application: owns the configuration and the shared user store,
/// builds the actix app, and serves until shutdown.
pub struct WebServer {
    config: Config,
    users: Arc<Mutex<UserStorage>>,
}

impl WebServer {
    pub fn new(config: Config, users: UserStorage) -> Self {
        Self {
            config,
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub async fn start(&self) -> std::io::Result<()> {
        let users = self.users.clone();
        let github = self.config.github.clone();
        let key = Key::from(self.config.session.secret.as_bytes());
        let ttl = Duration::days(self.config.session.ttl_days as i64);
        let bind = (self.config.server.host.clone(), self.config.server.port);

        HttpServer::new(move || {
            let message_store = CookieMessageStore::builder(key.clone()).build();
            let flash = FlashMessagesFramework::builder(message_store).build();
            let sessions =
                SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                    .cookie_name("session".to_string())
                    .session_lifecycle(PersistentSession::default().session_ttl(ttl))
                    .build();

            App::new()
                .app_data(web::Data::new(users.clone()))
                .app_data(web::Data::new(github.clone()))
                .wrap(Logger::default())
                .wrap(sessions)
                .wrap(flash)
                .configure(routes)
        })
        .bind(bind)?
        .run()
        .await
    }
}
