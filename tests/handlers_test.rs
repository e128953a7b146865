//! End-to-end route tests: real router, cookie sessions, flash framework,
//! and a mock upstream API.

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use mockito::Matcher;
use secrecy::SecretString;
use serde_json::json;
use std::sync::{Arc, Mutex};

use gh_console::auth;
use gh_console::config::GitHubConfig;
use gh_console::server::routes;
use gh_console::storage::UserStorage;

macro_rules! test_app {
    ($users:expr, $github:expr) => {{
        let key = Key::from(&[7u8; 64]);
        test::init_service(
            App::new()
                .app_data(web::Data::new($users.clone()))
                .app_data(web::Data::new($github.clone()))
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
                        .cookie_name("session".to_string())
                        .build(),
                )
                .wrap(
                    FlashMessagesFramework::builder(
                        CookieMessageStore::builder(key.clone()).build(),
                    )
                    .build(),
                )
                .configure(routes),
        )
        .await
    }};
}

fn config_for(server: &mockito::ServerGuard) -> GitHubConfig {
    GitHubConfig {
        api_base_url: server.url(),
        timeout_secs: 5,
    }
}

fn store_with_user(username: &str, password: &str) -> Arc<Mutex<UserStorage>> {
    let storage = UserStorage::in_memory().unwrap();
    let hash = auth::hash_password(&SecretString::new(password.to_string())).unwrap();
    storage.create_user(username, &hash, None).unwrap();
    Arc::new(Mutex::new(storage))
}

fn empty_store() -> Arc<Mutex<UserStorage>> {
    Arc::new(Mutex::new(UserStorage::in_memory().unwrap()))
}

fn location<B>(response: &ServiceResponse<B>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without a Location header")
        .to_str()
        .unwrap()
}

fn cookies_of<B>(response: &ServiceResponse<B>) -> Vec<Cookie<'static>> {
    response
        .response()
        .cookies()
        .map(|cookie| cookie.into_owned())
        .collect()
}

/// Sign in and return the cookies to attach to subsequent requests
macro_rules! sign_in {
    ($app:expr, $username:expr, $password:expr) => {{
        let request = test::TestRequest::post()
            .uri("/login")
            .set_form([("username", $username), ("password", $password)])
            .to_request();
        let response = test::call_service(&$app, request).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/options");
        cookies_of(&response)
    }};
}

#[actix_web::test]
async fn gated_route_redirects_unauthenticated_callers_without_an_upstream_call() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server.mock("POST", "/user/repos").expect(0).create_async().await;

    let app = test_app!(empty_store(), config_for(&server));
    let request = test::TestRequest::post()
        .uri("/create")
        .set_form([
            ("repo_name", "demo"),
            ("token", "T"),
            ("visibility", "public"),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
    upstream.assert_async().await;
}

#[actix_web::test]
async fn gate_captures_the_requested_path_for_after_login() {
    let server = mockito::Server::new_async().await;
    let app = test_app!(store_with_user("bob", "pw"), config_for(&server));

    // Unauthenticated hit on a gated page captures return_to in the session
    let request = test::TestRequest::get().uri("/options").to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(location(&response), "/login");
    let cookies = cookies_of(&response);

    // Logging in with that session returns to the captured path
    let mut request = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "bob"), ("password", "pw")]);
    for cookie in cookies {
        request = request.cookie(cookie);
    }
    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/options");
}

#[actix_web::test]
async fn failed_login_redirects_back_to_login() {
    let server = mockito::Server::new_async().await;
    let app = test_app!(store_with_user("bob", "pw"), config_for(&server));

    let request = test::TestRequest::post()
        .uri("/login")
        .set_form([("username", "bob"), ("password", "wrong")])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/login");
}

#[actix_web::test]
async fn show_with_blank_username_lists_the_session_users_repos() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/users/bob/repos")
        .with_status(200)
        .with_body(json!([]).to_string())
        .expect(1)
        .create_async()
        .await;

    let app = test_app!(store_with_user("bob", "pw"), config_for(&server));
    let cookies = sign_in!(app, "bob", "pw");

    let mut request = test::TestRequest::post()
        .uri("/show")
        .set_form([("username", "")]);
    for cookie in cookies {
        request = request.cookie(cookie);
    }
    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
}

#[actix_web::test]
async fn update_topic_writes_exactly_one_full_union() {
    let mut server = mockito::Server::new_async().await;
    let read = server
        .mock("GET", "/repos/alice/demo/topics")
        .match_header("authorization", "Bearer T")
        .with_status(200)
        .with_body(json!({"names": ["web"]}).to_string())
        .expect(1)
        .create_async()
        .await;
    let write = server
        .mock("PUT", "/repos/alice/demo/topics")
        .match_header("authorization", "Bearer T")
        .match_body(Matcher::Json(json!({"names": ["web", "infra"]})))
        .with_status(200)
        .with_body(json!({"names": ["web", "infra"]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let app = test_app!(empty_store(), config_for(&server));
    let request = test::TestRequest::post()
        .uri("/update_topic")
        .set_form([
            ("username", "alice"),
            ("repo_name", "demo"),
            ("token", "T"),
            ("topic", "infra"),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/options");
    read.assert_async().await;
    write.assert_async().await;
}

#[actix_web::test]
async fn delete_topic_writes_the_difference() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/alice/demo/topics")
        .with_status(200)
        .with_body(json!({"names": ["web", "infra"]}).to_string())
        .create_async()
        .await;
    let write = server
        .mock("PUT", "/repos/alice/demo/topics")
        .match_body(Matcher::Json(json!({"names": ["web"]})))
        .with_status(200)
        .with_body(json!({"names": ["web"]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let app = test_app!(empty_store(), config_for(&server));
    let request = test::TestRequest::post()
        .uri("/delete_topic")
        .set_form([
            ("username", "alice"),
            ("repo_name", "demo"),
            ("token", "T"),
            ("topic", "infra"),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/options");
    write.assert_async().await;
}

#[actix_web::test]
async fn deleting_an_absent_topic_succeeds_without_a_write() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/repos/alice/demo/topics")
        .with_status(200)
        .with_body(json!({"names": ["web"]}).to_string())
        .create_async()
        .await;
    let write = server
        .mock("PUT", "/repos/alice/demo/topics")
        .expect(0)
        .create_async()
        .await;

    let app = test_app!(empty_store(), config_for(&server));
    let request = test::TestRequest::post()
        .uri("/delete_topic")
        .set_form([
            ("username", "alice"),
            ("repo_name", "demo"),
            ("token", "T"),
            ("topic", "missing"),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/options");
    write.assert_async().await;
}

#[actix_web::test]
async fn blank_topic_field_never_reaches_upstream() {
    let mut server = mockito::Server::new_async().await;
    let read = server
        .mock("GET", "/repos/alice/demo/topics")
        .expect(0)
        .create_async()
        .await;

    let app = test_app!(empty_store(), config_for(&server));
    let request = test::TestRequest::post()
        .uri("/update_topic")
        .set_form([
            ("username", "alice"),
            ("repo_name", "demo"),
            ("token", "T"),
            ("topic", ""),
        ])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/update_topic");
    read.assert_async().await;
}

// Regression pin for the visibility mapping: a "public" submission creates a
// public repository.
#[actix_web::test]
async fn create_with_public_visibility_requests_a_public_repo() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("POST", "/user/repos")
        .match_header("authorization", "Bearer T")
        .match_body(Matcher::PartialJson(json!({"name": "demo", "private": false})))
        .with_status(201)
        .with_body(
            json!({
                "id": 1,
                "name": "demo",
                "full_name": "bob/demo",
                "owner": {"login": "bob", "html_url": "https://github.com/bob"},
                "html_url": "https://github.com/bob/demo",
                "private": false,
                "fork": false
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let app = test_app!(store_with_user("bob", "pw"), config_for(&server));
    let cookies = sign_in!(app, "bob", "pw");

    let mut request = test::TestRequest::post().uri("/create").set_form([
        ("repo_name", "demo"),
        ("description", "a demo"),
        ("token", "T"),
        ("visibility", "public"),
    ]);
    for cookie in cookies {
        request = request.cookie(cookie);
    }
    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/options");
    upstream.assert_async().await;
}

#[actix_web::test]
async fn upstream_failure_is_recovered_to_a_redirect() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/users/ghost/repos")
        .with_status(404)
        .with_body(json!({"message": "Not Found"}).to_string())
        .create_async()
        .await;

    let app = test_app!(store_with_user("bob", "pw"), config_for(&server));
    let cookies = sign_in!(app, "bob", "pw");

    let mut request = test::TestRequest::post()
        .uri("/show")
        .set_form([("username", "ghost")]);
    for cookie in cookies {
        request = request.cookie(cookie);
    }
    let response = test::call_service(&app, request.to_request()).await;

    // Not-found becomes a flash + safe redirect, never a 500
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/repo_list");
}

#[actix_web::test]
async fn open_topic_listing_needs_no_session() {
    let mut server = mockito::Server::new_async().await;
    let upstream = server
        .mock("GET", "/repos/alice/demo/topics")
        .with_status(200)
        .with_body(json!({"names": ["web", "infra"]}).to_string())
        .expect(1)
        .create_async()
        .await;

    let app = test_app!(empty_store(), config_for(&server));
    let request = test::TestRequest::post()
        .uri("/list_topic")
        .set_form([("username", "alice"), ("repo_name", "demo")])
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    upstream.assert_async().await;
}
