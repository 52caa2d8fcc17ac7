//! Helpers shared by the endpoint tests.

#![allow(missing_docs)]

use axum::{
    Router,
    extract::Path,
    http::StatusCode,
    routing::post,
};
use axum_extra::extract::{PrivateCookieJar, cookie::Cookie};
use axum_test::{TestResponse, TestServer};
use rusqlite::Connection;

use crate::{
    AppState, Error, PasswordHash, build_router,
    auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, set_auth_cookie},
    endpoints::format_endpoint,
    error_code::{ErrorCode, ErrorResponse},
    user::{Email, NewUser, User, UserID, UserStatus, create_user},
};

const TEST_LOG_IN_ROUTE_PATH: &str = "/log_in/{user_id}";

pub(crate) fn get_test_app_state() -> AppState {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");

    AppState::new(connection, "42").expect("Could not create app state")
}

pub(crate) fn insert_test_user(state: &AppState, username: &str, status: UserStatus) -> User {
    create_user(
        NewUser {
            username: username.to_owned(),
            email: Email::new_unchecked(&format!("{username}@wp.pl")),
            password_hash: PasswordHash::new_unchecked("hunter2"),
            status,
        },
        &state.db_connection.lock().unwrap(),
    )
    .expect("Could not create test user")
}

async fn stub_log_in_route(
    jar: PrivateCookieJar,
    Path(user_id): Path<i64>,
) -> Result<PrivateCookieJar, Error> {
    set_auth_cookie(jar, UserID::new(user_id), DEFAULT_COOKIE_DURATION)
}

/// A server for the full app plus a route that hands out auth cookies.
pub(crate) fn get_test_server(state: &AppState) -> TestServer {
    let app = build_router(state.clone()).merge(
        Router::new()
            .route(TEST_LOG_IN_ROUTE_PATH, post(stub_log_in_route))
            .with_state(state.clone()),
    );

    TestServer::try_new(app).expect("Could not create test server.")
}

pub(crate) async fn log_in(server: &TestServer, user_id: UserID) -> Cookie<'static> {
    let response = server
        .post(&format_endpoint(TEST_LOG_IN_ROUTE_PATH, user_id.as_i64()))
        .await;
    response.assert_status_ok();

    response.cookie(COOKIE_TOKEN)
}

#[track_caller]
pub(crate) fn assert_error_code(response: &TestResponse, error_code: ErrorCode) {
    response.assert_status(StatusCode::from_u16(error_code.business_status_code()).unwrap());

    let body: ErrorResponse = response.json();
    assert_eq!(body, error_code.to_response_body());
}
