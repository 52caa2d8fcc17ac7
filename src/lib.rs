//! Expense tracker is a JSON REST service for managing the categories a
//! user sorts their income and expenses into.
//!
//! Every category endpoint requires a valid auth cookie. Failures are
//! reported with a business error code, see [ErrorCode].

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod auth;
mod category;
mod db;
mod endpoints;
mod error_code;
mod logging;
mod password;
mod routing;
mod user;
mod validation_rules;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use auth::{COOKIE_TOKEN, DEFAULT_COOKIE_DURATION, set_auth_cookie};
pub use category::{
    Category, CategoryId, CategoryName, CategoryRequest, CategoryType, RuleViolation,
    ValidationFailure,
};
pub use db::initialize as initialize_db;
pub use error_code::{ErrorCode, ErrorResponse};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use password::{PasswordHash, ValidatedPassword};
pub use routing::build_router;
pub use user::{
    Email, NewUser, User, UserID, UserStatus, count_users, create_user, get_user_by_id,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install terminate signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The auth token cookie is missing from the cookie jar in the request.
    #[error("no cookies in the cookie jar :(")]
    CookieMissing,

    /// The auth token cookie could not be read.
    #[error("the auth token is invalid: {0}")]
    InvalidToken(String),

    /// The auth token cookie has passed its expiry date.
    #[error("the auth token has expired")]
    TokenExpired,

    /// A value could not be converted to JSON.
    #[error("could not serialize to JSON: {0}")]
    JSONSerializationError(String),

    /// The user provided a password that is too easy to guess.
    #[error("password is too weak: {0}")]
    TooWeak(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    #[error("an error occurred while hashing the password: {0}")]
    HashingError(String),

    /// The string is not a correctly formatted email address.
    #[error("{0} is not a valid email address")]
    InvalidEmail(String),

    /// The database holds a user status that the application does not know.
    #[error("{0} is not a valid user status")]
    InvalidUserStatus(String),

    /// The database holds a category type that the application does not know.
    #[error("{0} is not a valid category type")]
    InvalidCategoryType(String),

    /// The username or email address is already taken.
    #[error("the username or email address is already in use")]
    DuplicateUser,

    /// A user ID did not match a registered user when inserting a row.
    #[error("the user ID does not refer to a valid user")]
    InvalidUser,

    /// A category request broke one or more of the category rules.
    #[error("invalid category: {0}")]
    Validation(ValidationFailure),

    /// The requested resource was not found.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The category does not exist or belongs to another user.
    #[error("the category could not be found")]
    CategoryNotFound,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// An unhandled/unexpected SQL error.
    #[error("an error occurred while accessing the database: {0}")]
    SqlError(rusqlite::Error),

    /// The mutex guarding the database connection was poisoned.
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<ValidationFailure> for Error {
    fn from(value: ValidationFailure) -> Self {
        Error::Validation(value)
    }
}

impl From<JsonRejection> for Error {
    fn from(value: JsonRejection) -> Self {
        Error::Validation(ValidationFailure(vec![RuleViolation::MalformedBody(
            value.body_text(),
        )]))
    }
}

impl Error {
    /// The business error code reported to the client for this error.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Error::Validation(failure) => failure.error_code(),
            // The owner was removed between validation and the insert.
            Error::InvalidUser => ErrorCode::TEA003,
            Error::CookieMissing | Error::InvalidToken(_) | Error::TokenExpired => {
                ErrorCode::TEA002
            }
            Error::CategoryNotFound
            | Error::UpdateMissingCategory
            | Error::DeleteMissingCategory => ErrorCode::FTC001,
            Error::NotFound => ErrorCode::TEA004,
            _ => ErrorCode::TEA001,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let error_code = self.error_code();

        match error_code {
            ErrorCode::TEA001 => tracing::error!("An unexpected error occurred: {}", self),
            _ => tracing::debug!("Rejected request with {error_code:?}: {}", self),
        }

        error_code.into_response()
    }
}
