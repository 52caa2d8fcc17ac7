//! Endpoints for fetching a user's categories.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, Path, State, rejection::PathRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, CategoryId, get_categories_for_user, get_category},
    user::UserID,
};

/// The state needed for reading categories.
#[derive(Debug, Clone)]
pub struct ReadCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReadCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// List the logged in user's categories ordered by name.
pub async fn list_categories_endpoint(
    State(state): State<ReadCategoryState>,
    Extension(user_id): Extension<UserID>,
) -> Result<Json<Vec<Category>>, Error> {
    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    get_categories_for_user(user_id, &connection).map(Json)
}

/// Get one of the logged in user's categories.
///
/// Categories owned by other users are reported as missing.
pub async fn get_category_endpoint(
    State(state): State<ReadCategoryState>,
    Extension(user_id): Extension<UserID>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<Json<Category>, Error> {
    let category_id = parse_category_id(category_id)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    get_owned_category(category_id, user_id, &connection).map(Json)
}

/// Read the category ID from the request path.
///
/// An ID that is not an integer cannot refer to a category, so it is reported
/// as a missing category.
pub(super) fn parse_category_id(
    path: Result<Path<CategoryId>, PathRejection>,
) -> Result<CategoryId, Error> {
    match path {
        Ok(Path(category_id)) => Ok(category_id),
        Err(rejection) => {
            tracing::debug!("Invalid category ID in path: {}", rejection.body_text());
            Err(Error::CategoryNotFound)
        }
    }
}

/// Get the category with `category_id` if it belongs to `user_id`.
///
/// # Errors
///
/// Returns an [Error::CategoryNotFound] if the category does not exist or
/// belongs to someone else.
pub(super) fn get_owned_category(
    category_id: CategoryId,
    user_id: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    match get_category(category_id, connection) {
        Ok(category) if category.user_id == user_id => Ok(category),
        Ok(_) | Err(Error::NotFound) => Err(Error::CategoryNotFound),
        Err(error) => Err(error),
    }
}
