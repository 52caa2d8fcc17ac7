//! Category creation endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    AppState, Error,
    category::{Category, CategoryRequest, create_category, validate_category_request},
    user::{User, UserID, get_user_by_id},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle a request to create a category for the logged in user.
///
/// Responds with `201 Created` and the stored category, or a JSON error body
/// with the `TEA003` code if the request broke any of the category rules.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Extension(user_id): Extension<UserID>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Category>), Error> {
    let Json(request) = payload.map_err(Error::from)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    let category = validate_and_create_category(&request, user_id, &connection)?;
    tracing::debug!("user {user_id} created category {}", category.id);

    Ok((StatusCode::CREATED, Json(category)))
}

/// Validate `request` on behalf of `caller` and store the category.
///
/// The owner lookup and the insert run in one transaction, so a request that
/// fails validation never leaves anything behind.
///
/// # Errors
///
/// Returns an [Error::Validation] listing every broken rule, or an
/// [Error::SqlError] if the database could not be read or written.
pub fn validate_and_create_category(
    request: &CategoryRequest,
    caller: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    let owner = find_owner(request.user_id, &transaction)?;
    let new_category = validate_category_request(request, caller, owner.as_ref())?;
    let category = create_category(new_category, &transaction)?;

    transaction.commit()?;

    Ok(category)
}

/// Look up the user a category request names as its owner.
///
/// Returns `None` if the request has no owner or the owner is not a registered user.
pub(super) fn find_owner(
    user_id: Option<UserID>,
    connection: &Connection,
) -> Result<Option<User>, Error> {
    let Some(user_id) = user_id else {
        return Ok(None);
    };

    match get_user_by_id(user_id, connection) {
        Ok(user) => Ok(Some(user)),
        Err(Error::NotFound) => Ok(None),
        Err(error) => Err(error),
    }
}
