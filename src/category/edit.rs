//! Category update endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension, Json,
    extract::{
        FromRef, Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    AppState, Error,
    category::{
        Category, CategoryId, CategoryRequest,
        create::find_owner,
        read::{get_owned_category, parse_category_id},
        update_category, validate_category_request,
    },
    user::UserID,
};

/// The state needed for updating a category.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Replace one of the logged in user's categories.
///
/// The request body follows the same rules as creating a category. A missing
/// or foreign category is reported before the body is looked at, even if the
/// body is not valid JSON.
pub async fn update_category_endpoint(
    State(state): State<EditCategoryState>,
    Extension(user_id): Extension<UserID>,
    category_id: Result<Path<CategoryId>, PathRejection>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Json<Category>, Error> {
    let category_id = parse_category_id(category_id)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    get_owned_category(category_id, user_id, &connection)?;
    let Json(request) = payload.map_err(Error::from)?;

    validate_and_update_category(category_id, &request, user_id, &connection).map(Json)
}

/// Validate `request` on behalf of `caller` and overwrite the category with `category_id`.
///
/// A category that does not exist, or belongs to another user, is reported
/// before the request body is checked.
///
/// # Errors
///
/// Returns an [Error::CategoryNotFound] if the caller has no such category,
/// or an [Error::Validation] listing every broken rule.
pub fn validate_and_update_category(
    category_id: CategoryId,
    request: &CategoryRequest,
    caller: UserID,
    connection: &Connection,
) -> Result<Category, Error> {
    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    get_owned_category(category_id, caller, &transaction)?;

    let owner = find_owner(request.user_id, &transaction)?;
    let category = validate_category_request(request, caller, owner.as_ref())?;
    let category = update_category(category_id, category, &transaction)?;

    transaction.commit()?;

    Ok(category)
}
