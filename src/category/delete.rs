//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Extension,
    extract::{FromRef, Path, State, rejection::PathRejection},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{
        CategoryId, delete_category,
        read::{get_owned_category, parse_category_id},
    },
    user::UserID,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Delete one of the logged in user's categories.
///
/// Responds with `204 No Content` on success.
pub async fn delete_category_endpoint(
    State(state): State<DeleteCategoryState>,
    Extension(user_id): Extension<UserID>,
    category_id: Result<Path<CategoryId>, PathRejection>,
) -> Result<StatusCode, Error> {
    let category_id = parse_category_id(category_id)?;

    let connection = state.db_connection.lock().map_err(|error| {
        tracing::error!("could not acquire database lock: {error}");
        Error::DatabaseLockError
    })?;

    get_owned_category(category_id, user_id, &connection)?;
    delete_category(category_id, &connection)?;
    tracing::debug!("user {user_id} deleted category {category_id}");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod delete_category_tests {
    use axum::http::StatusCode;

    use crate::{
        Error,
        category::{
            Category, CategoryName, CategoryType, NewCategory, create_category, get_category,
        },
        endpoints::{self, format_endpoint},
        error_code::ErrorCode,
        test_utils::{
            assert_error_code, get_test_app_state, get_test_server, insert_test_user, log_in,
        },
        user::{User, UserStatus},
    };

    fn insert_category(state: &crate::AppState, user: &User) -> Category {
        create_category(
            NewCategory {
                name: CategoryName::new_unchecked("Food"),
                category_type: CategoryType::Expense,
                user_id: user.id,
            },
            &state.db_connection.lock().unwrap(),
        )
        .expect("Could not create test category")
    }

    #[tokio::test]
    async fn deletes_category() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "userone", UserStatus::Verified);
        let category = insert_category(&state, &user);
        let server = get_test_server(&state);
        let cookie = log_in(&server, user.id).await;

        let response = server
            .delete(&format_endpoint(endpoints::CATEGORY, category.id))
            .add_cookie(cookie)
            .await;

        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        );
    }

    #[tokio::test]
    async fn delete_missing_category_returns_not_found() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "userone", UserStatus::Verified);
        let server = get_test_server(&state);
        let cookie = log_in(&server, user.id).await;

        let response = server
            .delete(&format_endpoint(endpoints::CATEGORY, 42))
            .add_cookie(cookie)
            .await;

        assert_error_code(&response, ErrorCode::FTC001);
    }

    #[tokio::test]
    async fn delete_other_users_category_returns_not_found() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "userone", UserStatus::Verified);
        let other_user = insert_test_user(&state, "usertwo", UserStatus::Verified);
        let category = insert_category(&state, &other_user);
        let server = get_test_server(&state);
        let cookie = log_in(&server, user.id).await;

        let response = server
            .delete(&format_endpoint(endpoints::CATEGORY, category.id))
            .add_cookie(cookie)
            .await;

        assert_error_code(&response, ErrorCode::FTC001);
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()),
            Ok(category)
        );
    }

    #[tokio::test]
    async fn delete_category_with_non_numeric_id_returns_not_found() {
        let state = get_test_app_state();
        let user = insert_test_user(&state, "userone", UserStatus::Verified);
        let category = insert_category(&state, &user);
        let server = get_test_server(&state);
        let cookie = log_in(&server, user.id).await;

        let response = server
            .delete("/api/categories/abc")
            .add_cookie(cookie)
            .await;

        assert_error_code(&response, ErrorCode::FTC001);
        assert_eq!(
            get_category(category.id, &state.db_connection.lock().unwrap()),
            Ok(category)
        );
    }
}
