//! Application router configuration with protected route definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::get,
};

use crate::{
    AppState,
    auth::auth_guard,
    category::{
        create_category_endpoint, delete_category_endpoint, get_category_endpoint,
        list_categories_endpoint, update_category_endpoint,
    },
    endpoints,
    error_code::ErrorCode,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint).post(create_category_endpoint),
        )
        .route(
            endpoints::CATEGORY,
            get(get_category_endpoint)
                .put(update_category_endpoint)
                .delete(delete_category_endpoint),
        )
        .method_not_allowed_fallback(get_405_method_not_allowed)
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    protected_routes.fallback(get_404_not_found).with_state(state)
}

/// Respond to requests for unknown routes with the `TEA004` error code.
async fn get_404_not_found() -> Response {
    ErrorCode::TEA004.into_response()
}

/// Respond to known routes called with an unsupported method with the `TEA005` error code.
async fn get_405_method_not_allowed() -> Response {
    ErrorCode::TEA005.into_response()
}
