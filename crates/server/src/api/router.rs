use axum::Router;

use crate::state::AppState;

use super::handlers;

// OpenAPI mode: use OpenApiRouter with utoipa macros
#[cfg(feature = "openapi")]
pub fn create_router(state: AppState) -> (Router, utoipa::openapi::OpenApi) {
    use axum::{routing::get, Json};
    use utoipa::OpenApi;
    use utoipa_axum::{router::OpenApiRouter, routes};

    use crate::openapi::ApiDoc;

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(handlers::index))
        .routes(routes!(handlers::health))
        .routes(routes!(handlers::list_banks))
        .routes(routes!(handlers::list_bank_branches))
        .routes(routes!(handlers::search_branches))
        .routes(routes!(handlers::get_branch))
        .with_state(state)
        .split_for_parts();

    // Clone the OpenAPI document for the JSON endpoint
    let api_json = api.clone();

    let router = router.route(
        "/api/openapi.json",
        get(move || async move { Json(api_json) }),
    );

    (router, api)
}

// Non-OpenAPI mode: use standard axum Router
#[cfg(not(feature = "openapi"))]
pub fn create_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        // Bank endpoints
        .route("/banks", get(handlers::list_banks))
        .route("/banks/{bank_id}/branches", get(handlers::list_bank_branches))
        // Branch endpoints
        .route("/branches", get(handlers::search_branches))
        .route("/branches/{ifsc}", get(handlers::get_branch))
        .with_state(state)
}
