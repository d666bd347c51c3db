//! Application router configuration.

use axum::{
    Router,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    assistant::ask_assistant,
    dashboard::{
        get_dashboard_page, get_monthly_rewards_partial, get_total_rewards_partial,
        get_transactions_partial,
    },
    endpoints,
    import::{get_import_page, upload_datasets},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::TRANSACTIONS_PARTIAL,
            get(get_transactions_partial),
        )
        .route(
            endpoints::MONTHLY_REWARDS_PARTIAL,
            get(get_monthly_rewards_partial),
        )
        .route(
            endpoints::TOTAL_REWARDS_PARTIAL,
            get(get_total_rewards_partial),
        )
        .route(endpoints::IMPORT_VIEW, get(get_import_page))
        .route(endpoints::DATASETS_API, post(upload_datasets))
        .route(endpoints::ASSISTANT_API, post(ask_assistant))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::COFFEE, get(get_coffee))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Html("I'm a teapot")).into_response()
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
