//! Application router configuration.

use std::path::Path;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category::{create_category_endpoint, get_category_options, validate_category_form},
    dashboard::get_dashboard_page,
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, get_new_transaction_page, validate_transaction_form,
    },
};

/// Return a router with all the app's routes.
///
/// Static files such as the htmx script are served from `static_dir`.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    let pages = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_new_transaction_page),
        )
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let form_routes = Router::new()
        .route(endpoints::CATEGORIES_API, post(create_category_endpoint))
        .route(
            endpoints::VALIDATE_CATEGORY_FORM,
            post(validate_category_form),
        )
        .route(endpoints::CATEGORY_OPTIONS, get(get_category_options))
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::VALIDATE_TRANSACTION_FORM,
            post(validate_transaction_form),
        );

    pages
        .merge(form_routes)
        .nest_service(endpoints::STATIC, ServeDir::new(static_dir))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}
