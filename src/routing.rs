//! Application router configuration.

use axum::{
    Router,
    handler::HandlerWithoutStateExt,
    routing::{get, get_service},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState, endpoints,
    expense::{
        create_expense_endpoint, delete_expense_endpoint, get_expense_endpoint,
        get_grouped_expenses_endpoint, list_expenses_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
///
/// The root path serves `index.html` from the state's static directory, and
/// any other path that is not an API route is looked up as a static file.
pub fn build_router(state: AppState) -> Router {
    let index_page = ServeFile::new(state.static_dir.join("index.html"));
    let static_files =
        ServeDir::new(&state.static_dir).not_found_service(get_404_not_found.into_service());

    Router::new()
        .route(endpoints::ROOT, get_service(index_page))
        .route(
            endpoints::EXPENSES,
            get(list_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(
            endpoints::GROUPED_EXPENSES,
            get(get_grouped_expenses_endpoint),
        )
        .route(
            endpoints::EXPENSE,
            get(get_expense_endpoint).delete(delete_expense_endpoint),
        )
        .fallback_service(static_files)
        .with_state(state)
}
