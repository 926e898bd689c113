pub mod quotes;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(quotes::home))
        .route("/create", post(quotes::create))
        .route("/view/{id}", get(quotes::view))
        .route("/delete/{id}", get(quotes::delete))
        .route("/view-person/{person}", get(quotes::view_person))
        .route("/quotes", get(quotes::list_sorted))
        .route("/like/{id}", get(quotes::like))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
