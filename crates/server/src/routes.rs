use axum::{
    extract::{DefaultBodyLimit, State},
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::AppState;

pub mod admin;
pub mod children;
pub mod parents;

pub async fn health(State(state): State<AppState>) -> Json<Health> {
    let counts = state.store.counts().await;
    Json(Health {
        status: "ok",
        parents: counts.parents,
        children: counts.children,
        admins: counts.admins,
    })
}

/// Build the full application router: the three record collections plus health.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let parent_routes = Router::new()
        .route("/parents", get(parents::list_parents).post(parents::create_parent))
        .route(
            "/parents/:parentkey",
            get(parents::get_parent)
                .put(parents::update_parent)
                .delete(parents::delete_parent),
        );

    let child_routes = Router::new()
        .route("/children", get(children::list_children).post(children::create_child))
        .route(
            "/children/:id",
            get(children::get_child)
                .put(children::update_child)
                .delete(children::delete_child),
        );

    // Admins are seeded through the data file; no create or delete.
    let admin_routes = Router::new()
        .route("/admin", get(admin::list_admins))
        .route("/admin/:empid", get(admin::get_admin).put(admin::update_admin));

    Router::new()
        .route("/health", get(health))
        .merge(parent_routes)
        .merge(child_routes)
        .merge(admin_routes)
        .with_state(state)
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                ),
        )
}
