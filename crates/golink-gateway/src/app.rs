use axum::routing::get;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_link_handler, delete_link_handler, edit_link_handler, health_handler, index_handler,
    links_root_handler, opensearch_handler, resolve_handler, resolve_with_path_handler,
    search_handler, suggest_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    /// Routes of the service. `/links/...` paths are reserved for management
    /// pages, every other path is a link name.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/", get(index_handler))
            .route("/links", get(links_root_handler).post(create_link_handler))
            .route("/links/health", get(health_handler))
            .route("/links/suggest", get(suggest_handler))
            .route("/links/search", get(search_handler))
            .route("/links/opensearch.xml", get(opensearch_handler))
            .route("/links/{id}/delete", get(delete_link_handler))
            .route("/links/{id}/edit", get(edit_link_handler))
            .route("/{name}", get(resolve_handler))
            .route("/{name}/{*rest}", get(resolve_with_path_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// The router behind trailing-slash trimming, so `go/docs/` resolves
    /// like `go/docs`. Trimming has to run before routing, hence the wrap.
    pub fn service(state: AppState) -> NormalizePath<Router> {
        NormalizePathLayer::trim_trailing_slash().layer(Self::router(state))
    }
}
