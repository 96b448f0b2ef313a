use crate::error::Result;
use crate::handlers::redirect::found;
use crate::model::MissingLinkResponse;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use golink_core::split_segments;

pub async fn resolve_handler(
    Path(name): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    resolve(&state, name, Vec::new()).await
}

/// `go/<name>/<a>/<b>` fills the link's `%s` placeholders with `a` and `b`.
pub async fn resolve_with_path_handler(
    Path((name, rest)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Response> {
    resolve(&state, name, split_segments(&rest)).await
}

async fn resolve(state: &AppState, name: String, segments: Vec<String>) -> Result<Response> {
    match state.redirector.resolve(&name, &segments).await? {
        Some(target) => found(target.as_str()),
        None => Ok((StatusCode::NOT_FOUND, Json(MissingLinkResponse::new(name))).into_response()),
    }
}
