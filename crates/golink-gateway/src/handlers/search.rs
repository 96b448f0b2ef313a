use crate::error::Result;
use crate::handlers::redirect::found;
use crate::model::{ListingResponse, SearchParams};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use golink_directory::{SearchOutcome, Suggestions};

pub async fn suggest_handler(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Json<Suggestions>> {
    let query = params.q.unwrap_or_default();
    Ok(Json(state.directory.suggest(&query).await?))
}

pub async fn search_handler(
    Query(params): Query<SearchParams>,
    State(state): State<AppState>,
) -> Result<Response> {
    let query = params.q.unwrap_or_default();

    match state.directory.search_or_list(&query).await? {
        SearchOutcome::Redirect { path } => found(&path),
        SearchOutcome::Listing(links) => Ok(Json(ListingResponse::new(query, links)).into_response()),
    }
}
