use crate::error::Result;
use crate::handlers::redirect::to_index;
use crate::model::{CreateLinkForm, EditLinkParams, IndexParams, IndexResponse, LinkResponse};
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::{Form, Json};
use golink_core::{LinkId, LinkPatch, NewLink};

pub async fn index_handler(
    Query(params): Query<IndexParams>,
    State(state): State<AppState>,
) -> Result<Json<IndexResponse>> {
    let links = state.directory.list().await?;
    Ok(Json(IndexResponse::new(params.name, links)))
}

pub async fn links_root_handler() -> Redirect {
    to_index()
}

pub async fn create_link_handler(
    State(state): State<AppState>,
    Form(form): Form<CreateLinkForm>,
) -> Result<Redirect> {
    let link = NewLink::new(form.name.unwrap_or_default(), form.url.unwrap_or_default())?;
    state.directory.create(link).await?;
    Ok(to_index())
}

pub async fn delete_link_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    state.directory.delete(LinkId::new(id)).await?;
    Ok(to_index())
}

/// Shows a link for editing, or applies the edit when `action=do_edit`.
pub async fn edit_link_handler(
    Path(id): Path<i64>,
    Query(params): Query<EditLinkParams>,
    State(state): State<AppState>,
) -> Result<Response> {
    let id = LinkId::new(id);
    let link = state.directory.get(id).await?;

    if !params.is_submit() {
        return Ok(Json(LinkResponse::from(link)).into_response());
    }

    let patch = LinkPatch::new(params.name, params.url)?;
    state.directory.edit(link.id, patch).await?;
    Ok(to_index().into_response())
}
