use crate::error::{AppError, Result};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};

/// `302 Found` to a location that may come from stored data.
///
/// Locations that cannot be sent as a header are a client error rather than
/// a panic.
pub(crate) fn found(location: &str) -> Result<Response> {
    let value = HeaderValue::try_from(location)
        .map_err(|_| AppError::BadRequest(format!("cannot redirect to '{location}'")))?;
    Ok((StatusCode::FOUND, [(LOCATION, value)]).into_response())
}

/// `303 See Other` back to the index after a form action.
pub(crate) fn to_index() -> Redirect {
    Redirect::to("/")
}
