use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use golink_core::LinkError;
use tracing::error;

pub type Result<T> = std::result::Result<T, AppError>;

/// Request failures, rendered as plain-text `Error: ...` bodies.
#[derive(Debug)]
pub enum AppError {
    Link(LinkError),
    BadRequest(String),
}

impl From<LinkError> for AppError {
    fn from(value: LinkError) -> Self {
        AppError::Link(value)
    }
}

impl AppError {
    fn status_and_message(self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Link(err) => match err {
                LinkError::Validation(_) | LinkError::Template(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                LinkError::Conflict(_) => (StatusCode::CONFLICT, err.to_string()),
                LinkError::NotFound(_) => (StatusCode::BAD_REQUEST, "link not found".to_string()),
                LinkError::Storage(source) => {
                    error!(error = %source, "storage failure");
                    if source.is_unavailable() {
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "storage unavailable".to_string(),
                        )
                    } else {
                        (
                            StatusCode::INTERNAL_SERVER_ERROR,
                            "internal storage error".to_string(),
                        )
                    }
                }
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        (status, format!("Error: {message}")).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use golink_core::{LinkId, LinkRef, StorageError};

    fn status_of(err: LinkError) -> StatusCode {
        AppError::from(err).into_response().status()
    }

    #[test]
    fn validation_is_a_client_error() {
        let status = status_of(LinkError::Validation("name cannot be empty".to_string()));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn conflict_is_reported_as_conflict() {
        assert_eq!(status_of(LinkError::Conflict("docs".to_string())), StatusCode::CONFLICT);
    }

    #[test]
    fn missing_edit_target_is_a_client_error() {
        let status = status_of(LinkError::NotFound(LinkRef::Id(LinkId::new(3))));
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unreachable_store_is_unavailable() {
        let status = status_of(LinkError::Storage(StorageError::Unavailable(
            "connection refused".to_string(),
        )));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn failed_query_is_a_server_error() {
        let status = status_of(LinkError::Storage(StorageError::Query("syntax".to_string())));
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
