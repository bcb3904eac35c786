//! Mapping of Lodge errors onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use lodge_error::{EditorErrorKind, FieldError, LodgeError, LodgeErrorKind, ServerErrorKind};
use serde::Serialize;

/// An error leaving an HTTP handler.
///
/// The body has the same shape as a failed query state, plus the failing
/// fields for validation errors:
///
/// ```json
/// {"data": null, "is_loading": false, "error": "...", "fields": [{"field": "description", "message": "is required"}]}
/// ```
#[derive(Debug)]
pub struct ApiError(pub LodgeError);

#[derive(Serialize)]
struct ErrorBody<'a> {
    data: Option<()>,
    is_loading: bool,
    error: String,
    #[serde(skip_serializing_if = "<[FieldError]>::is_empty")]
    fields: &'a [FieldError],
}

impl ApiError {
    /// HTTP status for the wrapped error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            LodgeErrorKind::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LodgeErrorKind::Editor(e) => match e.kind {
                EditorErrorKind::UnknownBlock(_) | EditorErrorKind::UnknownPage(_) => {
                    StatusCode::NOT_FOUND
                }
                EditorErrorKind::NothingToPublish(_) => StatusCode::UNPROCESSABLE_ENTITY,
                EditorErrorKind::IndexOutOfRange { .. }
                | EditorErrorKind::NotDragging
                | EditorErrorKind::AlreadyDragging => StatusCode::BAD_REQUEST,
            },
            LodgeErrorKind::Server(e) => match e.kind {
                ServerErrorKind::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ServerErrorKind::BadRequest(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            LodgeErrorKind::Http(e) => {
                StatusCode::from_u16(e.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<LodgeError> for ApiError {
    fn from(err: LodgeError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self.0, "Request rejected");
        }

        let fields = self
            .0
            .as_validation()
            .map(|v| v.fields.as_slice())
            .unwrap_or_default();
        let body = ErrorBody {
            data: None,
            is_loading: false,
            error: self.0.to_string(),
            fields,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_error::{EditorError, HttpError, ServerError, StoreError, ValidationError};

    #[test]
    fn statuses_follow_error_kind() {
        let cases: Vec<(LodgeError, StatusCode)> = vec![
            (
                ValidationError::new("rich-text", vec![FieldError::new("body", "is required")]).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                EditorError::new(EditorErrorKind::UnknownBlock("x".into())).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                ServerError::new(ServerErrorKind::Unauthorized("no key".into())).into(),
                StatusCode::UNAUTHORIZED,
            ),
            (HttpError::new(404, "gone").into(), StatusCode::NOT_FOUND),
            (StoreError::new("timeout").into(), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let err = ApiError::from(err);
            assert_eq!(err.status(), status, "{}", err.0);
        }
    }
}
