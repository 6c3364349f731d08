use std::{borrow::Cow, error::Error as StdError, fmt};

use axum::{
    Json,
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::generation::GenerationError;

/// Failure of a blog generation request.
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Topic is required")]
    MissingTopic,
    #[error("{0}")]
    UnreadableBody(#[from] BytesRejection),
    #[error("{0}")]
    MalformedBody(#[from] serde_json::Error),
    #[error(transparent)]
    Generation(#[from] GenerationError),
}

#[derive(Debug)]
pub struct APIError {
    pub code: StatusCode,
    pub body: Cow<'static, str>,
}

impl APIError {
    pub fn new(code: StatusCode, body: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            body: body.into(),
        }
    }
}

impl IntoResponse for APIError {
    fn into_response(self) -> Response {
        error!("Status code based error ({}): {}", self.code, self.body);

        (self.code, Json(json!({ "error": self.body }))).into_response()
    }
}

impl From<BlogError> for APIError {
    fn from(err: BlogError) -> Self {
        let code = match err {
            BlogError::MissingTopic => StatusCode::BAD_REQUEST,
            BlogError::UnreadableBody(_)
            | BlogError::MalformedBody(_)
            | BlogError::Generation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        APIError::new(code, err.to_string())
    }
}

impl fmt::Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.body)
    }
}

impl StdError for APIError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_topic_is_a_client_error() {
        let api: APIError = BlogError::MissingTopic.into();
        assert_eq!(api.code, StatusCode::BAD_REQUEST);
        assert_eq!(api.body, "Topic is required");
    }

    #[test]
    fn generation_failure_keeps_raw_message() {
        let api: APIError =
            BlogError::from(GenerationError::Model("model unavailable".into())).into();
        assert_eq!(api.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api.to_string(), "model unavailable");
    }

    #[test]
    fn malformed_body_is_a_server_error() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let api: APIError = BlogError::from(parse).into();
        assert_eq!(api.code, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(api.body.starts_with("EOF while parsing"));
    }
}
