//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Request body has no usable `markdown` field.
    #[error("Campo \"markdown\" é obrigatório")]
    MissingMarkdown,

    /// Request body is not valid JSON or exceeds the size limit.
    #[error("Invalid request body: {0}")]
    InvalidBody(axum::extract::rejection::JsonRejection),

    /// Layout or PDF encoding failed.
    #[error("Render error: {0}")]
    Render(#[from] mdpdf_renderer::RenderError),

    /// The blocking render task panicked or was cancelled.
    #[error("Render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidBody(rejection) => rejection.into_response(),
            Self::MissingMarkdown => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({"erro": self.to_string()})),
            )
                .into_response(),
            Self::Render(_) | Self::Task(_) => {
                tracing::error!(error = %self, "Failed to generate PDF");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    axum::Json(json!({"erro": "Erro ao gerar PDF", "detalhes": self.to_string()})),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use mdpdf_renderer::RenderError;

    async fn body_json(error: ServerError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_missing_markdown_is_bad_request() {
        let (status, json) = body_json(ServerError::MissingMarkdown).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["erro"], "Campo \"markdown\" é obrigatório");
        assert!(json.get("detalhes").is_none());
    }

    #[tokio::test]
    async fn test_render_error_is_internal_with_details() {
        let error = ServerError::Render(RenderError::Layout("margin too large".to_owned()));

        let (status, json) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["erro"], "Erro ao gerar PDF");
        assert!(
            json["detalhes"]
                .as_str()
                .unwrap()
                .contains("margin too large")
        );
    }
}
