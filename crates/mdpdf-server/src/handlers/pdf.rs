//! PDF generation endpoints.
//!
//! Both endpoints share one render path and differ only in how the PDF
//! bytes are returned: as an attachment, or base64-encoded inside JSON.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header;
use axum::response::IntoResponse;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::state::AppState;

/// Request body for both PDF endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RenderRequest {
    /// Markdown source (required, non-empty).
    #[serde(default)]
    markdown: Option<String>,
    /// Document title, also used as the download file name.
    #[serde(default)]
    titulo: Option<String>,
}

/// Accept the JSON body, reading a body without a JSON content type as `{}`.
///
/// Malformed JSON and oversized bodies keep axum's own rejection.
fn request_body(
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<RenderRequest, ServerError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(RenderRequest::default()),
        Err(rejection) => Err(ServerError::InvalidBody(rejection)),
    }
}

/// Response for POST /gerar-pdf-base64.
#[derive(Serialize)]
pub(crate) struct PdfBase64Response {
    sucesso: bool,
    titulo: String,
    pdf_base64: String,
}

/// A rendered PDF and the title it was rendered with.
struct RenderedPdf {
    title: String,
    bytes: Vec<u8>,
}

/// Handle POST /gerar-pdf.
pub(crate) async fn post_pdf(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ServerError> {
    let pdf = render(&state, request_body(payload)?).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_owned()),
            (header::CONTENT_DISPOSITION, content_disposition(&pdf.title)),
        ],
        pdf.bytes,
    ))
}

/// Handle POST /gerar-pdf-base64.
pub(crate) async fn post_pdf_base64(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<PdfBase64Response>, ServerError> {
    let pdf = render(&state, request_body(payload)?).await?;

    Ok(Json(PdfBase64Response {
        sucesso: true,
        titulo: pdf.title,
        pdf_base64: STANDARD.encode(&pdf.bytes),
    }))
}

/// Validate the request and render it on the blocking thread pool.
async fn render(state: &Arc<AppState>, request: RenderRequest) -> Result<RenderedPdf, ServerError> {
    let markdown = request
        .markdown
        .filter(|m| !m.is_empty())
        .ok_or(ServerError::MissingMarkdown)?;
    let title = request
        .titulo
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| state.default_title.clone());

    let renderer = state.renderer;
    let job_title = title.clone();
    let bytes = tokio::task::spawn_blocking(move || renderer.render_pdf(&markdown, &job_title))
        .await??;

    tracing::info!(title = %title, bytes = bytes.len(), "Generated PDF");
    Ok(RenderedPdf { title, bytes })
}

/// Build the `Content-Disposition` value for a download named after `title`.
///
/// Quotes, backslashes and control characters cannot appear inside the
/// quoted file name and are replaced with `_`.
fn content_disposition(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| {
            if c == '"' || c == '\\' || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("attachment; filename=\"{name}.pdf\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_disposition_uses_title() {
        assert_eq!(
            content_disposition("Report"),
            r#"attachment; filename="Report.pdf""#
        );
    }

    #[test]
    fn test_content_disposition_sanitizes_title() {
        assert_eq!(
            content_disposition("a\"b\r\nc"),
            r#"attachment; filename="a_b__c.pdf""#
        );
    }

    #[test]
    fn test_request_fields_are_optional() {
        let request: RenderRequest = serde_json::from_str("{}").unwrap();
        assert!(request.markdown.is_none());
        assert!(request.titulo.is_none());
    }

    #[test]
    fn test_base64_response_serialization() {
        let response = PdfBase64Response {
            sucesso: true,
            titulo: "documento".to_owned(),
            pdf_base64: "JVBERi0=".to_owned(),
        };

        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["sucesso"], true);
        assert_eq!(json["titulo"], "documento");
        assert_eq!(json["pdf_base64"], "JVBERi0=");
    }
}
