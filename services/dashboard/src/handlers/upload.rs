//! Sidebar image upload handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use crop_common::{CropError, CropResult};

use super::{html_error, with_session};
use crate::metrics;
use crate::state::AppState;
use crate::upload::{inspect, UploadedImage};

/// POST /results/upload - inspect an uploaded image and return to the results
///
/// Accepted and rejected uploads both redirect back to the results screen
/// with the submitted selections; a rejection leaves a notice in the session.
/// Oversized uploads are answered with 413 directly.
pub async fn upload_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;

    let (result, query) = read_form(multipart, state.config.limits.max_upload_bytes).await;

    match result {
        Ok(image) => {
            metrics::record_upload("accepted");
            state
                .sessions
                .update(id, |s| {
                    s.upload = Some(image);
                    s.upload_notice = None;
                })
                .await;
        }
        Err(e @ CropError::UploadTooLarge { .. }) => {
            metrics::record_upload("rejected");
            return with_session(html_error(&e), id, created);
        }
        Err(e) => {
            metrics::record_upload("rejected");
            tracing::warn!(session = %id, error = %e, "Rejected upload");
            state
                .sessions
                .update(id, |s| s.upload_notice = Some(e.to_string()))
                .await;
        }
    }

    let target = results_location(query.as_deref().unwrap_or(""));
    with_session(Redirect::to(&target).into_response(), id, created)
}

/// Read the `image` and `query` fields. The query is returned even when the
/// image is rejected, as long as it was read before the failure.
async fn read_form(
    mut multipart: Multipart,
    limit: usize,
) -> (CropResult<UploadedImage>, Option<String>) {
    let mut query = None;
    let mut image = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return (Err(multipart_error(e, limit)), query),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "query" => match field.text().await {
                Ok(text) => query = Some(text),
                Err(e) => return (Err(multipart_error(e, limit)), query),
            },
            "image" => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                match field.bytes().await {
                    Ok(bytes) => image = Some((file_name, bytes)),
                    Err(e) => return (Err(multipart_error(e, limit)), query),
                }
            }
            _ => {}
        }
    }

    let result = match image {
        Some((name, bytes)) if !name.is_empty() => inspect(&name, bytes, limit),
        _ => Err(CropError::UnsupportedImage("no file was selected".to_string())),
    };
    (result, query)
}

fn multipart_error(err: axum::extract::multipart::MultipartError, limit: usize) -> CropError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        CropError::UploadTooLarge { size: limit + 1, limit }
    } else {
        CropError::UnsupportedImage(err.body_text())
    }
}

/// Redirect target for a submitted query string. Anything that is not
/// printable ASCII is dropped so the value is safe in a `Location` header.
pub fn results_location(query: &str) -> String {
    let query: String = query.chars().filter(|c| c.is_ascii_graphic()).collect();
    if query.is_empty() {
        "/results".to_string()
    } else {
        format!("/results?{}", query)
    }
}
