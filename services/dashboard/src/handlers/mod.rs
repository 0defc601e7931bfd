//! HTTP request handlers.

pub mod api;
pub mod health;
pub mod home;
pub mod results;
pub mod upload;

pub use api::{options_handler, recommendations_handler};
pub use health::{health_handler, metrics_handler, ready_handler};
pub use home::{go_handler, home_handler, index_handler};
pub use results::results_handler;
pub use upload::upload_handler;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use crop_common::CropError;
use serde_json::json;
use uuid::Uuid;

use crate::render;
use crate::session::session_cookie;

/// Attach the session cookie to responses for newly created sessions.
pub(crate) fn with_session(mut response: Response, id: Uuid, created: bool) -> Response {
    if created {
        response
            .headers_mut()
            .insert(header::SET_COOKIE, session_cookie(id));
    }
    response
}

/// Render an error as a visible HTML page.
pub(crate) fn html_error(err: &CropError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let title = match err {
        CropError::DatasetUnavailable { .. }
        | CropError::MissingColumn(_)
        | CropError::InvalidData { .. }
        | CropError::ParseError(_) => "Crop dataset could not be loaded",
        CropError::AssetUnavailable { .. } => "Page image could not be loaded",
        CropError::InvalidSelection { .. } | CropError::InvalidParameter { .. } => {
            "Invalid selection"
        }
        CropError::UploadTooLarge { .. } | CropError::UnsupportedImage(_) => {
            "Image upload rejected"
        }
        _ => "Something went wrong",
    };

    if err.is_configuration_error() {
        tracing::error!(error = %err, "Configuration problem");
    } else {
        tracing::warn!(error = %err, "Request rejected");
    }

    (status, Html(render::error_page(title, &err.to_string()))).into_response()
}

/// Render an error as a JSON body.
pub(crate) fn json_error(err: &CropError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(json!({ "error": err.to_string() }))).into_response()
}
