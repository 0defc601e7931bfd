//! Results screen handler.

use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use crop_common::CropError;
use recommender::{recommend, Evaluation, Selections};
use uuid::Uuid;

use super::{html_error, with_session};
use crate::assets::Backgrounds;
use crate::metrics;
use crate::render::{ResultsBody, ResultsView};
use crate::session::Screen;
use crate::state::AppState;

/// GET /results - evaluate the selections carried in the query string
pub async fn results_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Query(selections): Query<Selections>,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;
    let screen = state
        .sessions
        .get(id)
        .await
        .map(|s| s.screen)
        .unwrap_or_default();

    let response = match screen {
        Screen::Home => Redirect::to("/").into_response(),
        Screen::Results => render_results(&state, id, &selections).await,
    };
    with_session(response, id, created)
}

/// Run the pipeline for a session and draw the results screen.
pub(crate) async fn render_results(state: &AppState, id: Uuid, selections: &Selections) -> Response {
    let backgrounds = match Backgrounds::load(&state.config.assets, Screen::Results).await {
        Ok(b) => b,
        Err(e) => return html_error(&e),
    };
    let data = match state.session_data(id).await {
        Ok(data) => data,
        Err(e) => return html_error(&e),
    };

    // The upload notice is shown once.
    let (upload, upload_notice) = state
        .sessions
        .update(id, |s| (s.upload.clone(), s.upload_notice.take()))
        .await;

    let text = &state.config.text;
    let options = data.options.as_ref();
    metrics::record_page_view(Screen::Results);

    if let Some(column) = options.empty_columns().first() {
        let notice = CropError::NoOptions(column.header().to_string()).to_string();
        tracing::warn!(session = %id, "{}", notice);
        let view = ResultsView {
            text,
            backgrounds: &backgrounds,
            options,
            body: ResultsBody::NoOptions(notice),
            upload: upload.as_ref(),
            upload_notice: upload_notice.as_deref(),
        };
        return Html(view.render()).into_response();
    }

    let Evaluation {
        selections: resolved,
        recommendation,
    } = match recommend(&data.dataset, options, selections) {
        Ok(evaluation) => evaluation,
        Err(e) => return html_error(&e),
    };

    metrics::record_recommendation(recommendation.outcome());
    tracing::info!(
        session = %id,
        outcome = recommendation.outcome(),
        common = recommendation.common().map(|c| c.len()).unwrap_or(0),
        "Evaluated recommendation"
    );

    let view = ResultsView {
        text,
        backgrounds: &backgrounds,
        options,
        body: ResultsBody::Evaluated {
            selections: &resolved,
            recommendation: &recommendation,
        },
        upload: upload.as_ref(),
        upload_notice: upload_notice.as_deref(),
    };
    Html(view.render()).into_response()
}
