//! Home screen and navigation handlers.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};
use recommender::Selections;

use super::{html_error, results::render_results, with_session};
use crate::assets::Backgrounds;
use crate::metrics;
use crate::render;
use crate::session::{Action, Screen};
use crate::state::AppState;

/// GET / - the session's current screen
pub async fn index_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;
    let screen = state
        .sessions
        .get(id)
        .await
        .map(|s| s.screen)
        .unwrap_or_default();

    let response = match screen {
        Screen::Home => render_home(&state).await,
        Screen::Results => render_results(&state, id, &Selections::default()).await,
    };
    with_session(response, id, created)
}

async fn render_home(state: &AppState) -> Response {
    let backgrounds = match Backgrounds::load(&state.config.assets, Screen::Home).await {
        Ok(b) => b,
        Err(e) => return html_error(&e),
    };
    metrics::record_page_view(Screen::Home);
    Html(render::home_page(&state.config.text, &backgrounds)).into_response()
}

/// POST /go - leave the introduction for the results screen
pub async fn go_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;
    state.sessions.navigate(id, Action::Go).await;
    with_session(Redirect::to("/results").into_response(), id, created)
}

/// POST /home - return to the introduction
pub async fn home_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;
    state.sessions.navigate(id, Action::Home).await;
    with_session(Redirect::to("/").into_response(), id, created)
}
