//! JSON mirror of the dashboard pipeline.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::{IntoResponse, Response},
    Json,
};
use crop_common::CropError;
use recommender::{recommend, OptionList, Recommendation, Selections};
use serde::Serialize;

use super::{json_error, with_session};
use crate::metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct OptionsResponse<'a> {
    pub rows: usize,
    pub options: Vec<&'a OptionList>,
}

#[derive(Serialize)]
pub struct RecommendationResponse<'a> {
    /// Resolved value of each control, keyed by query parameter.
    pub selections: BTreeMap<&'static str, String>,
    pub recommendation: Recommendation<'a>,
}

/// GET /api/options - selectable values of every control
pub async fn options_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;
    let response = match state.session_data(id).await {
        Ok(data) => Json(OptionsResponse {
            rows: data.dataset.len(),
            options: data.options.iter().collect(),
        })
        .into_response(),
        Err(e) => json_error(&e),
    };
    with_session(response, id, created)
}

/// GET /api/recommendations - evaluate selections as JSON
pub async fn recommendations_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
    Query(selections): Query<Selections>,
) -> Response {
    let (id, created) = state.sessions.resolve(&headers).await;
    let data = match state.session_data(id).await {
        Ok(data) => data,
        Err(e) => return with_session(json_error(&e), id, created),
    };
    let options = data.options.as_ref();

    if let Some(column) = options.empty_columns().first() {
        let err = CropError::NoOptions(column.header().to_string());
        return with_session(json_error(&err), id, created);
    }

    let evaluation = match recommend(&data.dataset, options, &selections) {
        Ok(evaluation) => evaluation,
        Err(e) => return with_session(json_error(&e), id, created),
    };
    let recommendation = evaluation.recommendation;
    metrics::record_recommendation(recommendation.outcome());

    let body = RecommendationResponse {
        selections: evaluation
            .selections
            .into_iter()
            .map(|(column, value)| (column.query_key(), value))
            .collect(),
        recommendation,
    };
    with_session(Json(body).into_response(), id, created)
}
