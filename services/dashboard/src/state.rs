//! Application state for the dashboard.

use std::time::Instant;

use crop_common::{CropError, CropResult};
use metrics_exporter_prometheus::PrometheusHandle;
use recommender::Dataset;
use uuid::Uuid;

use crate::config::DashboardConfig;
use crate::metrics;
use crate::session::{SessionData, SessionStore};

/// Shared application state.
pub struct AppState {
    pub config: DashboardConfig,

    pub sessions: SessionStore,

    /// Prometheus exporter handle; absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(config: DashboardConfig, prometheus: Option<PrometheusHandle>) -> Self {
        let sessions = SessionStore::new(config.limits.session_ttl_minutes);
        Self {
            config,
            sessions,
            prometheus,
        }
    }

    /// The session's dataset, loading it on first use.
    ///
    /// A failed load is not cached, so fixing the file on disk is picked up
    /// by the next request.
    pub async fn session_data(&self, id: Uuid) -> CropResult<SessionData> {
        if let Some(data) = self.sessions.get(id).await.and_then(|s| s.data) {
            return Ok(data);
        }

        let data = SessionData::new(self.load_dataset().await?);
        self.sessions
            .update(id, |session| session.data = Some(data.clone()))
            .await;
        Ok(data)
    }

    /// Read the configured dataset from disk.
    pub async fn load_dataset(&self) -> CropResult<Dataset> {
        let path = self.config.dataset_path.clone();
        let start = Instant::now();

        let dataset = tokio::task::spawn_blocking(move || Dataset::from_path(&path))
            .await
            .map_err(|e| CropError::InternalError(format!("dataset loader panicked: {}", e)))??;

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        metrics::record_dataset_load(elapsed_ms);
        tracing::debug!(
            source = ?dataset.source(),
            rows = dataset.len(),
            elapsed_ms,
            "Session dataset ready"
        );
        Ok(dataset)
    }
}
