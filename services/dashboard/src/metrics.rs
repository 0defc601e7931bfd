//! Prometheus metrics recorded by the dashboard.

use metrics::{counter, histogram};

use crate::session::Screen;

/// A rendered dashboard page.
pub fn record_page_view(screen: Screen) {
    counter!("dashboard_requests_total", "screen" => screen.as_str()).increment(1);
}

/// Outcome of one pipeline evaluation.
pub fn record_recommendation(outcome: &'static str) {
    counter!("recommendations_total", "outcome" => outcome).increment(1);
}

/// An upload attempt; `result` is "accepted" or "rejected".
pub fn record_upload(result: &'static str) {
    counter!("image_uploads_total", "result" => result).increment(1);
}

/// Time spent reading and validating the dataset.
pub fn record_dataset_load(duration_ms: f64) {
    histogram!("dataset_load_duration_ms").record(duration_ms);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_a_noop() {
        record_page_view(Screen::Home);
        record_recommendation("recommended");
        record_upload("accepted");
        record_dataset_load(1.5);
    }
}
