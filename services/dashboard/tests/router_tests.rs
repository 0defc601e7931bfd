//! End-to-end tests of the dashboard router.

use std::io::Cursor;
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use dashboard::{config::AssetsConfig, create_router, render, AppState, DashboardConfig};
use tempfile::TempDir;
use test_utils::{temp_sample_dataset, write_file, SAMPLE_HEADER};
use tower::ServiceExt;

// ============================================================================
// Harness
// ============================================================================

struct Harness {
    _dir: TempDir,
    app: Router,
    cookie: Option<String>,
}

struct Reply {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

const RICE_QUERY: &str = "duration=6&investment=30000&soil=Clayey&water=2500&nitrogen=Medium\
&phosphorus=Low&potassium=Medium&humidity=High&temperature=20-35&ph=5.5-6.5";

fn config_in(dir: &TempDir, dataset: std::path::PathBuf) -> DashboardConfig {
    for name in ["fields.png", "dark.png", "leaves.png"] {
        write_file(dir.path(), name, b"background");
    }
    DashboardConfig {
        dataset_path: dataset,
        assets: AssetsConfig {
            dir: dir.path().to_path_buf(),
            ..Default::default()
        },
        ..Default::default()
    }
}

impl Harness {
    fn new() -> Self {
        let (dir, dataset) = temp_sample_dataset();
        let config = config_in(&dir, dataset);
        Self::with_config(dir, config)
    }

    fn with_config(dir: TempDir, config: DashboardConfig) -> Self {
        let state = Arc::new(AppState::new(config, None));
        Self {
            _dir: dir,
            app: create_router(state),
            cookie: None,
        }
    }

    async fn send(&mut self, request: Request<Body>) -> Reply {
        let response = self.app.clone().oneshot(request).await.unwrap();
        if let Some(cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = cookie.to_str().unwrap().split(';').next().unwrap();
            self.cookie = Some(pair.to_string());
        }
        let status = response.status();
        let location = response
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        Reply {
            status,
            location,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, cookie),
            None => builder,
        }
    }

    async fn get(&mut self, uri: &str) -> Reply {
        let request = self.request("GET", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn post(&mut self, uri: &str) -> Reply {
        let request = self.request("POST", uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    async fn upload(&mut self, file_name: &str, bytes: &[u8], query: &str) -> Reply {
        let boundary = "crop-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"query\"\r\n\r\n{q}\r\n",
                b = boundary,
                q = query
            )
            .as_bytes(),
        );
        body.extend_from_slice(
            format!(
                "--{b}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{f}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                b = boundary,
                f = file_name
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

        let request = self
            .request("POST", "/results/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap();
        self.send(request).await
    }

    /// Start a session and move it to the results screen.
    async fn enter_results(&mut self) {
        let reply = self.get("/").await;
        assert_eq!(reply.status, StatusCode::OK);
        let reply = self.post("/go").await;
        assert_eq!(reply.status, StatusCode::SEE_OTHER);
        assert_eq!(reply.location.as_deref(), Some("/results"));
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([90, 160, 60]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health() {
    let mut harness = Harness::new();
    let reply = harness.get("/health").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("\"ok\""));
}

#[tokio::test]
async fn test_ready_when_files_exist() {
    let mut harness = Harness::new();
    let reply = harness.get("/ready").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("\"ready\":true"));
}

#[tokio::test]
async fn test_not_ready_when_dataset_is_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, dir.path().to_path_buf());
    let mut harness = Harness::with_config(dir, config);
    let reply = harness.get("/ready").await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(reply.body.contains("\"ready\":false"));
}

#[tokio::test]
async fn test_not_ready_without_dataset() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, dir.path().join("absent.csv"));
    let mut harness = Harness::with_config(dir, config);
    let reply = harness.get("/ready").await;
    assert_eq!(reply.status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(reply.body.contains("absent.csv"));
}

#[tokio::test]
async fn test_metrics_without_recorder() {
    let mut harness = Harness::new();
    let reply = harness.get("/metrics").await;
    assert_eq!(reply.status, StatusCode::OK);
}

// ============================================================================
// Navigation
// ============================================================================

#[tokio::test]
async fn test_first_visit_shows_home_and_sets_cookie() {
    let mut harness = Harness::new();
    let reply = harness.get("/").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("AI-powered Smart Agricultural Monitoring System"));
    assert!(reply.body.contains("About this Application"));
    assert!(harness.cookie.as_deref().unwrap().starts_with("crop_session="));
}

#[tokio::test]
async fn test_results_requires_go() {
    let mut harness = Harness::new();
    harness.get("/").await;
    let reply = harness.get("/results").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/"));
}

#[tokio::test]
async fn test_go_then_home_round_trip() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.get("/").await;
    assert!(reply.body.contains("Comprehensive Crop Recommendation System"));

    let reply = harness.post("/home").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/"));

    let reply = harness.get("/").await;
    assert!(reply.body.contains("AI-powered Smart Agricultural Monitoring System"));
}

// ============================================================================
// Results
// ============================================================================

#[tokio::test]
async fn test_rice_recommended() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.get(&format!("/results?{}", RICE_QUERY)).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains("Final Recommended Crops"));
    assert!(reply.body.contains("<p><strong>Crop</strong>: Rice</p>"));
    assert!(reply.body.contains(render::NO_UPLOAD));
}

#[tokio::test]
async fn test_default_selections_have_no_investment_match() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.get("/results").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(render::NO_INVESTMENT_MATCH));
    assert!(!reply.body.contains("Final Recommendation"));
}

#[tokio::test]
async fn test_unknown_selection_is_rejected() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.get("/results?soil=Moon%20Dust").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body.contains("Moon Dust"));
}

#[tokio::test]
async fn test_stale_environment_value_kept_on_investment_miss() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.get("/results?nitrogen=Stale").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply.body.contains(render::NO_INVESTMENT_MATCH));
    assert!(reply
        .body
        .contains(r#"<input type="hidden" name="nitrogen" value="Stale">"#));
}

#[tokio::test]
async fn test_stale_environment_value_rejected_after_investment_match() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let query = RICE_QUERY.replace("nitrogen=Medium", "nitrogen=Stale");
    let reply = harness.get(&format!("/results?{}", query)).await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body.contains("Invalid selection"));
    assert!(reply.body.contains("Stale"));
}

#[tokio::test]
async fn test_missing_dataset_shows_error_page() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_in(&dir, dir.path().join("absent.csv"));
    let mut harness = Harness::with_config(dir, config);
    harness.enter_results().await;

    let reply = harness.get("/results").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.body.contains("Crop dataset could not be loaded"));
    assert!(reply.body.contains("absent.csv"));
}

#[tokio::test]
async fn test_missing_background_shows_error_page() {
    let (dir, dataset) = temp_sample_dataset();
    let mut config = config_in(&dir, dataset);
    config.assets.home_page = "gone.png".to_string();
    let mut harness = Harness::with_config(dir, config);

    let reply = harness.get("/").await;
    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(reply.body.contains("gone.png"));
}

#[tokio::test]
async fn test_empty_dataset_reports_no_options() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = write_file(dir.path(), "empty.csv", SAMPLE_HEADER.as_bytes());
    let config = config_in(&dir, dataset);
    let mut harness = Harness::with_config(dir, config);
    harness.enter_results().await;

    let reply = harness.get("/results").await;
    assert_eq!(reply.status, StatusCode::OK);
    assert!(reply
        .body
        .contains("No options available for Duration (Months)"));
}

// ============================================================================
// Uploads
// ============================================================================

#[tokio::test]
async fn test_upload_reports_format_and_size() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.upload("leaf.png", &png(32, 24), "soil=Clayey").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/results?soil=Clayey"));

    let reply = harness.get("/results?soil=Clayey").await;
    assert!(reply.body.contains("Image format: PNG"));
    assert!(reply.body.contains("Image size: 32 x 24"));
    assert!(!reply.body.contains(render::NO_UPLOAD));
}

#[tokio::test]
async fn test_unsupported_upload_leaves_notice_once() {
    let mut harness = Harness::new();
    harness.enter_results().await;

    let reply = harness.upload("notes.txt", b"plain text", "").await;
    assert_eq!(reply.status, StatusCode::SEE_OTHER);
    assert_eq!(reply.location.as_deref(), Some("/results"));

    let reply = harness.get("/results").await;
    assert!(reply.body.contains("notes.txt"));
    assert!(reply.body.contains(render::NO_UPLOAD));

    let reply = harness.get("/results").await;
    assert!(!reply.body.contains("notes.txt"));
}

#[tokio::test]
async fn test_oversized_upload_is_413() {
    let (dir, dataset) = temp_sample_dataset();
    let mut config = config_in(&dir, dataset);
    config.limits.max_upload_bytes = 1024;
    let mut harness = Harness::with_config(dir, config);
    harness.enter_results().await;

    // Inside the body allowance, rejected by the size check on the file.
    let reply = harness.upload("big.png", &vec![0u8; 2048], "").await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(reply.body.contains("Image upload rejected"));

    // Past the body allowance, rejected while the stream is read.
    let reply = harness.upload("huge.png", &vec![0u8; 200 * 1024], "").await;
    assert_eq!(reply.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(reply.body.contains("Image upload rejected"));

    let reply = harness.get("/results").await;
    assert!(reply.body.contains(render::NO_UPLOAD));
}

// ============================================================================
// JSON API
// ============================================================================

#[tokio::test]
async fn test_api_options() {
    let mut harness = Harness::new();
    let reply = harness.get("/api/options").await;
    assert_eq!(reply.status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(json["rows"], 6);
    assert_eq!(json["options"].as_array().unwrap().len(), 10);
    assert_eq!(json["options"][2]["key"], "soil");
}

#[tokio::test]
async fn test_api_recommendations() {
    let mut harness = Harness::new();
    let reply = harness
        .get(&format!("/api/recommendations?{}", RICE_QUERY))
        .await;
    assert_eq!(reply.status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(json["selections"]["soil"], "Clayey");
    assert_eq!(json["recommendation"]["outcome"], "complete");
    assert_eq!(json["recommendation"]["common"][0], "Rice");
}

#[tokio::test]
async fn test_api_rejects_bad_threshold() {
    let mut harness = Harness::new();
    let reply = harness.get("/api/recommendations?water=lots").await;
    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert!(reply.body.contains("water"));
}

#[tokio::test]
async fn test_api_ignores_stale_environment_value_on_investment_miss() {
    let mut harness = Harness::new();
    let reply = harness.get("/api/recommendations?ph=Stale").await;
    assert_eq!(reply.status, StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
    assert_eq!(json["recommendation"]["outcome"], "no_investment_match");
    assert_eq!(json["selections"]["ph"], "Stale");
}
