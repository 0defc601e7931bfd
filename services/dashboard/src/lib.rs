//! Crop recommendation dashboard.
//!
//! A two-screen browser dashboard over the crop reference table: an
//! introduction screen and a results screen that runs the investment and
//! environment filters for the selections in its query string.

pub mod assets;
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod render;
pub mod router;
pub mod session;
pub mod state;
pub mod upload;

pub use config::DashboardConfig;
pub use router::create_router;
pub use session::{Action, Screen};
pub use state::AppState;
