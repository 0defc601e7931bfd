//! Common types shared across the crop advisor crates and services.

pub mod error;
pub mod record;
pub mod schema;

pub use error::{CropError, CropResult};
pub use record::{CropRecord, FieldValue};
pub use schema::{ColumnKind, FilterColumn};
