//! Error types for crop advisor crates.

use thiserror::Error;

/// Result type alias using CropError.
pub type CropResult<T> = Result<T, CropError>;

/// Primary error type for dataset, selection and upload operations.
#[derive(Debug, Error)]
pub enum CropError {
    // === Dataset Errors ===
    #[error("Dataset unavailable at {path}: {message}")]
    DatasetUnavailable { path: String, message: String },

    #[error("Dataset is missing required column(s): {0}")]
    MissingColumn(String),

    #[error("Invalid value in column '{column}' on line {line}: {message}")]
    InvalidData {
        line: u64,
        column: String,
        message: String,
    },

    #[error("Failed to parse dataset: {0}")]
    ParseError(String),

    // === Selection Errors ===
    #[error("No options available for {0}")]
    NoOptions(String),

    #[error("'{value}' is not an available option for {column}")]
    InvalidSelection { column: String, value: String },

    #[error("Invalid parameter value for '{param}': {message}")]
    InvalidParameter { param: String, message: String },

    // === Asset Errors ===
    #[error("Image asset unavailable at {path}: {message}")]
    AssetUnavailable { path: String, message: String },

    #[error("Unsupported image: {0}")]
    UnsupportedImage(String),

    #[error("Upload too large: {size} bytes exceeds the {limit} byte limit")]
    UploadTooLarge { size: usize, limit: usize },

    // === Infrastructure Errors ===
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl CropError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            CropError::NoOptions(_)
            | CropError::InvalidSelection { .. }
            | CropError::InvalidParameter { .. }
            | CropError::UnsupportedImage(_) => 400,

            CropError::UploadTooLarge { .. } => 413,

            _ => 500,
        }
    }

    /// True for defects in the dataset or assets rather than in user input.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            CropError::DatasetUnavailable { .. }
                | CropError::MissingColumn(_)
                | CropError::InvalidData { .. }
                | CropError::ParseError(_)
                | CropError::AssetUnavailable { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_errors_are_client_errors() {
        let err = CropError::InvalidSelection {
            column: "pH Range".to_string(),
            value: "9-10".to_string(),
        };
        assert_eq!(err.http_status_code(), 400);
        assert!(!err.is_configuration_error());
        assert_eq!(CropError::NoOptions("pH Range".into()).http_status_code(), 400);
    }

    #[test]
    fn test_dataset_errors_are_configuration_errors() {
        let err = CropError::MissingColumn("Crop, pH Range".to_string());
        assert_eq!(err.http_status_code(), 500);
        assert!(err.is_configuration_error());
        assert_eq!(
            err.to_string(),
            "Dataset is missing required column(s): Crop, pH Range"
        );
    }

    #[test]
    fn test_upload_too_large_status() {
        let err = CropError::UploadTooLarge { size: 10, limit: 5 };
        assert_eq!(err.http_status_code(), 413);
    }
}
