//! Path utilities for locating test data and writing temporary files.

use std::io::Write;
use std::path::{Path, PathBuf};

/// Returns the workspace root directory.
///
/// This is determined by walking up from the test-utils manifest directory.
pub fn workspace_root() -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent() // crates/
        .and_then(|p| p.parent()) // workspace root
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from(manifest_dir))
}

/// Returns `services/{service_name}/data/`.
pub fn service_data_dir(service_name: &str) -> PathBuf {
    workspace_root()
        .join("services")
        .join(service_name)
        .join("data")
}

/// Searches for a test file in multiple locations.
///
/// This function checks the following locations in order:
/// 1. Environment variable `TEST_DATA_DIR` (if set)
/// 2. `services/dashboard/data/`
/// 3. `testdata/` at the workspace root
pub fn find_test_file(name: &str) -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(test_data_dir) = std::env::var("TEST_DATA_DIR") {
        candidates.push(PathBuf::from(test_data_dir).join(name));
    }

    candidates.extend([
        service_data_dir("dashboard").join(name),
        workspace_root().join("testdata").join(name),
    ]);

    candidates.into_iter().find(|path| path.exists())
}

/// Creates a temporary directory for test output.
///
/// The directory is automatically cleaned up when the returned `TempDir` is dropped.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary test directory")
}

/// Writes `contents` to `dir/name` and returns the full path.
pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).expect("Failed to create test file");
    file.write_all(contents).expect("Failed to write test file");
    path
}

/// Writes the sample dataset into a fresh temporary directory.
///
/// Returns the directory guard together with the CSV path.
pub fn temp_sample_dataset() -> (tempfile::TempDir, PathBuf) {
    let dir = temp_test_dir();
    let path = write_file(dir.path(), "crops.csv", crate::SAMPLE_CSV.as_bytes());
    (dir, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_root_is_valid() {
        let root = workspace_root();
        assert!(
            root.join("Cargo.toml").exists(),
            "Workspace root should contain Cargo.toml: {:?}",
            root
        );
    }

    #[test]
    fn test_service_data_dir() {
        let dir = service_data_dir("dashboard");
        assert!(dir.to_string_lossy().contains("dashboard"));
        assert!(dir.ends_with("data"));
    }

    #[test]
    fn test_temp_sample_dataset_written() {
        let (_dir, path) = temp_sample_dataset();
        let contents = std::fs::read_to_string(path).unwrap();
        assert_eq!(contents, crate::SAMPLE_CSV);
    }
}
