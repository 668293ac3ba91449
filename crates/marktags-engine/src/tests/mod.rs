pub mod integration;

use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary vault directory for tests.
pub fn create_test_vault() -> TempDir {
    TempDir::new().expect("Failed to create temp vault")
}

/// Create a file inside the test vault and return its path.
pub fn create_test_file(vault: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = vault.path().join(name);
    std::fs::write(&path, content).expect("Failed to write test file");
    path
}
