//! Shared fixtures for repository tests.

use tempfile::TempDir;

use super::connection::CsvConnection;

/// Fresh connection over a temp directory. The TempDir must be kept
/// alive for the duration of the test.
pub fn test_connection() -> (CsvConnection, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let connection = CsvConnection::new(temp_dir.path()).expect("Failed to create connection");
    (connection, temp_dir)
}
