//! Utility functions for error handling
//!
//! Helpers that open files and create directories while keeping the path in
//! the error.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SurveyError};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for the log line)
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        log::error!("File not found while {purpose}: {}", path.display());
        return Err(SurveyError::io_at(
            path,
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        ));
    }

    if !path.is_file() {
        return Err(SurveyError::io_at(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "path is not a file"),
        ));
    }

    fs::File::open(path).map_err(|e| {
        if e.kind() == io::ErrorKind::PermissionDenied {
            log::error!("Permission denied while {purpose}: {}", path.display());
        }
        SurveyError::io_at(path, e)
    })
}

/// Create a directory (and parents) if it does not exist yet
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    if path.exists() {
        return Err(SurveyError::io_at(
            path,
            io::Error::new(io::ErrorKind::AlreadyExists, "path exists and is not a directory"),
        ));
    }
    fs::create_dir_all(path).map_err(|e| SurveyError::io_at(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.csv");
        let err = safe_open_file(&missing, "testing").unwrap_err();
        assert!(matches!(err, SurveyError::Io { path: Some(_), .. }));
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_safe_open_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(safe_open_file(dir.path(), "testing").is_err());
    }

    #[test]
    fn test_ensure_directory_creates_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        ensure_directory(&nested).unwrap();
        assert!(nested.is_dir());
        // second call is a no-op
        ensure_directory(&nested).unwrap();
    }
}
