//! Storage utilities for visionOS apps
//!
//! The desktop keeps no state between runs; the only thing ever read from
//! disk is an optional JSON settings file.

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("File not found: {0}")]
    NotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Get the config directory for a visionOS app
pub fn config_dir(app_name: &str) -> PathBuf {
    directories::ProjectDirs::from("", "", app_name)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(StorageError::NotFound(path.to_path_buf()));
    }
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Like [`load_json`], but a missing file yields `None` instead of an error.
pub fn load_json_optional<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match load_json(path) {
        Ok(value) => Ok(Some(value)),
        Err(StorageError::NotFound(_)) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Sample {
        name: String,
    }

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("visioncore_{}_{}", std::process::id(), name));
        std::fs::write(&path, contents).expect("write temp file");
        path
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("visioncore_definitely_missing.json");
        let loaded: Option<Sample> = load_json_optional(&path).expect("missing is not an error");
        assert!(loaded.is_none());
        assert!(matches!(load_json::<Sample>(&path), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_load_json() {
        let path = temp_file("ok.json", r#"{"name":"vision"}"#);
        let loaded: Sample = load_json(&path).expect("parse");
        assert_eq!(loaded, Sample { name: "vision".into() });
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_bad_json_is_error() {
        let path = temp_file("bad.json", "{not json");
        let loaded: Result<Option<Sample>> = load_json_optional(&path);
        assert!(matches!(loaded, Err(StorageError::Json(_))));
        let _ = std::fs::remove_file(path);
    }
}
