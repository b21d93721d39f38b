//! # Input Files
//!
//! Builder state and error files may be JSON or YAML. The format is
//! chosen by extension: `.yaml`/`.yml` is YAML, anything else is JSON.

use std::path::Path;

use anyhow::Context;
use cb_core::{BuilderState, ErrorTree};
use serde::de::DeserializeOwned;

/// Read and deserialize a JSON or YAML file.
pub fn load_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML in {}", path.display())),
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON in {}", path.display())),
    }
}

/// Load a builder state (`formValues` + optional `testingValues`).
pub fn load_state(path: &Path) -> anyhow::Result<BuilderState> {
    load_file(path)
}

/// Load a form-layer error object into an error tree.
pub fn load_errors(path: &Path) -> anyhow::Result<ErrorTree> {
    let value: serde_json::Value = load_file(path)?;
    Ok(ErrorTree::from_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::View;

    #[test]
    fn test_load_state_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(
            &path,
            r#"{ "formValues": { "global": {}, "streams": [ {} ] } }"#,
        )
        .unwrap();
        let state = load_state(&path).unwrap();
        assert_eq!(state.form_values.stream_count(), 1);
    }

    #[test]
    fn test_load_state_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.yaml");
        std::fs::write(
            &path,
            "formValues:\n  global:\n    urlBase: https://api.example.com\n  streams: []\ntestingValues:\n  client_secret: s3cr3t\n",
        )
        .unwrap();
        let state = load_state(&path).unwrap();
        assert_eq!(state.form_values.global()["urlBase"], "https://api.example.com");
        assert!(state.testing_values.contains_key("client_secret"));
    }

    #[test]
    fn test_load_state_rejects_bad_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{ "formValues": { "global": {} } }"#).unwrap();
        let err = load_state(&path).unwrap_err();
        assert!(format!("{err:#}").contains("streams"));
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("errors.json");
        std::fs::write(&path, r#"{ "streams": { "0": { "name": "required" } } }"#).unwrap();
        let errors = load_errors(&path).unwrap();
        assert!(errors.stream(0));
        assert!(!errors.global());
        assert_eq!(
            cb_errors::invalid_views(&errors, 1, None),
            vec![View::Stream(0)]
        );
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = load_state(Path::new("/nonexistent/state.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
