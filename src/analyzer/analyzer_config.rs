use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read analyzer config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse analyzer config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Analyzer configuration.
///
/// - `check_consistency` runs the analytic consistency gate once slot
///   materialization has been decided.
/// - `trace_analytic_info` emits the analytic tuple and smap as trace events.
/// - `output_tuple_name` / `intermediate_tuple_name` are the debug names
///   given to the analytic tuples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub check_consistency: bool,
    pub trace_analytic_info: bool,
    pub output_tuple_name: String,
    pub intermediate_tuple_name: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            check_consistency: true,
            trace_analytic_info: true,
            output_tuple_name: "analytic-tuple".to_string(),
            intermediate_tuple_name: "analytic-intermed-tuple".to_string(),
        }
    }
}

impl AnalyzerConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON document; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Convenience: skip the consistency gate.
    pub fn unchecked() -> Self {
        Self { check_consistency: false, ..Self::default() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = AnalyzerConfig::from_json_str(r#"{ "trace_analytic_info": false }"#).unwrap();
        assert!(!cfg.trace_analytic_info);
        assert!(cfg.check_consistency);
        assert_eq!(cfg.output_tuple_name, "analytic-tuple");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "check_consistency": false, "output_tuple_name": "win" }}"#).unwrap();
        let cfg = AnalyzerConfig::from_file(file.path()).unwrap();
        assert!(!cfg.check_consistency);
        assert_eq!(cfg.output_tuple_name, "win");
        assert_eq!(cfg.intermediate_tuple_name, "analytic-intermed-tuple");
    }

    #[test]
    fn bad_input_is_reported() {
        assert!(matches!(AnalyzerConfig::from_json_str("{ nope"), Err(ConfigError::Parse(_))));
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(matches!(AnalyzerConfig::from_file(missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn unchecked_turns_off_gate_only() {
        let cfg = AnalyzerConfig::unchecked();
        assert!(!cfg.check_consistency);
        assert!(cfg.trace_analytic_info);
    }
}
