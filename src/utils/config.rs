use crate::tree::TreeConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a tree configuration from a JSON file.
///
/// Missing fields take their defaults, so `{}` is a valid configuration.
pub fn load_config(path: &Path) -> Result<TreeConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: TreeConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;
    Ok(config)
}

/// Render a configuration as pretty JSON
pub fn config_to_json(config: &TreeConfig) -> Result<String> {
    serde_json::to_string_pretty(config).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TerminatorPolicy;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_from_empty_object() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.terminators, TerminatorPolicy::Unique);
        assert!(!config.verify_after_insert);
    }

    #[test]
    fn test_roundtrip() {
        let config = TreeConfig {
            terminators: TerminatorPolicy::Shared,
            verify_after_insert: true,
        };
        let json = config_to_json(&config).unwrap();
        assert!(json.contains("\"shared\""));

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        let parsed = load_config(file.path()).unwrap();
        assert_eq!(parsed.terminators, TerminatorPolicy::Shared);
        assert!(parsed.verify_after_insert);
    }

    #[test]
    fn test_errors_name_the_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"terminators\": \"sometimes\"}}").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse config file"));

        let missing = load_config(Path::new("/nonexistent/stree.json")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));
    }
}
