use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::intelligence::ReferenceRangeTable;
use crate::models::{ParameterKey, ReferenceRange};

/// Application-level constants
pub const APP_NAME: &str = "Labsift";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Names a JSON config file when none is given on the command line.
pub const CONFIG_ENV_VAR: &str = "LABSIFT_CONFIG";

/// Get the application data directory
/// ~/Labsift/ (current directory when no home directory is known)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default directory for parsed report JSON files
pub fn reports_dir() -> PathBuf {
    app_data_dir().join("reports")
}

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "labsift=info,labsift_lib=info"
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Invalid config {0}: {1}")]
    Parse(PathBuf, serde_json::Error),
}

/// User configuration, read from a JSON file.
///
/// ```json
/// {
///   "reference_ranges": {
///     "glucose": [70, 100],
///     "hemoglobin": {"female": [11.5, 15.0]}
///   },
///   "output_dir": "/data/lab-reports"
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabsiftConfig {
    #[serde(default)]
    pub reference_ranges: BTreeMap<ParameterKey, ReferenceRange>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

impl LabsiftConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: Self =
            serde_json::from_str(&json).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        tracing::info!(
            path = %path.display(),
            overrides = config.reference_ranges.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `explicit`, else from `$LABSIFT_CONFIG`, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let from_env = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        match locate(explicit, from_env) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Built-in ranges with the configured overrides applied.
    pub fn reference_table(&self) -> ReferenceRangeTable {
        let mut table = ReferenceRangeTable::with_defaults();
        table.apply_overrides(&self.reference_ranges);
        table
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(reports_dir)
    }
}

fn locate(explicit: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .or_else(|| from_env.filter(|p| !p.as_os_str().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Interval, SexCategory};

    #[test]
    fn app_data_dir_is_named_after_app() {
        assert!(app_data_dir().ends_with("Labsift"));
        assert!(reports_dir().starts_with(app_data_dir()));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn explicit_path_beats_environment() {
        let explicit = Path::new("/etc/labsift.json");
        assert_eq!(
            locate(Some(explicit), Some(PathBuf::from("/tmp/env.json"))),
            Some(explicit.to_path_buf())
        );
        assert_eq!(
            locate(None, Some(PathBuf::from("/tmp/env.json"))),
            Some(PathBuf::from("/tmp/env.json"))
        );
        assert_eq!(locate(None, Some(PathBuf::new())), None);
        assert_eq!(locate(None, None), None);
    }

    #[test]
    fn loads_overrides_and_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labsift.json");
        std::fs::write(
            &path,
            r#"{
                "reference_ranges": {
                    "glucose": [70, 100],
                    "hemoglobin": {"female": [11.5, 15.0]}
                },
                "output_dir": "/data/out"
            }"#,
        )
        .unwrap();

        let config = LabsiftConfig::load(&path).unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("/data/out"));

        let table = config.reference_table();
        let hb = table.get(ParameterKey::Hemoglobin).unwrap();
        assert_eq!(hb.get(SexCategory::Female), Some(Interval::new(11.5, 15.0).unwrap()));
        assert_eq!(hb.get(SexCategory::Male), Some(Interval::new(13.0, 17.0).unwrap()));
    }

    #[test]
    fn empty_config_keeps_defaults() {
        let config: LabsiftConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.reference_table(), ReferenceRangeTable::with_defaults());
        assert_eq!(config.output_dir(), reports_dir());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labsift.json");
        std::fs::write(&path, r#"{"outputdir": "/x"}"#).unwrap();
        assert!(matches!(
            LabsiftConfig::load(&path),
            Err(ConfigError::Parse(_, _))
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        assert!(matches!(
            LabsiftConfig::load(Path::new("/nonexistent/labsift.json")),
            Err(ConfigError::Read(_, _))
        ));
    }
}
