use paint_quantize::{DistanceMetric, PaletteBuilder, MAX_ACCENTS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Distance metric: "redmean", "euclidean" or "deltaE"
    #[serde(default = "default_metric")]
    pub metric: String,

    /// Accent distinctiveness threshold (defaults per metric)
    #[serde(default)]
    pub distinctiveness: Option<u32>,

    /// Number of most-frequent colors examined for accents (defaults per metric)
    #[serde(default)]
    pub candidate_pool: Option<usize>,

    /// Target number of accent colors
    #[serde(default = "default_accent_count")]
    pub accent_count: usize,

    /// Instruction store file
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
}

fn default_metric() -> String {
    DistanceMetric::default().name().to_string()
}

fn default_accent_count() -> usize {
    MAX_ACCENTS
}

fn default_store_path() -> PathBuf {
    PathBuf::from("temp/instructions.json")
}

/// Validated run settings derived from [`AppConfig`].
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub metric: DistanceMetric,
    pub distinctiveness: u32,
    pub candidate_pool: usize,
    pub accent_count: usize,
    pub store_path: PathBuf,
}

impl RunSettings {
    /// Palette builder configured with these settings.
    pub fn palette_builder(&self) -> PaletteBuilder {
        PaletteBuilder::new(self.metric)
            .distinctiveness(self.distinctiveness)
            .candidate_pool(self.candidate_pool)
            .accent_count(self.accent_count)
    }
}

impl AppConfig {
    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&content)?;
        tracing::info!(
            path = %path.display(),
            metric = %config.metric,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Load from `path` if given and present, otherwise use defaults.
    ///
    /// A missing file falls back to defaults; a present but broken file is
    /// an error.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) if path.exists() => Self::load(path),
            Some(path) => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Resolve the metric and per-metric defaults, and validate the result.
    ///
    /// An unknown metric is fatal here, before any image is touched.
    pub fn resolve(&self) -> Result<RunSettings, ConfigError> {
        let metric: DistanceMetric = self.metric.parse()?;
        let settings = RunSettings {
            metric,
            distinctiveness: self
                .distinctiveness
                .unwrap_or_else(|| metric.default_distinctiveness()),
            candidate_pool: self
                .candidate_pool
                .unwrap_or_else(|| metric.default_candidate_pool()),
            accent_count: self.accent_count,
            store_path: self.store_path.clone(),
        };

        settings
            .palette_builder()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        Ok(settings)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            metric: default_metric(),
            distinctiveness: None,
            candidate_pool: None,
            accent_count: default_accent_count(),
            store_path: default_store_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.metric, "redmean");
        assert_eq!(config.distinctiveness, None);
        assert_eq!(config.candidate_pool, None);
        assert_eq!(config.accent_count, 10);
        assert_eq!(config.store_path, PathBuf::from("temp/instructions.json"));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = AppConfig::from_yaml("{}").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_resolve_uses_metric_defaults() {
        for (name, threshold) in [("redmean", 250), ("euclidean", 50), ("deltaE", 10)] {
            let config = AppConfig {
                metric: name.to_string(),
                ..AppConfig::default()
            };
            let settings = config.resolve().unwrap();
            assert_eq!(settings.metric.name(), name);
            assert_eq!(settings.distinctiveness, threshold);
            assert_eq!(settings.candidate_pool, 250);
        }
    }

    #[test]
    fn test_resolve_keeps_overrides() {
        let yaml = r#"
metric: euclidean
distinctiveness: 80
candidate_pool: 40
accent_count: 6
store_path: out/run.json
"#;
        let settings = AppConfig::from_yaml(yaml).unwrap().resolve().unwrap();
        assert_eq!(settings.metric, DistanceMetric::Euclidean);
        assert_eq!(settings.distinctiveness, 80);
        assert_eq!(settings.candidate_pool, 40);
        assert_eq!(settings.accent_count, 6);
        assert_eq!(settings.store_path, PathBuf::from("out/run.json"));
    }

    #[test]
    fn test_unknown_metric_is_fatal() {
        let config = AppConfig::from_yaml("metric: manhattan").unwrap();
        assert!(matches!(config.resolve(), Err(ConfigError::Metric(_))));
    }

    #[test]
    fn test_pool_must_exceed_accent_count() {
        let config = AppConfig::from_yaml("candidate_pool: 10\naccent_count: 10").unwrap();
        assert!(matches!(config.resolve(), Err(ConfigError::Invalid(_))));

        let config = AppConfig::from_yaml("accent_count: 11").unwrap();
        assert!(matches!(config.resolve(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(matches!(
            AppConfig::from_yaml("accent_count: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_bundled_config_resolves() {
        let config = AppConfig::from_yaml(include_str!("../../config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.resolve().is_ok());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config =
            AppConfig::load_or_default(Some(Path::new("/nonexistent/redrawer.yaml"))).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
