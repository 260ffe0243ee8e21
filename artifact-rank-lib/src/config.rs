use crate::Result;
use crate::search::SearchLimits;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "artifact-rank.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Maximum number of metric computations running at once
    #[serde(default = "default_worker_pool_size")]
    pub worker_pool_size: usize,

    /// Time budget for a single metric
    #[serde(default = "default_metric_timeout", with = "humantime_serde")]
    pub metric_timeout: Duration,

    /// Time budget for matching a search pattern against a single artifact
    #[serde(default = "default_search_candidate_timeout", with = "humantime_serde")]
    pub search_candidate_timeout: Duration,

    /// Longest search pattern accepted, in characters
    #[serde(default = "default_max_pattern_length")]
    pub max_pattern_length: usize,

    /// Number of artifacts matched against a search pattern at once
    #[serde(default = "default_search_concurrency")]
    pub search_concurrency: usize,
}

const fn default_worker_pool_size() -> usize {
    44
}

const fn default_metric_timeout() -> Duration {
    Duration::from_secs(5)
}

const fn default_search_candidate_timeout() -> Duration {
    Duration::from_millis(250)
}

const fn default_max_pattern_length() -> usize {
    256
}

const fn default_search_concurrency() -> usize {
    8
}

impl EngineConfig {
    /// Load configuration from a file or use defaults
    ///
    /// With no explicit path, `artifact-rank.toml` in `base_dir` is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a size or duration is zero
    pub fn validate(&self) -> Result<()> {
        if self.worker_pool_size == 0 {
            bail!("worker_pool_size must be at least 1");
        }

        if self.metric_timeout.is_zero() {
            bail!("metric_timeout must be greater than zero");
        }

        if self.search_candidate_timeout.is_zero() {
            bail!("search_candidate_timeout must be greater than zero");
        }

        if self.max_pattern_length == 0 {
            bail!("max_pattern_length must be at least 1");
        }

        if self.search_concurrency == 0 {
            bail!("search_concurrency must be at least 1");
        }

        Ok(())
    }

    #[must_use]
    pub fn search_limits(&self) -> SearchLimits {
        SearchLimits {
            max_pattern_length: self.max_pattern_length,
            candidate_timeout: self.search_candidate_timeout,
            concurrency: self.search_concurrency,
            ..SearchLimits::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to EngineConfig")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        config.validate().unwrap();
        assert_eq!(config.worker_pool_size, 44);
        assert_eq!(config.metric_timeout, Duration::from_secs(5));
        assert_eq!(config.search_candidate_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_empty_file_uses_field_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(toml::from_str::<EngineConfig>("worker_pool = 3").is_err());
    }

    #[test]
    fn test_validate_rejects_zero_values() {
        let config = EngineConfig { worker_pool_size: 0, ..EngineConfig::default() };
        assert!(config.validate().is_err());

        let config = EngineConfig { metric_timeout: Duration::ZERO, ..EngineConfig::default() };
        assert!(config.validate().is_err());

        let config = EngineConfig { search_concurrency: 0, ..EngineConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_search_limits_follow_config() {
        let config = EngineConfig { max_pattern_length: 12, ..EngineConfig::default() };
        let limits = config.search_limits();
        assert_eq!(limits.max_pattern_length, 12);
        assert_eq!(limits.concurrency, 8);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let output_path = Utf8PathBuf::try_from(tmp.path().join(CONFIG_FILE_NAME)).unwrap();
        EngineConfig::save_default(&output_path).unwrap();

        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(EngineConfig::load(&base_dir, None).unwrap(), EngineConfig::default());
        assert_eq!(EngineConfig::load(&base_dir, Some(&output_path)).unwrap(), EngineConfig::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let base_dir = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        assert_eq!(EngineConfig::load(&base_dir, None).unwrap(), EngineConfig::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_invalid_values_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("bad.toml")).unwrap();
        fs::write(&path, "search_concurrency = 0\n").unwrap();
        assert!(EngineConfig::load(&path, Some(&path)).is_err());
    }
}
