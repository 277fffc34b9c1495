//! Configuration file support for blur-qa.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/blur-qa/config.toml` (lowest priority)
//! - Project-local: `.blur-qa.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Project-local config file name.
const PROJECT_CONFIG: &str = ".blur-qa.toml";

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// General options.
    pub general: GeneralConfig,
    /// Blur analysis settings.
    pub blur: BlurConfig,
    /// Image loading settings.
    pub loader: LoaderConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// General configuration options.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
}

/// Blur analysis configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct BlurConfig {
    /// Laplacian variance threshold.
    pub threshold: Option<f64>,
    /// Advisory minimum image side in pixels.
    pub min_image_size: Option<u32>,
    /// Advisory maximum image side in pixels.
    pub max_image_size: Option<u32>,
    /// Accepted file extensions.
    pub supported_formats: Option<Vec<String>>,
}

/// Image loading configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Timeout for remote downloads, in seconds.
    pub timeout_secs: Option<u64>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/blur-qa/config.toml`
    /// 2. Project-local: `.blur-qa.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. If the merged values are invalid a
    /// warning is printed and the hardcoded defaults are used instead.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}; ignoring config files");
            return Self::default();
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.blur.threshold {
            if !(t.is_finite() && t > 0.0) {
                return Err(format!("blur.threshold must be a positive number, got {t}"));
            }
        }

        if let (Some(min), Some(max)) = (self.blur.min_image_size, self.blur.max_image_size) {
            if min > max {
                return Err(format!(
                    "blur.min_image_size ({min}) must not exceed blur.max_image_size ({max})"
                ));
            }
        }

        if let Some(ref formats) = self.blur.supported_formats {
            if formats.is_empty() {
                return Err("blur.supported_formats must not be empty".to_string());
            }
        }

        if self.loader.timeout_secs == Some(0) {
            return Err("loader.timeout_secs must be at least 1".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    pub fn merge(&mut self, other: Self) {
        self.general.recursive = other.general.recursive.or(self.general.recursive);

        self.blur.threshold = other.blur.threshold.or(self.blur.threshold);
        self.blur.min_image_size = other.blur.min_image_size.or(self.blur.min_image_size);
        self.blur.max_image_size = other.blur.max_image_size.or(self.blur.max_image_size);
        self.blur.supported_formats = other
            .blur
            .supported_formats
            .or_else(|| self.blur.supported_formats.take());

        self.loader.timeout_secs = other.loader.timeout_secs.or(self.loader.timeout_secs);

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("blur-qa").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.blur-qa.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_CONFIG))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.blur.threshold.is_none());
        assert!(config.loader.timeout_secs.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.blur.threshold.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[general]
recursive = true

[blur]
threshold = 150.0
min_image_size = 64
max_image_size = 2048
supported_formats = ['jpg', 'png']

[loader]
timeout_secs = 5

[output]
format = 'json'
pretty = true
progress = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.general.recursive, Some(true));
        assert_eq!(config.blur.threshold, Some(150.0));
        assert_eq!(config.blur.min_image_size, Some(64));
        assert_eq!(config.blur.max_image_size, Some(2048));
        assert_eq!(
            config.blur.supported_formats,
            Some(vec!["jpg".to_string(), "png".to_string()])
        );
        assert_eq!(config.loader.timeout_secs, Some(5));
        assert_eq!(config.output.format, Some("json".to_string()));
        assert_eq!(config.output.pretty, Some(true));
        assert_eq!(config.output.progress, Some(false));
    }

    #[test]
    fn test_merge_preserves_base_when_override_is_none() {
        let mut base: AppConfig = toml::from_str(
            r"
[blur]
threshold = 80.0
min_image_size = 64

[loader]
timeout_secs = 10
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[blur]
threshold = 120.0
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.blur.threshold, Some(120.0));
        assert_eq!(base.blur.min_image_size, Some(64));
        assert_eq!(base.loader.timeout_secs, Some(10));
    }

    #[test]
    fn test_merge_all_sections() {
        let mut base: AppConfig = toml::from_str(
            r"
[general]
recursive = false

[blur]
supported_formats = ['jpg']

[output]
format = 'json'
pretty = false
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[general]
recursive = true

[blur]
supported_formats = ['png', 'webp']

[loader]
timeout_secs = 3

[output]
format = 'jsonl'
pretty = true
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.general.recursive, Some(true));
        assert_eq!(
            base.blur.supported_formats,
            Some(vec!["png".to_string(), "webp".to_string()])
        );
        assert_eq!(base.loader.timeout_secs, Some(3));
        assert_eq!(base.output.format, Some("jsonl".to_string()));
        assert_eq!(base.output.pretty, Some(true));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[blur]
threshold = 60.0
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.blur.threshold, Some(60.0));
    }

    #[test]
    fn test_invalid_toml_syntax_handled() {
        let toml = r"
[blur
threshold = 50.0
";
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "invalid TOML should return error");
    }

    #[test]
    fn test_invalid_field_type_handled() {
        let toml = r#"
[blur]
threshold = "not a number"
"#;
        let result: Result<AppConfig, _> = toml::from_str(toml);
        assert!(result.is_err(), "type mismatch should return error");
    }

    #[test]
    fn test_validate_threshold_not_positive() {
        let mut config = AppConfig::default();
        config.blur.threshold = Some(0.0);
        assert!(config.validate().unwrap_err().contains("blur.threshold"));

        config.blur.threshold = Some(-5.0);
        assert!(config.validate().unwrap_err().contains("blur.threshold"));
    }

    #[test]
    fn test_validate_size_bounds() {
        let mut config = AppConfig::default();
        config.blur.min_image_size = Some(500);
        config.blur.max_image_size = Some(100);
        assert!(config.validate().unwrap_err().contains("min_image_size"));
    }

    #[test]
    fn test_validate_empty_formats() {
        let mut config = AppConfig::default();
        config.blur.supported_formats = Some(vec![]);
        assert!(config.validate().unwrap_err().contains("supported_formats"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = AppConfig::default();
        config.loader.timeout_secs = Some(0);
        assert!(config.validate().unwrap_err().contains("timeout_secs"));
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());
        assert!(config.validate().unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_config_passes() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG), "").unwrap();

        let found = find_config_in_parents(&nested).unwrap();
        assert_eq!(found, dir.path().join(PROJECT_CONFIG));
    }
}
