//! Configuration management for mdpdf.
//!
//! Parses `mdpdf.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `render.default_title`

mod expand;

use std::path::{Path, PathBuf};

use mdpdf_renderer::{PageBreak, PageLayout, PageSize};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mdpdf.toml";

/// Default request body limit: 10 MiB.
const DEFAULT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Rendering configuration.
    pub render: RenderConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Page size (`a4` or `letter`).
    pub page_size: PageSize,
    /// Margin on all sides, in millimetres.
    pub margin: f32,
    /// Page break policy (`cursor` or `measured`).
    pub page_break: PageBreak,
    /// Title used when a request does not provide one.
    pub default_title: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            margin: 15.0,
            page_break: PageBreak::default(),
            default_title: "documento".to_owned(),
        }
    }
}

impl RenderConfig {
    /// Page layout described by this configuration.
    #[must_use]
    pub fn page_layout(&self) -> PageLayout {
        PageLayout::new(self.page_size, self.margin).with_page_break(self.page_break)
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mdpdf.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after applying CLI
    /// settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.validate_render()?;
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if self.server.body_limit == 0 {
            return Err(ConfigError::Validation(
                "server.body_limit must be greater than 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate render configuration.
    fn validate_render(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.render.default_title, "render.default_title")?;

        self.render
            .page_layout()
            .validate()
            .map_err(|e| ConfigError::Validation(format!("render.margin: {e}")))
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.render.default_title =
            expand::expand_env(&self.render.default_title, "render.default_title")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.body_limit, 10 * 1024 * 1024);
        assert_eq!(config.render.page_size, PageSize::A4);
        assert_eq!(config.render.margin, 15.0);
        assert_eq!(config.render.page_break, PageBreak::Cursor);
        assert_eq!(config.render.default_title, "documento");
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 9000
body_limit = 1048576
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.body_limit, 1_048_576);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
page_size = "letter"
margin = 20.0
page_break = "measured"
default_title = "report"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.page_size, PageSize::Letter);
        assert_eq!(config.render.margin, 20.0);
        assert_eq!(config.render.page_break, PageBreak::Measured);
        assert_eq!(config.render.default_title, "report");
    }

    #[test]
    fn test_parse_unknown_page_size_fails() {
        let toml = r#"
[render]
page_size = "tabloid"
"#;
        assert!(toml::from_str::<Config>(toml).is_err());
    }

    #[test]
    fn test_page_layout_from_render_config() {
        let render = RenderConfig {
            page_size: PageSize::Letter,
            margin: 20.0,
            page_break: PageBreak::Measured,
            default_title: "x".to_owned(),
        };
        let layout = render.page_layout();
        assert_eq!(layout.width, 215.9);
        assert_eq!(layout.height, 279.4);
        assert_eq!(layout.margin, 20.0);
        assert_eq!(layout.page_break, PageBreak::Measured);
    }

    #[test]
    fn test_apply_cli_settings_port() {
        let mut config = Config::default();
        let overrides = CliSettings {
            port: Some(8080),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_host() {
        let mut config = Config::default();
        let overrides = CliSettings {
            host: Some("127.0.0.1".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_expand_env_vars_server_host() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDPDF_CONFIG_TEST_HOST", "127.0.0.1");
        }

        let toml = r#"
[server]
host = "${MDPDF_CONFIG_TEST_HOST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.server.host, "127.0.0.1");

        unsafe {
            std::env::remove_var("MDPDF_CONFIG_TEST_HOST");
        }
    }

    #[test]
    fn test_expand_env_vars_default_title_fallback() {
        let toml = r#"
[render]
default_title = "${MDPDF_CONFIG_TEST_UNSET_TITLE:-relatorio}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.render.default_title, "relatorio");
    }

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_server_host_empty() {
        let mut config = Config::default();
        config.server.host = String::new();
        assert_validation_error(&config, &["server.host", "empty"]);
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert_validation_error(&config, &["server.port"]);
    }

    #[test]
    fn test_validate_body_limit_zero() {
        let mut config = Config::default();
        config.server.body_limit = 0;
        assert_validation_error(&config, &["server.body_limit"]);
    }

    #[test]
    fn test_validate_margin_too_large() {
        let mut config = Config::default();
        config.render.margin = 150.0;
        assert_validation_error(&config, &["render.margin"]);
    }

    #[test]
    fn test_validate_default_title_empty() {
        let mut config = Config::default();
        config.render.default_title = String::new();
        assert_validation_error(&config, &["render.default_title", "empty"]);
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[server]\nport = 4000\n\n[render]\nmargin = 20.0\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 4000);
        assert_eq!(config.render.margin, 20.0);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings_last() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdpdf.toml");
        std::fs::write(&path, "[server]\nport = 4000\n").unwrap();
        let settings = CliSettings {
            port: Some(5000),
            ..Default::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/mdpdf.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdpdf.toml");
        std::fs::write(&path, "[server]\nport = 0\n").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_rejects_port_zero_from_cli() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdpdf.toml");
        std::fs::write(&path, "").unwrap();
        let settings = CliSettings {
            port: Some(0),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }
}
