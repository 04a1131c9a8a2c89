//! Configuration management for texdraft.
//!
//! Parses `texdraft.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! Path values (`paths.data_file`, `paths.rule_dir`) support `~` and
//! `${VAR}` expansion and are resolved relative to the config file's
//! directory.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "texdraft.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the data context file.
    pub data_file: Option<PathBuf>,
    /// Override the rule file directory.
    pub rule_dir: Option<PathBuf>,
    /// Override the generated-header flag.
    pub header: Option<bool>,
    /// Override strict error handling.
    pub strict: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rendering behavior.
    pub render: RenderConfig,
    /// Path configuration (relative strings from TOML).
    paths: PathsRaw,

    /// Resolved path configuration (set after loading).
    #[serde(skip)]
    pub paths_resolved: PathsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Rendering behavior configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Prepend the generated header to draft output.
    pub header: bool,
    /// Abort on the first placeholder that fails to evaluate instead of
    /// substituting the sentinel value.
    pub strict: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            header: true,
            strict: false,
        }
    }
}

/// Raw path configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct PathsRaw {
    data_file: Option<String>,
    rule_dir: Option<String>,
}

/// Resolved path configuration.
#[derive(Debug, Default)]
pub struct PathsConfig {
    /// Default data context file, if configured.
    pub data_file: Option<PathBuf>,
    /// Directory against which `\PREPROC{...}` paths are resolved.
    pub rule_dir: PathBuf,
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`paths.data_file`").
        field: String,
        /// Error message (e.g., "${`DATA_DIR`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `texdraft.toml` in the current directory
    /// and parents, falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading and path resolution, allowing
    /// CLI arguments to take precedence over config file values.
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
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
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

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            render: RenderConfig::default(),
            paths: PathsRaw::default(),
            paths_resolved: PathsConfig {
                data_file: None,
                rule_dir: base.to_path_buf(),
            },
            config_path: None,
        }
    }

    /// Expand and resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let data_file = self
            .paths
            .data_file
            .as_deref()
            .map(|raw| expand(raw, "paths.data_file"))
            .transpose()?
            .map(|expanded| config_dir.join(expanded));
        let rule_dir = self
            .paths
            .rule_dir
            .as_deref()
            .map(|raw| expand(raw, "paths.rule_dir"))
            .transpose()?
            .map_or_else(|| config_dir.to_path_buf(), |dir| config_dir.join(dir));

        self.paths_resolved = PathsConfig {
            data_file,
            rule_dir,
        };
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(data_file) = &settings.data_file {
            self.paths_resolved.data_file = Some(data_file.clone());
        }
        if let Some(rule_dir) = &settings.rule_dir {
            self.paths_resolved.rule_dir.clone_from(rule_dir);
        }
        if let Some(header) = settings.header {
            self.render.header = header;
        }
        if let Some(strict) = settings.strict {
            self.render.strict = strict;
        }
    }
}

/// Expand `~` and `${VAR}` references in a path string.
fn expand(value: &str, field: &str) -> Result<String, ConfigError> {
    shellexpand::full(value)
        .map(|expanded| expanded.into_owned())
        .map_err(|err| ConfigError::EnvVar {
            field: field.to_owned(),
            message: err.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{contents}").unwrap();
        path
    }

    #[test]
    fn defaults_without_config_file() {
        let config = Config::default();
        assert!(config.render.header);
        assert!(!config.render.strict);
        assert!(config.paths_resolved.data_file.is_none());
        assert_eq!(config.paths_resolved.rule_dir, PathBuf::from("."));
    }

    #[test]
    fn loads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[render]\nheader = false\nstrict = true\n\n[paths]\ndata_file = \"data.yaml\"\n",
        );
        let config = Config::load(Some(&path), None).unwrap();
        assert!(!config.render.header);
        assert!(config.render.strict);
        assert_eq!(
            config.paths_resolved.data_file,
            Some(dir.path().join("data.yaml"))
        );
        assert_eq!(config.paths_resolved.rule_dir, dir.path());
    }

    #[test]
    fn rule_dir_resolves_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[paths]\nrule_dir = \"rules\"\n");
        let config = Config::load(Some(&path), None).unwrap();
        assert_eq!(config.paths_resolved.rule_dir, dir.path().join("rules"));
    }

    #[test]
    fn cli_settings_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[render]\nheader = true\n");
        let settings = CliSettings {
            header: Some(false),
            strict: Some(true),
            data_file: Some(PathBuf::from("override.yaml")),
            rule_dir: None,
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();
        assert!(!config.render.header);
        assert!(config.render.strict);
        assert_eq!(
            config.paths_resolved.data_file,
            Some(PathBuf::from("override.yaml"))
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/nonexistent/texdraft.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "render = not toml\n");
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unset_variable_in_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            "[paths]\ndata_file = \"${TEXDRAFT_SURELY_UNSET}/data.yaml\"\n",
        );
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
    }
}
