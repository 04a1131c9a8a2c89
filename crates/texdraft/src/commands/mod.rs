//! CLI command implementations.

mod definitions;
mod draft;
mod update;
mod validate;

pub(crate) use definitions::DefinitionsArgs;
pub(crate) use draft::DraftArgs;
pub(crate) use update::UpdateArgs;
pub(crate) use validate::ValidateArgs;

use std::path::{Path, PathBuf};

use texdraft_config::{CliSettings, Config};
use texdraft_render::{DataContext, ErrorMode, Renderer};

use crate::error::CliError;
use crate::output::Output;

/// Flags shared by every render command.
#[derive(clap::Args)]
pub(crate) struct CommonArgs {
    /// Path to the template file.
    pub(crate) template: PathBuf,

    /// Path to the YAML data context file.
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Abort on the first placeholder that fails to evaluate.
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (default: auto-discover texdraft.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl CommonArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let settings = CliSettings {
            data_file: self.data.clone(),
            rule_dir: None,
            header: None,
            strict: self.strict.then_some(true),
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }

    /// Read the data context file, or return an empty context when none
    /// is configured.
    pub(crate) fn load_context(&self, config: &Config) -> Result<DataContext, CliError> {
        match config.paths_resolved.data_file.as_deref() {
            Some(path) => {
                let raw = std::fs::read_to_string(path)?;
                let data: serde_yaml::Value = serde_yaml::from_str(&raw)?;
                Ok(DataContext::from_serialize(data))
            }
            None => Ok(DataContext::new()),
        }
    }

    /// Build a renderer from the loaded configuration.
    ///
    /// Without a config file, `\PREPROC{...}` paths resolve relative to
    /// the template's directory.
    pub(crate) fn build_renderer(&self, config: &Config) -> Result<Renderer, CliError> {
        let mode = if config.render.strict {
            ErrorMode::Strict
        } else {
            ErrorMode::BestEffort
        };
        let rule_dir = if config.config_path.is_some() {
            config.paths_resolved.rule_dir.clone()
        } else {
            self.template
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
        };
        let renderer = Renderer::new()?
            .with_error_mode(mode)
            .with_header(config.render.header)
            .with_rule_dir(rule_dir);
        Ok(renderer)
    }

    /// Read the template source.
    pub(crate) fn read_template(&self) -> Result<String, CliError> {
        Ok(std::fs::read_to_string(&self.template)?)
    }
}

/// Write an artifact to `path`, or to stdout when no path is given.
pub(crate) fn write_artifact(
    output: &Output,
    path: Option<&Path>,
    text: &str,
) -> Result<(), CliError> {
    match path {
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
        None => {
            output.emit(text);
            Ok(())
        }
    }
}
