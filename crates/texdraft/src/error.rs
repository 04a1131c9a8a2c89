//! CLI error types.

use texdraft_config::ConfigError;
use texdraft_render::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("failed to parse data context: {0}")]
    Data(#[from] serde_yaml::Error),
}
