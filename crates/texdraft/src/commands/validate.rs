//! `texdraft validate` command implementation.

use clap::Args;
use texdraft_render::placeholders;

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the validate command.
#[derive(Args)]
pub(crate) struct ValidateArgs {
    #[command(flatten)]
    common: CommonArgs,
}

impl ValidateArgs {
    /// Execute the validate command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let out = Output::new();
        let config = self.common.load_config()?;
        let context = self.common.load_context(&config)?;
        let renderer = self.common.build_renderer(&config)?;

        let template = self.common.read_template()?;
        let frozen = placeholders(&template)
            .iter()
            .filter(|placeholder| placeholder.frozen_value().is_some())
            .count();

        renderer.validate(&template, &context)?;
        out.success(&format!("All {frozen} frozen value(s) match."));
        Ok(())
    }
}
