//! `texdraft update` command implementation.

use std::path::PathBuf;

use clap::Args;
use texdraft_render::{SENTINEL, placeholders};

use super::CommonArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the update command.
#[derive(Args)]
pub(crate) struct UpdateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output file (default: rewrite the template in place).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl UpdateArgs {
    /// Execute the update command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let out = Output::new();
        let config = self.common.load_config()?;
        let context = self.common.load_context(&config)?;
        let renderer = self.common.build_renderer(&config)?;

        out.info(&format!("Updating {}...", self.common.template.display()));
        let template = self.common.read_template()?;
        let frozen = placeholders(&template)
            .iter()
            .filter(|placeholder| placeholder.is_frozen())
            .count();
        let rendered = renderer.update(&template, &context)?;

        if rendered.contains(SENTINEL) {
            out.warning(&format!(
                "Some frozen values failed to evaluate and were written as \"{SENTINEL}\""
            ));
        }

        let target = self.output.as_deref().unwrap_or(&self.common.template);
        std::fs::write(target, &rendered)?;
        out.success(&format!(
            "Updated {frozen} frozen placeholder(s) in {}",
            target.display()
        ));
        Ok(())
    }
}
