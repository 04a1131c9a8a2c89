//! `texdraft definitions` command implementation.

use std::path::PathBuf;

use clap::Args;
use texdraft_render::SENTINEL;

use super::{CommonArgs, write_artifact};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the definitions command.
#[derive(Args)]
pub(crate) struct DefinitionsArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl DefinitionsArgs {
    /// Execute the definitions command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let out = Output::new();
        let config = self.common.load_config()?;
        let context = self.common.load_context(&config)?;
        let renderer = self.common.build_renderer(&config)?;

        let template = self.common.read_template()?;
        let rendered = renderer.definitions(&template, &context)?;

        if rendered.contains(SENTINEL) {
            out.warning(&format!(
                "Some placeholders failed to evaluate; grep the output for \"{SENTINEL}\""
            ));
        }

        write_artifact(&out, self.output.as_deref(), &rendered)?;
        if let Some(path) = &self.output {
            out.success(&format!("Definitions written to {}", path.display()));
        }
        Ok(())
    }
}
