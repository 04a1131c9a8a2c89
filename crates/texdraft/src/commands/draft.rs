//! `texdraft draft` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommonArgs, write_artifact};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the draft command.
#[derive(Args)]
pub(crate) struct DraftArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not prepend the generated header comment.
    #[arg(long)]
    no_header: bool,
}

impl DraftArgs {
    /// Execute the draft command.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let out = Output::new();
        let mut config = self.common.load_config()?;
        if self.no_header {
            config.render.header = false;
        }
        let context = self.common.load_context(&config)?;
        let renderer = self.common.build_renderer(&config)?;

        out.info(&format!("Rendering {}...", self.common.template.display()));
        let template = self.common.read_template()?;
        let rendered = renderer.draft(&template, &context)?;

        write_artifact(&out, self.output.as_deref(), &rendered)?;
        if let Some(path) = &self.output {
            out.success(&format!("Draft written to {}", path.display()));
        }
        Ok(())
    }
}
