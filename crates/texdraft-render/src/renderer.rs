//! Render pipeline entry point.

use std::path::PathBuf;

use crate::compute::{ErrorMode, ValueComputer};
use crate::context::DataContext;
use crate::engine::LatexEngine;
use crate::error::RenderError;
use crate::preproc::{self, Preprocessed};

/// Comment block prepended to generated artifacts.
pub(crate) const GENERATED_HEADER: &str = "\n\
%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%\n\
%%% generated by texdraft, please do not edit directly\n\
%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%%\n";

/// Renders LaTeX templates against a [`DataContext`].
///
/// One renderer holds one configured [`LatexEngine`] and is immutable
/// after construction; every operation takes the template text and the
/// context by reference and returns a new string.
///
/// # Example
///
/// ```
/// use texdraft_render::{DataContext, Renderer};
///
/// let renderer = Renderer::new()?.with_header(false);
/// let context = DataContext::from_serialize(serde_json::json!({"mass": 42}));
/// let draft = renderer.draft(r"mass is \VAR{mass}", &context)?;
/// assert_eq!(draft, "mass is 42");
/// # Ok::<(), texdraft_render::RenderError>(())
/// ```
#[derive(Debug)]
pub struct Renderer {
    engine: LatexEngine,
    mode: ErrorMode,
    write_header: bool,
    rule_dir: PathBuf,
}

impl Renderer {
    /// Create a renderer with default settings: best-effort error mode,
    /// generated header enabled, rule files resolved against the current
    /// directory.
    pub fn new() -> Result<Self, RenderError> {
        Ok(Self {
            engine: LatexEngine::new()?,
            mode: ErrorMode::default(),
            write_header: true,
            rule_dir: PathBuf::from("."),
        })
    }

    /// Select how placeholder evaluation failures are handled.
    #[must_use]
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable or disable the generated header on draft output.
    #[must_use]
    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }

    /// Directory against which `\PREPROC{...}` paths are resolved.
    #[must_use]
    pub fn with_rule_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.rule_dir = dir.into();
        self
    }

    /// The configured template engine.
    #[must_use]
    pub fn engine(&self) -> &LatexEngine {
        &self.engine
    }

    pub(crate) fn write_header(&self) -> bool {
        self.write_header
    }

    pub(crate) fn preprocess(&self, template: &str) -> Result<Preprocessed, RenderError> {
        preproc::preprocess(template, &self.rule_dir)
    }

    pub(crate) fn computer(&self, context: &DataContext) -> ValueComputer<'_> {
        ValueComputer::new(&self.engine, context.to_value(), self.mode)
    }
}
