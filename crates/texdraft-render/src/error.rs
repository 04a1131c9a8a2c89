//! Render pipeline error types.

use std::path::PathBuf;

/// Errors raised by the rendering pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Whole-document template evaluation failed (syntax error, undefined
    /// variable outside a per-placeholder context, or a `raise` call).
    #[error("template rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    /// A single placeholder failed to evaluate in strict mode.
    #[error("unable to render placeholder `{key}`: {source}")]
    Placeholder {
        key: String,
        source: minijinja::Error,
    },

    /// A `\PREPROC{...}` rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    RuleFile {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A rule file was not a valid YAML mapping.
    #[error("failed to parse rule file {path}: {source}")]
    RuleParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// A rule file entry was not a string-to-string pair.
    #[error("malformed rule file {path}: {detail}")]
    RuleFormat { path: PathBuf, detail: String },

    /// A rule pattern was not a valid regular expression.
    #[error("invalid rule pattern `{pattern}`: {source}")]
    RulePattern {
        pattern: String,
        source: regex::Error,
    },

    /// A frozen placeholder's embedded value no longer matches the
    /// freshly computed one.
    #[error("frozen value for `{key}` is stale: expected `{old}`, computed `{new}`")]
    Validation {
        key: String,
        old: String,
        new: String,
    },
}
