//! LaTeX-flavored template engine.
//!
//! Wraps a [`minijinja::Environment`] configured so template markup reads as
//! LaTeX macros instead of Jinja braces: `\VAR{...}` for substitutions,
//! `\BLOCK{...}` for control flow and `\#{...}` for comments. Undefined
//! names are strict errors and HTML auto-escaping is disabled (the output
//! is LaTeX, not HTML).
//!
//! The engine is immutable after construction: filters and helper
//! functions are registered once in [`LatexEngine::new`] and every render
//! call receives its data context explicitly.

use minijinja::syntax::SyntaxConfig;
use minijinja::value::Value;
use minijinja::{Environment, Error, ErrorKind, UndefinedBehavior};

use crate::filters;

/// Opening delimiter for value substitutions.
pub const VARIABLE_START: &str = r"\VAR{";
/// Opening delimiter for control-flow blocks.
pub const BLOCK_START: &str = r"\BLOCK{";
/// Opening delimiter for comments.
pub const COMMENT_START: &str = r"\#{";
/// Shared closing delimiter.
pub const DELIMITER_END: &str = "}";

/// Template engine with LaTeX-friendly delimiters.
pub struct LatexEngine {
    env: Environment<'static>,
}

impl LatexEngine {
    /// Build the engine: custom delimiters, strict undefined names, the
    /// typesetting filters and the `raise` helper.
    pub fn new() -> Result<Self, Error> {
        let syntax = SyntaxConfig::builder()
            .block_delimiters(BLOCK_START, DELIMITER_END)
            .variable_delimiters(VARIABLE_START, DELIMITER_END)
            .comment_delimiters(COMMENT_START, DELIMITER_END)
            .build()?;

        let mut env = Environment::new();
        env.set_syntax(syntax);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| minijinja::AutoEscape::None);
        env.add_filter("latex_exp", filters::latex_exp);
        env.add_filter("latex_g", filters::latex_g);
        env.add_function("raise", raise);
        Ok(Self { env })
    }

    /// Render a whole template against `context`.
    pub fn render_template(&self, source: &str, context: &Value) -> Result<String, Error> {
        self.env.render_str(source, context.clone())
    }

    /// Evaluate a single placeholder expression and return its rendered
    /// string value.
    ///
    /// The expression is wrapped in `\VAR{...}` and rendered, so filters
    /// apply and the result is exactly what the expression would produce
    /// inside a document.
    pub fn eval_expression(&self, expression: &str, context: &Value) -> Result<String, Error> {
        let source = format!("{VARIABLE_START}{expression}{DELIMITER_END}");
        self.env.render_str(&source, context.clone())
    }
}

impl std::fmt::Debug for LatexEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LatexEngine").finish_non_exhaustive()
    }
}

/// Abort rendering with the given message.
///
/// Callable from templates as `\VAR{ raise("message") }` to fail a draft
/// deliberately, e.g. behind a `\BLOCK{ if }` guard on inconsistent data.
fn raise(message: String) -> Result<Value, Error> {
    Err(Error::new(ErrorKind::InvalidOperation, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context(pairs: &[(&str, f64)]) -> Value {
        let map: std::collections::BTreeMap<&str, f64> = pairs.iter().copied().collect();
        Value::from_serialize(map)
    }

    #[test]
    fn renders_var_substitution() {
        let engine = LatexEngine::new().unwrap();
        let out = engine
            .render_template(r"mass is \VAR{m} kg", &context(&[("m", 3.5)]))
            .unwrap();
        assert_eq!(out, "mass is 3.5 kg");
    }

    #[test]
    fn renders_block_control_flow() {
        let engine = LatexEngine::new().unwrap();
        let out = engine
            .render_template(
                r"\BLOCK{ if m > 1 }heavy\BLOCK{ else }light\BLOCK{ endif }",
                &context(&[("m", 3.5)]),
            )
            .unwrap();
        assert_eq!(out, "heavy");
    }

    #[test]
    fn strips_comments() {
        let engine = LatexEngine::new().unwrap();
        let out = engine
            .render_template(r"a\#{ internal note }b", &context(&[]))
            .unwrap();
        assert_eq!(out, "ab");
    }

    #[test]
    fn undefined_name_is_an_error() {
        let engine = LatexEngine::new().unwrap();
        let err = engine
            .render_template(r"\VAR{missing}", &context(&[]))
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn raise_aborts_with_message() {
        let engine = LatexEngine::new().unwrap();
        let err = engine
            .render_template(r#"\VAR{ raise("problem") }"#, &context(&[]))
            .unwrap_err();
        assert!(err.to_string().contains("problem"));
    }

    #[test]
    fn eval_expression_applies_filters() {
        let engine = LatexEngine::new().unwrap();
        let out = engine
            .eval_expression("flux|latex_exp", &context(&[("flux", 1.4123e-4)]))
            .unwrap();
        assert_eq!(out, "1.4$\\times$10$^{-4}$");
    }
}
