//! Per-placeholder value computation.

use minijinja::value::Value;

use crate::engine::LatexEngine;
use crate::error::RenderError;

/// Fallback substituted for a placeholder whose expression fails to
/// evaluate in best-effort mode. Grep generated output for this marker to
/// find unresolved placeholders.
pub const SENTINEL: &str = "XXX";

/// How placeholder evaluation failures are surfaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Log the failure and substitute [`SENTINEL`]; rendering continues.
    #[default]
    BestEffort,
    /// Abort on the first placeholder that fails to evaluate.
    Strict,
}

/// Evaluates placeholder expressions against a fixed data context.
pub(crate) struct ValueComputer<'engine> {
    engine: &'engine LatexEngine,
    context: Value,
    mode: ErrorMode,
}

impl<'engine> ValueComputer<'engine> {
    pub(crate) fn new(engine: &'engine LatexEngine, context: Value, mode: ErrorMode) -> Self {
        Self {
            engine,
            context,
            mode,
        }
    }

    /// Compute the string value of one expression.
    ///
    /// In best-effort mode any evaluation failure (undefined name,
    /// provider error, filter error) degrades to [`SENTINEL`] so a single
    /// bad placeholder does not abort a whole-document render.
    pub(crate) fn compute(&self, expression: &str) -> Result<String, RenderError> {
        match self.engine.eval_expression(expression, &self.context) {
            Ok(value) => Ok(value),
            Err(source) => match self.mode {
                ErrorMode::BestEffort => {
                    tracing::warn!(key = expression, error = %source, "unable to render placeholder");
                    Ok(SENTINEL.to_owned())
                }
                ErrorMode::Strict => Err(RenderError::Placeholder {
                    key: expression.to_owned(),
                    source,
                }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::DataContext;
    use pretty_assertions::assert_eq;

    fn computer(engine: &LatexEngine, mode: ErrorMode) -> ValueComputer<'_> {
        let context = DataContext::from_serialize(serde_json::json!({"mass": 3.5}));
        ValueComputer::new(engine, context.to_value(), mode)
    }

    #[test]
    fn computes_defined_expression() {
        let engine = LatexEngine::new().unwrap();
        let value = computer(&engine, ErrorMode::BestEffort)
            .compute("mass")
            .unwrap();
        assert_eq!(value, "3.5");
    }

    #[test]
    fn best_effort_degrades_to_sentinel() {
        let engine = LatexEngine::new().unwrap();
        let value = computer(&engine, ErrorMode::BestEffort)
            .compute("missing")
            .unwrap();
        assert_eq!(value, SENTINEL);
    }

    #[test]
    fn strict_mode_propagates_failure() {
        let engine = LatexEngine::new().unwrap();
        let err = computer(&engine, ErrorMode::Strict)
            .compute("missing")
            .unwrap_err();
        assert!(matches!(err, RenderError::Placeholder { key, .. } if key == "missing"));
    }
}
