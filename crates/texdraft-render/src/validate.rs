//! Validation: recompute frozen values and fail on divergence.

use std::collections::HashMap;

use crate::context::DataContext;
use crate::error::RenderError;
use crate::extract;
use crate::renderer::Renderer;

impl Renderer {
    /// Check that every frozen placeholder's embedded value still matches
    /// the freshly computed one.
    ///
    /// Aborts on the first divergence with the offending key, embedded
    /// value and computed value. Performs no writes; placeholders without
    /// an embedded value are skipped.
    pub fn validate(&self, template: &str, context: &DataContext) -> Result<(), RenderError> {
        let computer = self.computer(context);
        let mut computed: HashMap<String, String> = HashMap::new();
        let mut checked = 0usize;

        for placeholder in extract::placeholders(template) {
            let Some(old) = placeholder.frozen_value() else {
                continue;
            };
            let expression = placeholder.expression();
            let new = match computed.get(expression) {
                Some(value) => value.clone(),
                None => {
                    let value = computer.compute(expression)?;
                    computed.insert(expression.to_owned(), value.clone());
                    value
                }
            };
            if new != old {
                return Err(RenderError::Validation {
                    key: expression.to_owned(),
                    old: old.to_owned(),
                    new,
                });
            }
            checked += 1;
        }

        tracing::debug!(frozen = checked, "all frozen values match");
        Ok(())
    }
}
