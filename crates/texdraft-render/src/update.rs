//! Update rendering: refresh embedded frozen values in place.

use std::collections::HashMap;
use std::fmt::Write;

use crate::context::DataContext;
use crate::error::RenderError;
use crate::extract;
use crate::renderer::Renderer;

impl Renderer {
    /// Rewrite every frozen placeholder in `template` to carry its freshly
    /// computed value: `\VAR{expr==old}` becomes `\VAR{expr == new}`.
    ///
    /// Edits are span-addressed, so repeated identical frozen expressions
    /// are each updated in place regardless of surrounding context.
    /// Non-frozen placeholders and `\PREPROC{...}` directives pass through
    /// untouched; the caller is responsible for persisting the result.
    pub fn update(&self, template: &str, context: &DataContext) -> Result<String, RenderError> {
        let computer = self.computer(context);
        let mut computed: HashMap<String, String> = HashMap::new();

        let mut output = String::with_capacity(template.len());
        let mut last = 0;
        for placeholder in extract::placeholders(template) {
            if placeholder.frozen_value().is_none() {
                continue;
            }
            let expression = placeholder.expression();
            let value = match computed.get(expression) {
                Some(value) => value.clone(),
                None => {
                    let value = computer.compute(expression)?;
                    computed.insert(expression.to_owned(), value.clone());
                    value
                }
            };
            output.push_str(&template[last..placeholder.start]);
            let _ = write!(output, "\\VAR{{{expression} == {value}}}");
            last = placeholder.end;
        }
        output.push_str(&template[last..]);
        Ok(output)
    }
}
