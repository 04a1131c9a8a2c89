//! Draft rendering: the full document with placeholders substituted.

use std::fmt::Write;

use crate::context::DataContext;
use crate::error::RenderError;
use crate::extract;
use crate::renderer::{GENERATED_HEADER, Renderer};

impl Renderer {
    /// Render `template` as a complete document.
    ///
    /// Frozen markers are stripped before evaluation, so `\VAR{expr==val}`
    /// evaluates as `\VAR{expr}`; the embedded value never participates in
    /// evaluation. Unlike per-placeholder computation, whole-document
    /// evaluation failures always propagate.
    pub fn draft(&self, template: &str, context: &DataContext) -> Result<String, RenderError> {
        for placeholder in extract::placeholders(template) {
            if let Some(value) = placeholder.frozen_value() {
                tracing::info!(key = placeholder.expression(), value, "frozen placeholder");
            }
        }

        let pre = self.preprocess(template)?;
        let cleaned = strip_frozen_markers(&pre.text);
        let rendered = self
            .engine()
            .render_template(&cleaned, &context.to_value())?;

        if self.write_header() {
            Ok(format!("{GENERATED_HEADER}{rendered}"))
        } else {
            Ok(rendered)
        }
    }
}

/// Rewrite every `\VAR{expr==value}` occurrence to `\VAR{expr}`.
fn strip_frozen_markers(template: &str) -> String {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;
    for placeholder in extract::placeholders(template) {
        if placeholder.is_frozen() {
            output.push_str(&template[last..placeholder.start]);
            let _ = write!(output, "\\VAR{{{}}}", placeholder.expression());
            last = placeholder.end;
        }
    }
    output.push_str(&template[last..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer {
        Renderer::new().unwrap().with_header(false)
    }

    #[test]
    fn renders_single_placeholder_exactly() {
        let context = DataContext::from_serialize(serde_json::json!({"test_var": 1}));
        let out = renderer().draft(r"\VAR{test_var}", &context).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn applies_filters() {
        let context = DataContext::from_serialize(serde_json::json!({"test_var": 1.4123e-4}));
        let out = renderer()
            .draft(r"\VAR{test_var|latex_exp}", &context)
            .unwrap();
        assert_eq!(out, "1.4$\\times$10$^{-4}$");
    }

    #[test]
    fn frozen_value_does_not_participate_in_evaluation() {
        let context = DataContext::from_serialize(serde_json::json!({"k": 7}));
        let out = renderer().draft(r"k is \VAR{k==5}", &context).unwrap();
        assert_eq!(out, "k is 7");
    }

    #[test]
    fn raise_propagates_as_hard_failure() {
        let context = DataContext::from_serialize(serde_json::json!({}));
        let err = renderer()
            .draft(r#"\VAR{ raise("problem") }"#, &context)
            .unwrap_err();
        assert!(err.to_string().contains("problem"));
    }

    #[test]
    fn undefined_name_propagates_even_in_best_effort_mode() {
        let context = DataContext::from_serialize(serde_json::json!({}));
        assert!(renderer().draft(r"\VAR{ghost}", &context).is_err());
    }

    #[test]
    fn block_loops_render_interleaved_text() {
        let context = DataContext::from_serialize(serde_json::json!({"items": [1, 2, 3]}));
        let out = renderer()
            .draft(
                r"\BLOCK{ for item in items }\VAR{item};\BLOCK{ endfor }",
                &context,
            )
            .unwrap();
        assert_eq!(out, "1;2;3;");
    }

    #[test]
    fn header_is_prepended_when_enabled() {
        let context = DataContext::from_serialize(serde_json::json!({"a": 1}));
        let out = Renderer::new()
            .unwrap()
            .draft(r"\VAR{a}", &context)
            .unwrap();
        assert!(out.starts_with('\n'));
        assert!(out.contains("generated by texdraft"));
        assert!(out.ends_with('1'));
    }

    #[test]
    fn strip_markers_leaves_plain_placeholders_alone() {
        let stripped = strip_frozen_markers(r"\VAR{a} \VAR{b==2} \VAR{c == 3}");
        assert_eq!(stripped, r"\VAR{a} \VAR{b} \VAR{c}");
    }
}
