//! Definitions rendering: a standalone document binding each placeholder
//! key to its computed value.

use std::fmt::Write;

use crate::context::DataContext;
use crate::error::RenderError;
use crate::extract;
use crate::preproc::TraceEntry;
use crate::renderer::{GENERATED_HEADER, Renderer};

/// LaTeX macros defining the `\addVAR` binding table and the `\VAR`
/// lookup used by documents that include the generated definitions.
const BOILERPLATE: &str = r"
% boilerplate

\def\addVAR#1#2{\expandafter\gdef\csname my@data@\detokenize{#1}\endcsname{#2}}
\def\VAR#1{%
  \ifcsname my@data@\detokenize{#1}\endcsname
    \csname my@data@\detokenize{#1}\expandafter\endcsname
  \else
    \expandafter\ERROR
  \fi
}

% extracted definitions

";

impl Renderer {
    /// Render the definitions document for `template`.
    ///
    /// The template is pre-processed, every unique placeholder key is
    /// computed once, and one `\addVAR{name}{value}` binding is emitted
    /// per key. Keys matching a pre-processor trace entry are bound under
    /// the rewritten name.
    pub fn definitions(
        &self,
        template: &str,
        context: &DataContext,
    ) -> Result<String, RenderError> {
        let pre = self.preprocess(template)?;
        let keys = extract::referenced_keys(&pre.text);
        let computer = self.computer(context);

        let mut output = String::from(GENERATED_HEADER);
        output.push_str(BOILERPLATE);
        for key in &keys {
            let (expression, _) = extract::split_frozen(key);
            let value = computer.compute(expression)?;
            let name = resolve_name(key, &pre.trace);
            let _ = writeln!(output, "\\addVAR{{{name}}}{{{value}}}");
        }
        Ok(output)
    }
}

/// Bind under the rewritten name when the key matches a trace entry's
/// original text, otherwise under the literal key.
fn resolve_name<'a>(key: &'a str, trace: &'a [TraceEntry]) -> &'a str {
    trace
        .iter()
        .find(|entry| entry.original == key)
        .map_or(key, |entry| entry.rewritten.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::SENTINEL;
    use pretty_assertions::assert_eq;

    fn renderer() -> Renderer {
        Renderer::new().unwrap()
    }

    #[test]
    fn binds_every_extracted_key_exactly_once() {
        let template = r"\VAR{a} \VAR{b} \VAR{a}";
        let context = DataContext::from_serialize(serde_json::json!({"a": 1, "b": 2}));
        let output = renderer().definitions(template, &context).unwrap();
        assert_eq!(output.matches("\\addVAR{a}{1}").count(), 1);
        assert_eq!(output.matches("\\addVAR{b}{2}").count(), 1);
        assert_eq!(output.matches("\\addVAR").count(), 3); // 2 bindings + macro definition
    }

    #[test]
    fn contains_header_and_boilerplate() {
        let context = DataContext::from_serialize(serde_json::json!({"a": 1}));
        let output = renderer().definitions(r"\VAR{a}", &context).unwrap();
        assert!(output.contains("generated by texdraft"));
        assert!(output.contains(r"\def\addVAR#1#2"));
    }

    #[test]
    fn failed_key_is_bound_to_sentinel() {
        let context = DataContext::from_serialize(serde_json::json!({"a": 1}));
        let output = renderer()
            .definitions(r"\VAR{a} \VAR{nope}", &context)
            .unwrap();
        assert!(output.contains("\\addVAR{a}{1}"));
        assert!(output.contains(&format!("\\addVAR{{nope}}{{{SENTINEL}}}")));
    }

    #[test]
    fn frozen_key_binds_full_key_with_computed_value() {
        let context = DataContext::from_serialize(serde_json::json!({"mass": 3.5}));
        let output = renderer().definitions(r"\VAR{mass==9}", &context).unwrap();
        // The expression part is evaluated; the document looks the binding
        // up under the full key text.
        assert!(output.contains("\\addVAR{mass==9}{3.5}"));
    }

    #[test]
    fn resolve_name_prefers_trace_rewrites() {
        let trace = vec![TraceEntry {
            original: "flux_a".to_owned(),
            rewritten: "flux[a]".to_owned(),
        }];
        assert_eq!(resolve_name("flux_a", &trace), "flux[a]");
        assert_eq!(resolve_name("other", &trace), "other");
    }
}
