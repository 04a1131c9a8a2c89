//! Template pre-processing via `\PREPROC{...}` rule files.
//!
//! A template may declare any number of `\PREPROC{path}` directives. Each
//! referenced file is a YAML mapping of regex pattern to replacement,
//! applied in file order as global substitutions over the whole template;
//! each rule sees the output of the previous one. Every match is recorded
//! as a [`TraceEntry`] so the definitions renderer can tell which computed
//! values correspond to rewritten placeholder names.
//!
//! The directives themselves are stripped from the result. A missing or
//! malformed rule file is a fatal configuration error.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::RenderError;

static PREPROC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\PREPROC\{(.*?)\}").expect("invalid directive regex"));

/// A single rewrite rule: a regex pattern and its replacement template.
///
/// The replacement may reference capture groups (`$1`, `$name`).
#[derive(Debug)]
pub struct RewriteRule {
    pub pattern: Regex,
    pub replacement: String,
}

/// One applied rewrite: the matched text and what replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEntry {
    pub original: String,
    pub rewritten: String,
}

/// A template after pre-processing: the rewritten text plus the ordered
/// trace of applied rewrites.
#[derive(Debug)]
pub struct Preprocessed {
    pub text: String,
    pub trace: Vec<TraceEntry>,
}

/// Load an ordered rule file.
///
/// The file must be a YAML mapping; entry order is preserved.
pub fn load_rules(path: &Path) -> Result<Vec<RewriteRule>, RenderError> {
    let raw = fs::read_to_string(path).map_err(|source| RenderError::RuleFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mapping: serde_yaml::Mapping =
        serde_yaml::from_str(&raw).map_err(|source| RenderError::RuleParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rules = Vec::with_capacity(mapping.len());
    for (key, value) in &mapping {
        let (Some(pattern), Some(replacement)) = (key.as_str(), value.as_str()) else {
            return Err(RenderError::RuleFormat {
                path: path.to_path_buf(),
                detail: "entries must map a pattern string to a replacement string".to_owned(),
            });
        };
        let pattern = Regex::new(pattern).map_err(|source| RenderError::RulePattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        rules.push(RewriteRule {
            pattern,
            replacement: replacement.to_owned(),
        });
    }
    Ok(rules)
}

/// Run the pre-processor over `template`.
///
/// Rule file paths are resolved relative to `rule_dir`. Directives are
/// processed in source order; after all rules have been applied, every
/// `\PREPROC{...}` occurrence is removed.
pub fn preprocess(template: &str, rule_dir: &Path) -> Result<Preprocessed, RenderError> {
    let mut text = template.to_owned();
    let mut trace = Vec::new();

    for caps in PREPROC_PATTERN.captures_iter(template) {
        let path = rule_dir.join(&caps[1]);
        let rules = load_rules(&path)?;
        tracing::debug!(file = %path.display(), rules = rules.len(), "applying rewrite rules");
        for rule in &rules {
            text = apply_rule(&text, rule, &mut trace);
        }
    }

    text = PREPROC_PATTERN.replace_all(&text, "").into_owned();
    Ok(Preprocessed { text, trace })
}

/// Apply one rule globally, recording a trace entry per match.
fn apply_rule(text: &str, rule: &RewriteRule, trace: &mut Vec<TraceEntry>) -> String {
    rule.pattern
        .replace_all(text, |caps: &Captures<'_>| {
            let mut rewritten = String::new();
            caps.expand(&rule.replacement, &mut rewritten);
            trace.push(TraceEntry {
                original: caps[0].to_owned(),
                rewritten: rewritten.clone(),
            });
            rewritten
        })
        .into_owned()
}
