//! LaTeX draft rendering pipeline with frozen-value tracking.
//!
//! Templates use a LaTeX-flavored placeholder syntax: `\VAR{expression}`
//! substitutes a computed value, `\VAR{expression==value}` additionally
//! freezes the previously computed value inside the document, and
//! `\PREPROC{path}` declares a regex rewrite rule file applied before
//! extraction.
//!
//! Four operations share the extraction / pre-processing / computation
//! pipeline and differ in what they emit:
//!
//! - [`Renderer::definitions`]: a standalone `\addVAR{key}{value}`
//!   bindings document.
//! - [`Renderer::draft`]: the rendered document text.
//! - [`Renderer::update`]: the template with refreshed frozen values.
//! - [`Renderer::validate`]: an error if any frozen value went stale.
//!
//! # Example
//!
//! ```
//! use texdraft_render::{DataContext, Renderer};
//!
//! let renderer = Renderer::new()?.with_header(false);
//! let context = DataContext::from_serialize(serde_json::json!({"mass": 3.5}));
//!
//! let draft = renderer.draft(r"mass is \VAR{mass==3.5} kg", &context)?;
//! assert_eq!(draft, "mass is 3.5 kg");
//!
//! renderer.validate(r"\VAR{mass==3.5}", &context)?;
//! # Ok::<(), texdraft_render::RenderError>(())
//! ```

mod compute;
mod context;
mod definitions;
mod draft;
mod engine;
mod error;
mod extract;
mod filters;
mod preproc;
mod renderer;
mod update;
mod validate;

pub use compute::{ErrorMode, SENTINEL};
pub use context::{DataContext, Namespace};
pub use engine::LatexEngine;
pub use error::RenderError;
pub use extract::{Placeholder, placeholders, referenced_keys, split_frozen};
pub use preproc::{Preprocessed, RewriteRule, TraceEntry, load_rules, preprocess};
pub use renderer::Renderer;
