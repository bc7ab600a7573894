//! Source scanning and string extraction.
//!
//! Two scanning passes feed the catalog: PHP (with optional block template
//! extraction for themes) and JavaScript. Both share the walker in
//! [`scanner`] and the call lexer in [`lexer`].

mod js;
mod lexer;
mod php;
mod scanner;
mod templates;

pub use js::scan_js;
pub use php::scan_php;

/// Options controlling a single scan pass.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Path fragments to scan exclusively; empty means the whole tree.
    pub include: Vec<String>,
    /// Path fragments to skip, unless selected by `include`.
    pub exclude: Vec<String>,
    /// File extensions handled by this pass.
    pub extensions: Vec<String>,
    /// Also extract translatable strings from `*.html` block templates.
    pub extract_templates: bool,
    /// Only keep calls whose text domain argument matches; `None` disables
    /// domain filtering entirely.
    pub domain: Option<String>,
}
