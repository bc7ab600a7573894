//! Extraction of WordPress i18n calls from PHP source files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::lexer::{self, Call, Syntax};
use super::{ScanOptions, scanner, templates};
use crate::catalog::{Catalog, CatalogEntry};

const PHP_SYNTAX: Syntax = Syntax {
    line_comments: &["//", "#"],
    block_comment: Some(("/*", "*/")),
    quotes: b"'\"",
    member_calls: false,
};

/// Argument layout of a translation function: positions of the text,
/// plural, context, and domain arguments.
pub(super) struct FnSpec {
    pub name: &'static str,
    pub text: usize,
    pub plural: Option<usize>,
    pub context: Option<usize>,
    pub domain: usize,
}

const fn spec(name: &'static str, text: usize, domain: usize) -> FnSpec {
    FnSpec {
        name,
        text,
        plural: None,
        context: None,
        domain,
    }
}

/// The WordPress translation API, one spec per function.
const PHP_FUNCTIONS: &[FnSpec] = &[
    spec("__", 0, 1),
    spec("_e", 0, 1),
    spec("esc_attr__", 0, 1),
    spec("esc_html__", 0, 1),
    spec("esc_attr_e", 0, 1),
    spec("esc_html_e", 0, 1),
    FnSpec { name: "_x", text: 0, plural: None, context: Some(1), domain: 2 },
    FnSpec { name: "_ex", text: 0, plural: None, context: Some(1), domain: 2 },
    FnSpec { name: "esc_attr_x", text: 0, plural: None, context: Some(1), domain: 2 },
    FnSpec { name: "esc_html_x", text: 0, plural: None, context: Some(1), domain: 2 },
    FnSpec { name: "_n", text: 0, plural: Some(1), context: None, domain: 3 },
    FnSpec { name: "_nx", text: 0, plural: Some(1), context: Some(3), domain: 4 },
    FnSpec { name: "_n_noop", text: 0, plural: Some(1), context: None, domain: 2 },
    FnSpec { name: "_nx_noop", text: 0, plural: Some(1), context: Some(2), domain: 3 },
];

/// Scan PHP files under `source`, appending extracted entries to `catalog`.
pub fn scan_php(source: &Path, catalog: &mut Catalog, options: &ScanOptions) -> Result<()> {
    let names: Vec<&str> = PHP_FUNCTIONS.iter().map(|s| s.name).collect();
    let files = scanner::collect_files(source, &options.include, &options.exclude, &options.extensions)?;
    for file in files {
        let bytes = fs::read(&file)
            .with_context(|| format!("Could not read source file {}", file.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        let rel = scanner::relative(source, &file);
        for call in lexer::find_calls(&content, &PHP_SYNTAX, &names) {
            if let Some(entry) = entry_from_call(call, PHP_FUNCTIONS, options.domain.as_deref(), &rel)
            {
                catalog.add_entry(entry);
            }
        }
    }
    if options.extract_templates {
        templates::scan_templates(source, catalog, options)?;
    }
    Ok(())
}

/// Turn a lexed call into a catalog entry, applying the domain filter.
/// Calls whose required arguments are not plain string literals are skipped.
pub(super) fn entry_from_call(
    call: Call,
    specs: &[FnSpec],
    domain: Option<&str>,
    file: &str,
) -> Option<CatalogEntry> {
    let spec = specs.iter().find(|s| s.name == call.name)?;

    let original = call.args.get(spec.text)?.clone()?;
    if original.is_empty() {
        return None;
    }
    let plural = match spec.plural {
        Some(position) => Some(call.args.get(position)?.clone()?),
        None => None,
    };
    let context = match spec.context {
        Some(position) => call.args.get(position)?.clone()?,
        None => String::new(),
    };
    if let Some(wanted) = domain {
        let found = call.args.get(spec.domain).cloned().flatten();
        if found.as_deref() != Some(wanted) {
            return None;
        }
    }

    Some(CatalogEntry {
        context,
        original,
        plural,
        comments: call.comment.into_iter().collect(),
        references: vec![format!("{file}:{}", call.line)],
    })
}
