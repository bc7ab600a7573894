//! Extraction of `@wordpress/i18n` calls from JavaScript source files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use super::lexer::{self, Syntax};
use super::php::{FnSpec, entry_from_call};
use super::{ScanOptions, scanner};
use crate::catalog::Catalog;

const JS_SYNTAX: Syntax = Syntax {
    line_comments: &["//"],
    block_comment: Some(("/*", "*/")),
    quotes: b"'\"`",
    member_calls: true,
};

const JS_FUNCTIONS: &[FnSpec] = &[
    FnSpec { name: "__", text: 0, plural: None, context: None, domain: 1 },
    FnSpec { name: "_x", text: 0, plural: None, context: Some(1), domain: 2 },
    FnSpec { name: "_n", text: 0, plural: Some(1), context: None, domain: 3 },
    FnSpec { name: "_nx", text: 0, plural: Some(1), context: Some(3), domain: 4 },
];

/// Scan JavaScript files under `source`, appending extracted entries.
pub fn scan_js(source: &Path, catalog: &mut Catalog, options: &ScanOptions) -> Result<()> {
    let names: Vec<&str> = JS_FUNCTIONS.iter().map(|s| s.name).collect();
    let files =
        scanner::collect_files(source, &options.include, &options.exclude, &options.extensions)?;
    for file in files {
        let bytes = fs::read(&file)
            .with_context(|| format!("Could not read source file {}", file.display()))?;
        let content = String::from_utf8_lossy(&bytes);
        let rel = scanner::relative(source, &file);
        for call in lexer::find_calls(&content, &JS_SYNTAX, &names) {
            if let Some(entry) = entry_from_call(call, JS_FUNCTIONS, options.domain.as_deref(), &rel)
            {
                catalog.add_entry(entry);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn extracts_wordpress_i18n_calls() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("editor.js"),
            concat!(
                "import { __, _x, _n } from '@wordpress/i18n';\n",
                "const a = __( 'Save draft', 'demo' );\n",
                "const b = _x( 'Block', 'noun', 'demo' );\n",
                "const c = _n( '%d block', '%d blocks', count, 'demo' );\n",
                "const d = wp.i18n.__( 'Publish', 'demo' );\n",
            ),
        )
        .unwrap();

        let mut catalog = Catalog::new(Some("demo".to_string()));
        let options = ScanOptions {
            extensions: vec!["js".to_string()],
            domain: Some("demo".to_string()),
            ..Default::default()
        };
        scan_js(dir.path(), &mut catalog, &options).unwrap();

        let originals: Vec<_> = catalog.entries().map(|e| e.original.as_str()).collect();
        assert_eq!(originals, vec!["Save draft", "Block", "%d block", "Publish"]);
    }

    #[test]
    fn respects_extension_filter() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("main.php"), "<?php __( 'PHP only', 'demo' );").unwrap();
        fs::write(dir.path().join("app.js"), "__( 'JS only', 'demo' );").unwrap();

        let mut catalog = Catalog::new(None);
        let options = ScanOptions {
            extensions: vec!["js".to_string(), "jsx".to_string()],
            ..Default::default()
        };
        scan_js(dir.path(), &mut catalog, &options).unwrap();

        let originals: Vec<_> = catalog.entries().map(|e| e.original.as_str()).collect();
        assert_eq!(originals, vec!["JS only"]);
    }
}
