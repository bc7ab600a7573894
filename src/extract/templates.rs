//! Extraction of translatable strings from block template files.
//!
//! Block themes ship `*.html` templates whose blocks carry user-visible
//! attributes in a JSON blob inside the block delimiter comment:
//! `<!-- wp:search {"label":"Search","placeholder":"Search..."} /-->`.
//! A fixed set of attribute names is considered translatable.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use serde_json::Value;

use super::{ScanOptions, scanner};
use crate::catalog::{Catalog, CatalogEntry};

const TRANSLATABLE_ATTRIBUTES: &[&str] = &["label", "placeholder", "title", "description"];

static BLOCK_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<!--\s*wp:[\w/-]+\s+(\{.*?\})\s*/?-->").unwrap()
});

pub fn scan_templates(source: &Path, catalog: &mut Catalog, options: &ScanOptions) -> Result<()> {
    let extensions = vec!["html".to_string()];
    let files = scanner::collect_files(source, &options.include, &options.exclude, &extensions)?;
    for file in files {
        let content = fs::read_to_string(&file)
            .with_context(|| format!("Could not read template file {}", file.display()))?;
        let rel = scanner::relative(source, &file);
        for captures in BLOCK_DELIMITER.captures_iter(&content) {
            let json = &captures[1];
            let Ok(value) = serde_json::from_str::<Value>(json) else {
                continue;
            };
            let offset = captures.get(1).map_or(0, |m| m.start());
            let line = content[..offset].matches('\n').count() + 1;
            collect_attributes(&value, catalog, &rel, line);
        }
    }
    Ok(())
}

fn collect_attributes(value: &Value, catalog: &mut Catalog, file: &str, line: usize) {
    let Value::Object(map) = value else { return };
    for (name, attribute) in map {
        match attribute {
            Value::String(text)
                if TRANSLATABLE_ATTRIBUTES.contains(&name.as_str()) && !text.is_empty() =>
            {
                catalog.add_entry(CatalogEntry {
                    original: text.clone(),
                    comments: vec![format!("Block attribute \"{name}\"")],
                    references: vec![format!("{file}:{line}")],
                    ..Default::default()
                });
            }
            Value::Object(_) => collect_attributes(attribute, catalog, file, line),
            _ => {}
        }
    }
}
