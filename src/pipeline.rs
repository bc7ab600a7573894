//! The catalog assembly pipeline.
//!
//! Phases run strictly in order on a single owned catalog: merge with a
//! previous template, header/comment synthesis, synthetic entries for the
//! declared metadata fields, the PHP scan, the JS scan, the stale prune,
//! diagnostics, and finally the write.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::audit;
use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::extract::{self, ScanOptions};
use crate::headers;
use crate::metadata::ProjectMetadata;
use crate::pot;

/// Metadata fields that never become catalog entries.
const UNTRANSLATABLE_FIELDS: &[&str] = &["Version", "License", "Domain Path", "Text Domain"];

/// Outcome of a successful run.
#[derive(Debug)]
pub struct BuildSummary {
    pub destination: PathBuf,
    pub entries: usize,
    pub warnings: Vec<String>,
}

pub fn build(config: &Config, metadata: &ProjectMetadata) -> Result<BuildSummary> {
    let mut warnings = config.warnings.clone();
    let mut catalog = Catalog::new(config.domain.clone());

    if let Some(merge_path) = &config.merge {
        let previous = pot::read(merge_path)
            .with_context(|| format!("Could not merge {}", merge_path.display()))?;
        catalog.merge_entries(previous);
    }

    headers::assemble(&mut catalog, config, metadata);
    append_metadata_entries(&mut catalog, metadata);

    let mut options = ScanOptions {
        include: config.include.clone(),
        exclude: config.exclude.clone(),
        extensions: vec!["php".to_string()],
        extract_templates: metadata.is_theme(),
        domain: config.domain.clone(),
    };
    extract::scan_php(&config.source, &mut catalog, &options)?;

    if !config.skip_js {
        options.extensions = vec!["js".to_string(), "jsx".to_string()];
        options.extract_templates = false;
        extract::scan_js(&config.source, &mut catalog, &options)?;
    }

    catalog.prune_stale();
    warnings.extend(audit::comment_conflicts(&catalog));

    pot::write(&catalog, &config.destination)?;

    Ok(BuildSummary {
        destination: config.destination.clone(),
        entries: catalog.len(),
        warnings,
    })
}

/// One synthetic entry per non-empty declared metadata field, so the
/// project's own name, description, and author are translatable.
fn append_metadata_entries(catalog: &mut Catalog, metadata: &ProjectMetadata) {
    let (map, kind) = match metadata {
        ProjectMetadata::Theme(map) => (map, "theme"),
        ProjectMetadata::Plugin(map) => (map, "plugin"),
        ProjectMetadata::Generic => return,
    };
    for (field, value) in map.iter() {
        if value.is_empty() || UNTRANSLATABLE_FIELDS.contains(&field) {
            continue;
        }
        catalog.add_entry(CatalogEntry {
            original: value.to_string(),
            comments: vec![format!("{field} of the {kind}")],
            ..Default::default()
        });
    }
}
