//! Run configuration resolved from CLI arguments and detected metadata.
//!
//! Resolution happens once per run and produces an immutable [`Config`]
//! threaded through the rest of the pipeline. Precedence, in increasing
//! strength: derived defaults (slug, destination), declared metadata fields
//! (`Text Domain`, `Domain Path`), explicit flags.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::metadata::ProjectMetadata;

/// Path fragments that are always excluded from scanning unless an include
/// fragment explicitly selects them.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules", ".git", ".svn", ".hg", "vendor"];

/// Raw, unvalidated input to configuration resolution, as parsed from argv.
#[derive(Debug, Default)]
pub struct RawOptions {
    pub source: PathBuf,
    pub destination: Option<PathBuf>,
    pub slug: Option<String>,
    pub domain: Option<String>,
    pub ignore_domain: bool,
    /// Outer `Some` when `--merge` was given at all; inner `Some` when it
    /// carried an explicit path.
    pub merge: Option<Option<PathBuf>>,
    pub include: Option<String>,
    pub exclude: Option<String>,
    pub headers: Option<String>,
    pub skip_js: bool,
    pub copyright_holder: Option<String>,
    pub package_name: Option<String>,
}

/// Immutable configuration for one generation run.
#[derive(Debug)]
pub struct Config {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub slug: String,
    /// `None` means extraction must not filter by text domain at all.
    pub domain: Option<String>,
    pub merge: Option<PathBuf>,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// User-supplied header overrides, applied after the computed headers.
    pub headers: Vec<(String, String)>,
    pub skip_js: bool,
    pub copyright_holder: Option<String>,
    pub package_name: Option<String>,
    /// Non-fatal notes produced during resolution, e.g. a skipped merge.
    pub warnings: Vec<String>,
}

impl Config {
    pub fn resolve(raw: RawOptions, metadata: &ProjectMetadata) -> Result<Self> {
        let source = validate_source(&raw.source)?;
        let mut warnings = Vec::new();

        let slug = match raw.slug {
            Some(slug) => slug,
            None => source
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "unknown".to_string()),
        };

        let domain = if raw.ignore_domain {
            None
        } else {
            let mut domain = slug.clone();
            if let Some(text_domain) = metadata.field("Text Domain") {
                if !text_domain.is_empty() {
                    domain = text_domain.to_string();
                }
            }
            if let Some(explicit) = raw.domain {
                domain = explicit;
            }
            Some(domain)
        };

        let destination = match raw.destination {
            Some(path) => path,
            None => {
                let file_name = format!("{slug}.pot");
                match metadata
                    .field("Domain Path")
                    .map(trim_slashes)
                    .filter(|p| !p.is_empty())
                {
                    Some(domain_path) => source.join(domain_path).join(file_name),
                    None => source.join(file_name),
                }
            }
        };
        ensure_parent_dir(&destination)?;

        let merge = match raw.merge {
            None => None,
            Some(value) => {
                let path = value.unwrap_or_else(|| destination.clone());
                if path.is_file() {
                    Some(path)
                } else {
                    warnings.push(format!(
                        "Invalid file provided to --merge: {}. Skipping merge.",
                        path.display()
                    ));
                    None
                }
            }
        };

        let include = raw
            .include
            .as_deref()
            .map(parse_fragments)
            .unwrap_or_default();
        let mut exclude: Vec<String> = DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect();
        for fragment in raw
            .exclude
            .as_deref()
            .map(parse_fragments)
            .unwrap_or_default()
        {
            if !exclude.contains(&fragment) {
                exclude.push(fragment);
            }
        }

        let headers = match raw.headers.as_deref() {
            Some(json) => parse_header_overrides(json)?,
            None => Vec::new(),
        };

        Ok(Self {
            source,
            destination,
            slug,
            domain,
            merge,
            include,
            exclude,
            headers,
            skip_js: raw.skip_js,
            copyright_holder: raw.copyright_holder,
            package_name: raw.package_name,
            warnings,
        })
    }
}

/// Resolve and validate the source directory. Fatal if it does not exist or
/// is not a directory.
pub fn validate_source(path: &Path) -> Result<PathBuf> {
    let source = path
        .canonicalize()
        .with_context(|| format!("Not a valid source directory: {}", path.display()))?;
    if !source.is_dir() {
        bail!("Not a valid source directory: {}", path.display());
    }
    Ok(source)
}

/// Split a comma-separated list into slash-trimmed, deduplicated fragments.
fn parse_fragments(csv: &str) -> Vec<String> {
    let mut fragments = Vec::new();
    for raw in csv.split(',') {
        let fragment = raw.trim().trim_matches('/');
        if fragment.is_empty() {
            continue;
        }
        if !fragments.iter().any(|f| f == fragment) {
            fragments.push(fragment.to_string());
        }
    }
    fragments
}

fn trim_slashes(path: &str) -> &str {
    path.trim().trim_matches('/')
}

fn parse_header_overrides(json: &str) -> Result<Vec<(String, String)>> {
    let value: Value = serde_json::from_str(json).context("Could not parse --headers as JSON")?;
    let Value::Object(map) = value else {
        bail!("--headers must be a JSON object of string values");
    };
    let mut headers = Vec::with_capacity(map.len());
    for (name, value) in map {
        let Value::String(value) = value else {
            bail!("--headers value for \"{name}\" must be a string");
        };
        headers.push((name, value));
    }
    Ok(headers)
}

/// Make sure the destination's parent directory exists. Tolerates another
/// process creating the same directory between the check and the create.
fn ensure_parent_dir(path: &Path) -> Result<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent.is_dir() {
        return Ok(());
    }
    if let Err(err) = fs::create_dir_all(parent) {
        if !parent.is_dir() {
            return Err(err)
                .with_context(|| format!("Could not create directory {}", parent.display()));
        }
    }
    Ok(())
}
