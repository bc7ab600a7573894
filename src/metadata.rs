//! Project metadata detection from file header comments.
//!
//! WordPress themes declare their identity in a comment block at the top of
//! `style.css`, plugins in the top of their main PHP file. Detection probes
//! the first 8 KiB of each candidate file against a fixed field table.
//! Theme detection runs first and short-circuits the plugin scan.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

/// How many bytes of a candidate file are probed for header fields.
const HEADER_PROBE_BYTES: u64 = 8192;

/// Name of the stylesheet probed for a theme header.
pub const STYLESHEET: &str = "style.css";

pub const THEME_FIELDS: &[&str] = &[
    "Theme Name",
    "Theme URI",
    "Description",
    "Author",
    "Author URI",
    "Version",
    "License",
    "Domain Path",
    "Text Domain",
];

pub const PLUGIN_FIELDS: &[&str] = &[
    "Plugin Name",
    "Plugin URI",
    "Description",
    "Author",
    "Author URI",
    "Version",
    "Domain Path",
    "Text Domain",
];

static THEME_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_field_patterns(THEME_FIELDS));

static PLUGIN_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> =
    LazyLock::new(|| compile_field_patterns(PLUGIN_FIELDS));

/// Cuts a header value short at a comment close or PHP tag close.
static VALUE_TRAILER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:\*/|\?>).*").unwrap());

/// WordPress core version assignment in `wp-includes/version.php`.
static WP_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$wp_version\s*=\s*'([^']+)'").unwrap());

fn compile_field_patterns(fields: &[&'static str]) -> Vec<(&'static str, Regex)> {
    fields
        .iter()
        .map(|field| {
            let pattern = format!(r"(?mi)^[ \t/*#@-]*{}:(.*)$", regex::escape(field));
            (*field, Regex::new(&pattern).unwrap())
        })
        .collect()
}

/// Ordered field name → raw value map parsed from a file header.
///
/// Fields with no match are present with an empty value; callers distinguish
/// "declared but empty" from "not declared" only by emptiness.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMap {
    fields: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    #[cfg(test)]
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }
}

/// What kind of project the source tree is, with its declared header fields.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectMetadata {
    Theme(HeaderMap),
    Plugin(HeaderMap),
    Generic,
}

impl ProjectMetadata {
    /// Classify the source tree.
    ///
    /// A readable `style.css` with a non-empty `Theme Name` wins outright.
    /// Otherwise the immediate `*.php` files are probed in name order and
    /// the first one declaring a `Plugin Name` wins.
    pub fn detect(source: &Path) -> Result<Self> {
        let stylesheet = source.join(STYLESHEET);
        if stylesheet.is_file() {
            if let Ok(text) = probe_file(&stylesheet) {
                let map = parse_header_fields(&text, &THEME_PATTERNS);
                if !map.get("Theme Name").is_empty() {
                    return Ok(Self::Theme(map));
                }
            }
        }

        let mut candidates: Vec<_> = source
            .read_dir()
            .with_context(|| format!("Could not read directory {}", source.display()))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().is_some_and(|ext| ext == "php")
            })
            .collect();
        candidates.sort();

        for candidate in candidates {
            let Ok(text) = probe_file(&candidate) else {
                continue;
            };
            let map = parse_header_fields(&text, &PLUGIN_PATTERNS);
            if !map.get("Plugin Name").is_empty() {
                return Ok(Self::Plugin(map));
            }
        }

        Ok(Self::Generic)
    }

    /// Look up a declared field. `None` for generic projects; empty string
    /// for declared-but-absent fields.
    pub fn field(&self, name: &str) -> Option<&str> {
        match self {
            Self::Theme(map) | Self::Plugin(map) => Some(map.get(name)),
            Self::Generic => None,
        }
    }

    /// The declared display name: `Theme Name` or `Plugin Name`.
    pub fn display_name(&self) -> Option<&str> {
        let name = match self {
            Self::Theme(map) => map.get("Theme Name"),
            Self::Plugin(map) => map.get("Plugin Name"),
            Self::Generic => return None,
        };
        (!name.is_empty()).then_some(name)
    }

    pub fn is_theme(&self) -> bool {
        matches!(self, Self::Theme(_))
    }
}

/// Read the first 8 KiB of a file, normalizing CRLF line endings.
fn probe_file(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Could not open {}", path.display()))?;
    let mut buf = Vec::new();
    file.take(HEADER_PROBE_BYTES)
        .read_to_end(&mut buf)
        .with_context(|| format!("Could not read {}", path.display()))?;
    Ok(String::from_utf8_lossy(&buf).replace("\r\n", "\n").replace('\r', "\n"))
}

fn parse_header_fields(text: &str, patterns: &[(&'static str, Regex)]) -> HeaderMap {
    let fields = patterns
        .iter()
        .map(|(field, pattern)| {
            let value = pattern
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| VALUE_TRAILER.replace(m.as_str(), "").trim().to_string())
                .unwrap_or_default();
            (field.to_string(), value)
        })
        .collect();
    HeaderMap { fields }
}

/// Version string from a WordPress core checkout, if the source tree is one.
pub fn wp_core_version(source: &Path) -> Option<String> {
    let version_file = source.join("wp-includes").join("version.php");
    let text = probe_file(&version_file).ok()?;
    WP_VERSION
        .captures(&text)
        .map(|c| c[1].to_string())
}
