//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::RawOptions;

/// Generate a POT translation template from a WordPress theme, plugin, or
/// generic source tree.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    /// Directory to scan for translatable strings
    pub source: PathBuf,

    /// Path of the generated POT file (defaults to <source>/<slug>.pot)
    pub destination: Option<PathBuf>,

    /// Project slug (defaults to the source directory name)
    #[arg(long)]
    pub slug: Option<String>,

    /// Text domain to extract; strings registered to other domains are skipped
    #[arg(long)]
    pub domain: Option<String>,

    /// Extract strings regardless of their text domain
    #[arg(long)]
    pub ignore_domain: bool,

    /// Merge entries from an existing POT file (defaults to the destination)
    #[arg(long, num_args = 0..=1, require_equals = true)]
    pub merge: Option<Option<PathBuf>>,

    /// Comma-separated path fragments to scan exclusively
    #[arg(long)]
    pub include: Option<String>,

    /// Comma-separated path fragments to skip
    #[arg(long)]
    pub exclude: Option<String>,

    /// JSON object of POT header overrides
    #[arg(long)]
    pub headers: Option<String>,

    /// Skip scanning JavaScript files
    #[arg(long)]
    pub skip_js: bool,

    /// Copyright holder named in the leading file comment
    #[arg(long)]
    pub copyright_holder: Option<String>,

    /// Package name used when no theme or plugin header is detected
    #[arg(long)]
    pub package_name: Option<String>,
}

impl Arguments {
    pub fn into_raw(self) -> RawOptions {
        RawOptions {
            source: self.source,
            destination: self.destination,
            slug: self.slug,
            domain: self.domain,
            ignore_domain: self.ignore_domain,
            merge: self.merge,
            include: self.include,
            exclude: self.exclude,
            headers: self.headers,
            skip_js: self.skip_js,
            copyright_holder: self.copyright_holder,
            package_name: self.package_name,
        }
    }
}
