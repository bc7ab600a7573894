//! POT header and copyright comment synthesis.

use chrono::{Datelike, Utc};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::metadata::{self, ProjectMetadata};

/// Compute the catalog's technical headers and its leading copyright
/// comment. User-supplied header overrides are applied last; the
/// `Language` header never survives, since the output is a template.
pub fn assemble(catalog: &mut Catalog, config: &Config, metadata: &ProjectMetadata) {
    let name = display_name(config, metadata);
    let version = metadata::wp_core_version(&config.source).or_else(|| {
        metadata
            .field("Version")
            .filter(|v| !v.is_empty())
            .map(String::from)
    });

    let project_id = match &version {
        Some(version) => format!("{name} {version}"),
        None => name.clone(),
    };
    catalog.set_header("Project-Id-Version", project_id);

    match metadata {
        ProjectMetadata::Theme(_) => catalog.set_header(
            "Report-Msgid-Bugs-To",
            format!("https://wordpress.org/support/theme/{}", config.slug),
        ),
        ProjectMetadata::Plugin(_) => catalog.set_header(
            "Report-Msgid-Bugs-To",
            format!("https://wordpress.org/support/plugins/{}", config.slug),
        ),
        ProjectMetadata::Generic => {}
    }

    catalog.set_header("Last-Translator", "FULL NAME <EMAIL@ADDRESS>");
    catalog.set_header("Language-Team", "LANGUAGE <LL@li.org>");
    catalog.set_header(
        "X-Generator",
        concat!("makepot ", env!("CARGO_PKG_VERSION")),
    );
    catalog.remove_header("Language");
    if let Some(domain) = catalog.domain.clone() {
        catalog.set_header("X-Domain", domain);
    }

    for (name, value) in &config.headers {
        catalog.set_header(name, value.clone());
    }
    catalog.remove_header("Language");

    catalog.comment = copyright_comment(config, metadata, &name);
}

fn display_name(config: &Config, metadata: &ProjectMetadata) -> String {
    metadata
        .display_name()
        .map(String::from)
        .or_else(|| config.package_name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

fn copyright_comment(config: &Config, metadata: &ProjectMetadata, name: &str) -> String {
    let holder = match metadata {
        ProjectMetadata::Theme(map) => Some(map.get("Author")).filter(|a| !a.is_empty()),
        ProjectMetadata::Plugin(_) => metadata.display_name(),
        ProjectMetadata::Generic => None,
    }
    .map(String::from)
    .or_else(|| config.copyright_holder.clone())
    .unwrap_or_else(|| "Unknown".to_string());

    let year = Utc::now().year();
    let license = metadata
        .field("License")
        .filter(|license| !license.is_empty());
    match license {
        Some(license) => format!(
            "Copyright (C) {year} {holder}\nThis file is distributed under the {license}."
        ),
        None => format!(
            "Copyright (C) {year} {holder}\nThis file is distributed under the same license as the {name} package."
        ),
    }
}
