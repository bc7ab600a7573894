//! Directory walking with include/exclude path-fragment filters.
//!
//! Fragments are matched segment-wise against the path relative to the
//! source root: a fragment selects a file when it equals the whole path,
//! a leading directory, an inner directory, or the file name itself.
//! An include match overrides any exclusion; when include fragments exist,
//! files matching none of them are skipped.

use std::path::{Path, PathBuf};

use anyhow::Result;
use walkdir::WalkDir;

pub fn collect_files(
    source: &Path,
    include: &[String],
    exclude: &[String],
    extensions: &[String],
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(source).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches_extension = entry
            .path()
            .extension()
            .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)));
        if !matches_extension {
            continue;
        }
        let rel = relative(source, entry.path());
        if is_selected(&rel, include, exclude) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Path relative to the source root, with `/` separators.
pub fn relative(source: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(source).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn is_selected(rel: &str, include: &[String], exclude: &[String]) -> bool {
    if !include.is_empty() {
        return include.iter().any(|f| matches_fragment(rel, f));
    }
    !exclude.iter().any(|f| matches_fragment(rel, f))
}

fn matches_fragment(rel: &str, fragment: &str) -> bool {
    rel == fragment
        || rel.starts_with(&format!("{fragment}/"))
        || rel.ends_with(&format!("/{fragment}"))
        || rel.contains(&format!("/{fragment}/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fragment_matches_any_path_segment() {
        let exclude = strings(&["vendor"]);
        assert!(!is_selected("vendor/lib.php", &[], &exclude));
        assert!(!is_selected("src/vendor/lib.php", &[], &exclude));
        assert!(!is_selected("src/vendor", &[], &exclude));
        assert!(is_selected("src/vendored/lib.php", &[], &exclude));
    }

    #[test]
    fn multi_segment_fragments_work() {
        let exclude = strings(&["admin/js"]);
        assert!(!is_selected("admin/js/app.js", &[], &exclude));
        assert!(is_selected("admin/jsx/app.js", &[], &exclude));
    }

    #[test]
    fn include_overrides_exclude() {
        let include = strings(&["vendor"]);
        let exclude = strings(&["vendor"]);
        assert!(is_selected("vendor/lib.php", &include, &exclude));
        assert!(!is_selected("src/main.php", &include, &exclude));
    }

    #[test]
    fn collects_matching_files_in_sorted_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("inc")).unwrap();
        fs::create_dir_all(dir.path().join("node_modules")).unwrap();
        fs::write(dir.path().join("b.php"), "").unwrap();
        fs::write(dir.path().join("a.php"), "").unwrap();
        fs::write(dir.path().join("inc/c.php"), "").unwrap();
        fs::write(dir.path().join("node_modules/d.php"), "").unwrap();
        fs::write(dir.path().join("style.css"), "").unwrap();

        let exclude = strings(&["node_modules"]);
        let files =
            collect_files(dir.path(), &[], &exclude, &strings(&["php"])).unwrap();
        let rels: Vec<_> = files.iter().map(|f| relative(dir.path(), f)).collect();
        assert_eq!(rels, vec!["a.php", "b.php", "inc/c.php"]);
    }
}
