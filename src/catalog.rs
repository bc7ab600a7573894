//! Catalog and entry types for the POT template under construction.
//!
//! A [`Catalog`] is built up in a fixed sequence of phases (merge, headers,
//! metadata entries, scanned entries) and then handed to the POT writer.
//! Entries are kept in insertion order so output is deterministic; a key map
//! deduplicates on (context, original, plural).

use std::collections::{HashMap, HashSet};

/// Uniqueness key for a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub context: String,
    pub original: String,
    pub plural: Option<String>,
}

/// One translatable string with its context, plural form, extracted
/// comments, and source references.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogEntry {
    /// Disambiguation context, empty when the string has none.
    pub context: String,
    /// The source string itself.
    pub original: String,
    /// Plural form, for strings extracted from plural-aware calls.
    pub plural: Option<String>,
    /// Extracted (translator) comments, in extraction order.
    pub comments: Vec<String>,
    /// Source references as `path:line`.
    pub references: Vec<String>,
}

impl CatalogEntry {
    pub fn key(&self) -> EntryKey {
        EntryKey {
            context: self.context.clone(),
            original: self.original.clone(),
            plural: self.plural.clone(),
        }
    }
}

/// The translation template being assembled.
#[derive(Debug, Default)]
pub struct Catalog {
    /// Resolved text domain; `None` means the catalog is not domain-scoped.
    pub domain: Option<String>,
    /// Leading free-text comment written above the header entry.
    pub comment: String,
    headers: Vec<(String, String)>,
    entries: Vec<CatalogEntry>,
    index: HashMap<EntryKey, usize>,
    /// Keys carried over from a merge source and not yet re-encountered.
    carried: HashSet<EntryKey>,
}

impl Catalog {
    pub fn new(domain: Option<String>) -> Self {
        Self {
            domain,
            ..Self::default()
        }
    }

    /// Set a header, replacing an existing one in place to keep order stable.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name.to_string(), value)),
        }
    }

    pub fn remove_header(&mut self, name: &str) {
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn headers(&self) -> impl Iterator<Item = (&str, &str)> {
        self.headers.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Add an entry, merging comments and references into an existing entry
    /// with the same key. Marks the key as freshly seen, so merged-in entries
    /// that are re-encountered survive the stale prune.
    pub fn add_entry(&mut self, entry: CatalogEntry) {
        let key = entry.key();
        self.carried.remove(&key);
        match self.index.get(&key) {
            Some(&i) => merge_into(&mut self.entries[i], entry),
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// Fold entries from a previously generated catalog into this one.
    ///
    /// Headers and the leading comment of `other` are intentionally not
    /// copied; they are always recomputed. The carried-over keys are tracked
    /// so [`Catalog::prune_stale`] can drop entries the scan phases never
    /// re-encounter.
    pub fn merge_entries(&mut self, other: Catalog) {
        for entry in other.entries {
            let key = entry.key();
            match self.index.get(&key) {
                Some(&i) => merge_into(&mut self.entries[i], entry),
                None => {
                    self.carried.insert(key.clone());
                    self.index.insert(key, self.entries.len());
                    self.entries.push(entry);
                }
            }
        }
    }

    /// Drop carried-over entries that no later phase re-encountered.
    pub fn prune_stale(&mut self) {
        if self.carried.is_empty() {
            return;
        }
        let carried = std::mem::take(&mut self.carried);
        self.entries.retain(|e| !carried.contains(&e.key()));
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.key(), i))
            .collect();
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn merge_into(existing: &mut CatalogEntry, incoming: CatalogEntry) {
    for comment in incoming.comments {
        if !existing.comments.contains(&comment) {
            existing.comments.push(comment);
        }
    }
    for reference in incoming.references {
        if !existing.references.contains(&reference) {
            existing.references.push(reference);
        }
    }
}
