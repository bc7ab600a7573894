//! Reading and writing gettext POT files.
//!
//! The writer emits the leading comment, the header entry, then every
//! catalog entry in insertion order. The reader is a tolerant line-based
//! parser that round-trips the writer's output and accepts hand-written
//! POT files: continuation strings, `msgctxt`, plural forms, extracted
//! comments (`#.`) and references (`#:`). Translations in `msgstr` are
//! ignored on read since the catalog is a template.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use crate::catalog::{Catalog, CatalogEntry};

pub fn read(path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read POT file {}", path.display()))?;
    decode(&content).with_context(|| format!("Could not parse POT file {}", path.display()))
}

pub fn write(catalog: &Catalog, path: &Path) -> Result<()> {
    fs::write(path, encode(catalog))
        .with_context(|| format!("Could not write POT file {}", path.display()))
}

pub fn encode(catalog: &Catalog) -> String {
    let mut out = String::new();
    for line in catalog.comment.lines() {
        out.push_str("# ");
        out.push_str(line);
        out.push('\n');
    }
    out.push_str("msgid \"\"\nmsgstr \"\"\n");
    for (name, value) in catalog.headers() {
        // The template is never a localized file.
        if name.eq_ignore_ascii_case("Language") {
            continue;
        }
        out.push_str(&format!("\"{}\"\n", escape(&format!("{name}: {value}\n"))));
    }

    for entry in catalog.entries() {
        out.push('\n');
        for comment in &entry.comments {
            for line in comment.lines() {
                out.push_str(&format!("#. {line}\n"));
            }
        }
        for reference in &entry.references {
            out.push_str(&format!("#: {reference}\n"));
        }
        if !entry.context.is_empty() {
            out.push_str(&format!("msgctxt \"{}\"\n", escape(&entry.context)));
        }
        out.push_str(&format!("msgid \"{}\"\n", escape(&entry.original)));
        match &entry.plural {
            Some(plural) => {
                out.push_str(&format!("msgid_plural \"{}\"\n", escape(plural)));
                out.push_str("msgstr[0] \"\"\nmsgstr[1] \"\"\n");
            }
            None => out.push_str("msgstr \"\"\n"),
        }
    }
    out
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str(r"\n"),
            '\t' => out.push_str(r"\t"),
            '\r' => out.push_str(r"\r"),
            _ => out.push(c),
        }
    }
    out
}

fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Which logical string a continuation line appends to.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    None,
    Context,
    Original,
    Plural,
    Translation,
}

#[derive(Default)]
struct Parser {
    catalog: Catalog,
    current: CatalogEntry,
    translation: String,
    field: Field,
    has_msgid: bool,
    header_done: bool,
    leading_comment: Vec<String>,
}

impl Default for Field {
    fn default() -> Self {
        Self::None
    }
}

pub fn decode(content: &str) -> Result<Catalog> {
    let mut parser = Parser::default();
    for (number, line) in content.lines().enumerate() {
        parser
            .line(line.trim_end())
            .with_context(|| format!("Malformed POT content at line {}", number + 1))?;
    }
    parser.flush();
    Ok(parser.catalog)
}

impl Parser {
    fn line(&mut self, line: &str) -> Result<()> {
        if line.is_empty() {
            self.flush();
            return Ok(());
        }
        if let Some(rest) = line.strip_prefix("#.") {
            self.current.comments.push(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("#:") {
            self.current
                .references
                .extend(rest.split_whitespace().map(String::from));
        } else if line.starts_with("#~") || line.starts_with("#,") || line.starts_with("#|") {
            // Obsolete entries and flags are not part of the data model.
        } else if let Some(rest) = line.strip_prefix('#') {
            if !self.header_done && !self.has_msgid {
                self.leading_comment.push(rest.trim().to_string());
            }
        } else if let Some(rest) = line.strip_prefix("msgctxt ") {
            if self.has_msgid {
                self.flush();
            }
            self.current.context = parse_quoted(rest)?;
            self.field = Field::Context;
        } else if let Some(rest) = line.strip_prefix("msgid_plural ") {
            self.current.plural = Some(parse_quoted(rest)?);
            self.field = Field::Plural;
        } else if let Some(rest) = line.strip_prefix("msgid ") {
            if self.has_msgid {
                self.flush();
            }
            self.current.original = parse_quoted(rest)?;
            self.has_msgid = true;
            self.field = Field::Original;
        } else if let Some(rest) = line.strip_prefix("msgstr") {
            let rest = rest.trim_start_matches(|c: char| c == '[' || c == ']' || c.is_ascii_digit());
            self.translation.push_str(&parse_quoted(rest.trim_start())?);
            self.field = Field::Translation;
        } else if line.starts_with('"') {
            let text = parse_quoted(line)?;
            match self.field {
                Field::Context => self.current.context.push_str(&text),
                Field::Original => self.current.original.push_str(&text),
                Field::Plural => {
                    if let Some(plural) = self.current.plural.as_mut() {
                        plural.push_str(&text);
                    }
                }
                Field::Translation => self.translation.push_str(&text),
                Field::None => bail!("continuation string outside an entry"),
            }
        } else {
            bail!("unrecognized line: {line}");
        }
        Ok(())
    }

    /// Finish the entry under construction, if any.
    fn flush(&mut self) {
        if !self.has_msgid {
            self.reset();
            return;
        }
        let entry = std::mem::take(&mut self.current);
        if entry.original.is_empty() && entry.context.is_empty() && !self.header_done {
            // The header entry: msgstr holds `Name: value` lines.
            for line in self.translation.lines() {
                if let Some((name, value)) = line.split_once(':') {
                    self.catalog.set_header(name.trim(), value.trim());
                }
            }
            self.catalog.comment = self.leading_comment.join("\n");
            self.header_done = true;
        } else {
            self.catalog.add_entry(entry);
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.current = CatalogEntry::default();
        self.translation.clear();
        self.field = Field::None;
        self.has_msgid = false;
    }
}

fn parse_quoted(text: &str) -> Result<String> {
    let text = text.trim();
    let inner = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .with_context(|| format!("expected a quoted string, found: {text}"))?;
    Ok(unescape(inner))
}
