//! makepot - POT template generator for WordPress projects
//!
//! makepot is a CLI tool and library for building gettext POT translation
//! templates. It detects whether a source tree is a theme or a plugin from
//! its header comments, resolves a consistent configuration (text domain,
//! destination, filters), scans PHP and JavaScript sources for translation
//! calls, and writes the assembled template with computed headers and a
//! copyright comment.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, reporting)
//! - `config`: Configuration resolution from flags and detected metadata
//! - `metadata`: Theme/plugin/generic project detection
//! - `catalog`: The template data model (entries, headers, merge policy)
//! - `headers`: POT header and copyright comment synthesis
//! - `extract`: PHP/JS source scanning and string extraction
//! - `pipeline`: The phased assembly pipeline
//! - `audit`: Post-assembly diagnostics
//! - `pot`: POT file encoding and decoding

pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod extract;
pub mod headers;
pub mod metadata;
pub mod pipeline;
pub mod pot;
