//! Command execution: wires argument parsing, metadata detection,
//! configuration resolution, and the pipeline together.

use anyhow::Result;

use super::args::Arguments;
use crate::config::{self, Config};
use crate::metadata::ProjectMetadata;
use crate::pipeline::{self, BuildSummary};

pub fn run(args: Arguments) -> Result<BuildSummary> {
    let raw = args.into_raw();
    let source = config::validate_source(&raw.source)?;
    let metadata = ProjectMetadata::detect(&source)?;
    let config = Config::resolve(raw, &metadata)?;
    pipeline::build(&config, &metadata)
}
