//! `pcmk-health evaluate`: check a saved `crm_mon -X` dump.
//!
//! Same rules as `check`, without touching a live cluster. Useful for
//! post-mortems and for testing rule changes against captured output.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};

use super::report::{self, Format};
use super::RuleArgs;
use crate::config;
use crate::domain::pipeline;
use crate::logging;

pub fn run(
    snapshot: &Path,
    properties: Option<&Path>,
    rules: &RuleArgs,
    format: Format,
    debug: bool,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let cfg = config::load(config_path.as_deref())?;
    logging::init(super::log_level(debug, &cfg), format == Format::Json);

    let properties = match properties {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => String::new(),
    };

    let verdict = pipeline::run(&properties, || read_snapshot(snapshot), &rules.options(&cfg))?;
    report::emit(&verdict, format)
}

/// `-` reads the dump from stdin.
fn read_snapshot(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut xml = String::new();
        std::io::stdin()
            .read_to_string(&mut xml)
            .context("reading snapshot from stdin")?;
        return Ok(xml);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
