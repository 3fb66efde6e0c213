//! `pcmk-health check`: live check against the local cluster.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::report::{self, Format};
use super::RuleArgs;
use crate::config;
use crate::domain::pipeline;
use crate::logging;
use crate::tools;

pub fn run(
    crm_mon: Option<PathBuf>,
    pcs: Option<PathBuf>,
    rules: &RuleArgs,
    format: Format,
    debug: bool,
    config_path: Option<PathBuf>,
) -> Result<i32> {
    let mut cfg = config::load(config_path.as_deref())?;

    // CLI flags override config values
    if let Some(path) = crm_mon {
        cfg.crm_mon = path;
    }
    if let Some(path) = pcs {
        cfg.pcs = path;
    }

    let crm_mon = tools::locate(&cfg.crm_mon)?;
    let pcs = tools::locate(&cfg.pcs)?;

    logging::init(super::log_level(debug, &cfg), format == Format::Json);

    let options = rules.options(&cfg);
    let properties = tools::pcs_properties(&pcs).context("checking maintenance mode")?;
    let verdict = pipeline::run(
        &properties,
        || tools::crm_mon_xml(&crm_mon).context("reading cluster status"),
        &options,
    )?;

    report::emit(&verdict, format)
}
