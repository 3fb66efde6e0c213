//! One health check, end to end: maintenance gate, snapshot, rules.

use anyhow::Result;
use tracing::debug;

use super::builder;
use super::maintenance;
use super::rules::{self, CheckOptions};
use super::severity::Verdict;
use crate::error::CheckError;

/// Run a check against `properties` and the snapshot produced by `snapshot`.
///
/// The snapshot is only requested when the cluster is not in maintenance.
pub fn run<F>(properties: &str, snapshot: F, options: &CheckOptions) -> Result<Verdict>
where
    F: FnOnce() -> Result<String>,
{
    if let Some(verdict) = maintenance::check(properties) {
        debug!("cluster in maintenance mode, skipping snapshot checks");
        return Ok(verdict);
    }

    let xml = snapshot()?;
    let snapshot = builder::build(&xml).map_err(CheckError::from)?;
    debug!(
        nodes = snapshot.nodes.len(),
        resources = snapshot.resources.len(),
        clones = snapshot.clones.len(),
        "snapshot built"
    );

    Ok(rules::evaluate(&snapshot, options))
}
