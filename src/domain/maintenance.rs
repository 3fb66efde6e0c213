//! Cluster-wide maintenance gate.
//!
//! While `maintenance-mode` is set Pacemaker stops managing every resource,
//! so per-node and per-resource findings would only be noise. The gate runs
//! on `pcs property` output before crm_mon is even consulted.

use tracing::debug;

use super::severity::{Category, Finding, Verdict};

/// Whether the property dump asserts `maintenance-mode`.
///
/// Accepts both the `key: value` listing of `pcs property` and the
/// `key=value` form printed by `pcs property config`.
pub fn is_asserted(properties: &str) -> bool {
    properties.lines().any(|line| {
        line.split_once(':')
            .or_else(|| line.split_once('='))
            .is_some_and(|(key, value)| {
                key.trim() == "maintenance-mode" && value.trim() == "true"
            })
    })
}

/// A WARNING verdict when the whole cluster is in maintenance, otherwise `None`.
pub fn check(properties: &str) -> Option<Verdict> {
    debug!(output = properties.trim_end(), "maintenance mode output");
    is_asserted(properties).then(|| {
        Verdict::from_findings(vec![Finding::warning(
            Category::Maintenance,
            "cluster",
            "Cluster in maintenance mode!",
        )])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::severity::Severity;
    use pretty_assertions::assert_eq;

    #[test]
    fn detects_pcs_property_listing() {
        let out = "Cluster Properties:\n cluster-name: tripleo_cluster\n maintenance-mode: true\n stonith-enabled: false\n";
        assert!(is_asserted(out));
        assert!(is_asserted("maintenance-mode=true"));
        assert!(is_asserted("  maintenance-mode :  true  "));
    }

    #[test]
    fn ignores_unset_or_false() {
        assert!(!is_asserted(""));
        assert!(!is_asserted(" maintenance-mode: false\n"));
        assert!(!is_asserted(" maintenance-mode: truely\n"));
        assert!(!is_asserted(" node-maintenance-mode: true\n"));
    }

    #[test]
    fn asserted_gate_yields_single_warning() {
        let verdict = check(" maintenance-mode: true\n").unwrap();
        assert_eq!(verdict.severity, Severity::Warning);
        assert_eq!(verdict.exit_code, 1);
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].category, Category::Maintenance);
        assert!(check(" maintenance-mode: false\n").is_none());
    }
}
