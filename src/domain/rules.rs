//! Health rules: turn a `Snapshot` into findings.
//!
//! Rules never return early with a status: each one appends findings and the
//! verdict is the maximum severity over all of them, so a WARNING raised after
//! a CRITICAL cannot lower the outcome.

use tracing::debug;

use super::ocf::ReturnCode;
use super::severity::{Category, Finding, Verdict};
use super::snapshot::{Node, Resource, ResourceClone, Role, Snapshot};

pub const DEFAULT_STONITH_AGENT: &str = "stonith:fence_ipmilan";

/// Percentage of discovered nodes above which maintenance/standby is reported.
const MAJORITY_PERCENT: f64 = 50.0;

/// Which rules run and how they are parameterised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Restrict resource and clone rules to this id; node rules are skipped.
    pub resource: Option<String>,
    /// Require stonith to be enabled and to cover every node.
    pub stonith: bool,
    /// Resource agent counted as a fencing device.
    pub stonith_agent: String,
    /// Report failed operations from the node history.
    pub history: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            resource: None,
            stonith: false,
            stonith_agent: DEFAULT_STONITH_AGENT.to_string(),
            history: false,
        }
    }
}

pub fn evaluate(snapshot: &Snapshot, options: &CheckOptions) -> Verdict {
    let mut eval = Evaluation::new(options, snapshot.nodes.len());

    eval.summary(snapshot);

    if options.resource.is_none() {
        for node in &snapshot.nodes {
            eval.node(node);
        }
    }

    for resource in snapshot.resources.iter().filter(|r| targets(options, &r.id)) {
        eval.resource(resource);
    }

    for clone in snapshot.clones.iter().filter(|c| targets(options, &c.id)) {
        eval.clone_set(clone);
    }

    eval.coverage();

    debug!(findings = eval.findings.len(), "evaluation finished");
    Verdict::from_findings(eval.findings)
}

fn targets(options: &CheckOptions, id: &str) -> bool {
    options.resource.as_deref().map_or(true, |want| want == id)
}

struct Evaluation<'a> {
    options: &'a CheckOptions,
    discovered: usize,
    findings: Vec<Finding>,
    maintenance_nodes: usize,
    standby_nodes: usize,
    stonith_nodes: usize,
    target_found: bool,
}

impl<'a> Evaluation<'a> {
    fn new(options: &'a CheckOptions, discovered: usize) -> Self {
        Self {
            options,
            discovered,
            findings: Vec::new(),
            maintenance_nodes: 0,
            standby_nodes: 0,
            stonith_nodes: 0,
            target_found: false,
        }
    }

    fn push(&mut self, finding: Finding) {
        debug!(severity = %finding.severity, subject = %finding.subject, "finding");
        self.findings.push(finding);
    }

    fn summary(&mut self, snapshot: &Snapshot) {
        if snapshot.summary.nodes_configured > self.discovered {
            self.push(Finding::warning(
                Category::Cluster,
                "cluster",
                format!(
                    "Missing nodes from configuration ({} of {} configured nodes discovered)",
                    self.discovered, snapshot.summary.nodes_configured
                ),
            ));
        }

        if self.options.stonith && !snapshot.summary.stonith_enabled {
            self.push(Finding::warning(Category::Cluster, "cluster", "Stonith disabled!"));
        }
    }

    fn node(&mut self, node: &Node) {
        if node.maintenance {
            self.maintenance_nodes += 1;
            self.push(Finding::ok(
                Category::Node,
                &node.name,
                format!("Node {} is in maintenance mode", node.name),
            ));
            return;
        }

        if node.standby {
            self.standby_nodes += 1;
            self.push(Finding::ok(
                Category::Node,
                &node.name,
                format!("Node {} is in standby mode", node.name),
            ));
            return;
        }

        if !node.online {
            self.push(Finding::critical(
                Category::Node,
                &node.name,
                format!("Node {} is not online", node.name),
            ));
            return;
        }

        if node.unclean {
            self.push(Finding::warning(
                Category::Node,
                &node.name,
                format!("Node {} unclean", node.name),
            ));
        }

        if self.options.history {
            self.history(node);
        }
    }

    fn history(&mut self, node: &Node) {
        for entry in &node.history {
            for op in &entry.operations {
                debug!(node = %node.name, resource = %entry.resource, task = %op.task, call = ?op.call, rc = op.rc, "operation");
                let finding = match ReturnCode::from_code(op.rc) {
                    Some(rc) if rc.is_expected() => continue,
                    Some(rc) => Finding::warning(
                        Category::History,
                        &node.name,
                        format!(
                            "Node {} resource {} task {} had return code {} ({}) last seen at {}",
                            node.name, entry.resource, op.task, op.rc, rc, op.last_rc_change
                        ),
                    ),
                    None => Finding::warning(
                        Category::DataIntegrity,
                        &node.name,
                        format!(
                            "Node {} resource {} task {} had return code {} which is not an OCF return code, last seen at {}",
                            node.name, entry.resource, op.task, op.rc, op.last_rc_change
                        ),
                    ),
                };
                self.push(finding);
            }
        }
    }

    fn resource(&mut self, resource: &Resource) {
        self.target_found = true;
        let node = resource.node_name();

        if !resource.is_checked() {
            return;
        }

        if resource.role != Role::Started {
            self.push(Finding::critical(
                Category::Resource,
                &resource.id,
                format!("Resource '{}' not Started on node {}", resource.id, node),
            ));
        }

        if resource.failed {
            self.push(Finding::critical(
                Category::Resource,
                &resource.id,
                format!("Resource '{}' failed on node {}", resource.id, node),
            ));
        }

        if !resource.managed {
            self.push(Finding::warning(
                Category::Resource,
                &resource.id,
                format!("Resource '{}' not managed on node {}", resource.id, node),
            ));
        }

        if self.options.resource.is_some() {
            self.push(Finding::ok(
                Category::Resource,
                &resource.id,
                format!("Resource {} started on {}", resource.id, node),
            ));
        }

        if resource.resource_agent == self.options.stonith_agent {
            self.stonith_nodes += 1;
        }
    }

    fn clone_set(&mut self, clone: &ResourceClone) {
        self.target_found = true;

        // Only an explicit failure_ignored="false" suppresses this; unset and
        // unrecognised values do not.
        // TODO: check against live clusters whether this should be `== Some(false)`,
        // crm_mon reports failure_ignored="false" for ordinary clones.
        if clone.failed && clone.failure_ignored != Some(false) {
            self.push(Finding::critical(
                Category::Clone,
                &clone.id,
                format!("Clone '{}' failed", clone.id),
            ));
        }

        for member in &clone.members {
            let node = member.node_name();

            if member.role == Role::Stopped {
                self.push(Finding::critical(
                    Category::Clone,
                    &clone.id,
                    format!("Clone '{}' resource '{}' is stopped", clone.id, member.id),
                ));
                continue;
            }

            if !member.is_checked() {
                continue;
            }

            if member.failed {
                self.push(Finding::critical(
                    Category::Clone,
                    &clone.id,
                    format!(
                        "Clone '{}' resource '{}' failed on node {}",
                        clone.id, member.id, node
                    ),
                ));
            }

            if !clone.managed || !member.managed {
                self.push(Finding::warning(
                    Category::Clone,
                    &clone.id,
                    format!(
                        "Clone '{}' resource '{}' not managed on node {}",
                        clone.id, member.id, node
                    ),
                ));
            }

            if self.options.resource.is_some() {
                self.push(Finding::ok(
                    Category::Clone,
                    &clone.id,
                    format!("Resource clone {} started on {}", member.id, node),
                ));
            }
        }
    }

    fn coverage(&mut self) {
        if self.options.stonith
            && !self.options.stonith_agent.is_empty()
            && self.stonith_nodes < self.discovered
        {
            let message = if self.stonith_nodes == 0 {
                "No stonith nodes".to_string()
            } else {
                format!(
                    "{} stonith nodes configured out of {} nodes",
                    self.stonith_nodes, self.discovered
                )
            };
            self.push(Finding::warning(Category::Cluster, "cluster", message));
        }

        let maintenance = percentage(self.maintenance_nodes, self.discovered);
        if maintenance > MAJORITY_PERCENT {
            self.push(Finding::warning(
                Category::Cluster,
                "cluster",
                format!(
                    "More than half of the cluster nodes are in maintenance ({:.1})",
                    maintenance
                ),
            ));
        }

        let standby = percentage(self.standby_nodes, self.discovered);
        if standby > MAJORITY_PERCENT {
            self.push(Finding::warning(
                Category::Cluster,
                "cluster",
                format!(
                    "More than half of the cluster nodes are in standby mode ({:.1})",
                    standby
                ),
            ));
        }

        let options = self.options;
        if let Some(id) = &options.resource {
            if !self.target_found {
                self.push(Finding::critical(
                    Category::Resource,
                    id,
                    format!("Did not find resource {}", id),
                ));
            }
        }
    }
}

/// Share of `whole` in percent; 0 for an empty cluster.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}
