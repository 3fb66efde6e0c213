//! Cluster state reported by one crm_mon run.
//!
//! Everything here is a plain value built by `builder::build`; a snapshot is
//! rebuilt on every check and never shared between runs.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub summary: ClusterSummary,
    pub nodes: Vec<Node>,
    pub resources: Vec<Resource>,
    pub clones: Vec<ResourceClone>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClusterSummary {
    pub nodes_configured: usize,
    pub stonith_enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub online: bool,
    pub standby: bool,
    pub maintenance: bool,
    pub unclean: bool,
    /// Operation history recorded for this node, in document order.
    pub history: Vec<ResourceHistory>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceHistory {
    pub resource: String,
    pub operations: Vec<OperationRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRecord {
    pub task: String,
    /// Raw agent exit code; resolved against the OCF table when inspected.
    pub rc: i64,
    pub call: Option<i64>,
    pub last_rc_change: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub id: String,
    pub role: Role,
    pub active: bool,
    pub failed: bool,
    pub failure_ignored: bool,
    pub managed: bool,
    pub resource_agent: String,
    /// Node the resource runs on, if crm_mon reported one.
    pub node: Option<String>,
}

impl Resource {
    pub fn node_name(&self) -> &str {
        self.node.as_deref().unwrap_or("N/A")
    }

    /// Whether the resource takes part in role, failure and management checks.
    pub fn is_checked(&self) -> bool {
        self.active && !self.failure_ignored
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResourceClone {
    pub id: String,
    pub failed: bool,
    /// `None` when crm_mon omitted the attribute or reported an unknown value.
    pub failure_ignored: Option<bool>,
    pub managed: bool,
    /// Constituent instances, built from this clone's element only.
    pub members: Vec<Resource>,
}

/// Resource role as reported by crm_mon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    Started,
    Stopped,
    Starting,
    Stopping,
    Migrating,
    Promoted,
    Unpromoted,
    Master,
    Slave,
    Unknown,
    Other(String),
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        match s {
            "Started" => Role::Started,
            "Stopped" => Role::Stopped,
            "Starting" => Role::Starting,
            "Stopping" => Role::Stopping,
            "Migrating" => Role::Migrating,
            "Promoted" => Role::Promoted,
            "Unpromoted" => Role::Unpromoted,
            "Master" => Role::Master,
            "Slave" => Role::Slave,
            "Unknown" => Role::Unknown,
            other => Role::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Started => "Started",
            Role::Stopped => "Stopped",
            Role::Starting => "Starting",
            Role::Stopping => "Stopping",
            Role::Migrating => "Migrating",
            Role::Promoted => "Promoted",
            Role::Unpromoted => "Unpromoted",
            Role::Master => "Master",
            Role::Slave => "Slave",
            Role::Unknown => "Unknown",
            Role::Other(other) => other.as_str(),
        };
        f.write_str(s)
    }
}
