//! Findings, severities and the aggregated verdict.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Health severity, ordered `Ok < Warning < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Ok,
    Warning,
    Critical,
}

impl Severity {
    /// Maximum severity over `severities`; `Ok` when empty.
    pub fn aggregate<I>(severities: I) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().max().unwrap_or_default()
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// What kind of check produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Maintenance,
    Node,
    History,
    Resource,
    Clone,
    Cluster,
    /// Cluster data that does not fit the expected model, e.g. unknown OCF codes.
    DataIntegrity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub category: Category,
    /// Node name, resource or clone id, or "cluster".
    pub subject: String,
    pub message: String,
}

impl Finding {
    pub fn new(
        severity: Severity,
        category: Category,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity,
            category,
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn ok(category: Category, subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Ok, category, subject, message)
    }

    pub fn warning(
        category: Category,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Warning, category, subject, message)
    }

    pub fn critical(
        category: Category,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::new(Severity::Critical, category, subject, message)
    }
}

/// Result of one health check: every finding plus their aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct Verdict {
    pub severity: Severity,
    pub exit_code: i32,
    pub checked_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
}

impl Verdict {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        let severity = Severity::aggregate(findings.iter().map(|f| f.severity));
        Self {
            severity,
            exit_code: severity.exit_code(),
            checked_at: Utc::now(),
            findings,
        }
    }
}
