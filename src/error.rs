//! Error types for snapshot decoding and the collector layer.
//!
//! Health problems are never errors: they travel as `Finding` values inside a
//! `Verdict`. The types here cover everything that stops a verdict from being
//! produced at all.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status reserved for environment/setup problems.
pub const EXIT_SETUP: i32 = 3;
/// Exit status for snapshot and collector failures.
pub const EXIT_SNAPSHOT: i32 = 2;

/// Errors raised while turning crm_mon XML into a `Snapshot`.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The document is not well-formed XML
    #[error("malformed XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    /// The document contains no root element
    #[error("document has no root element")]
    Empty,

    /// The document ended inside an open element
    #[error("document ended before <{0}> was closed")]
    Unterminated(String),

    /// The root element is not a crm_mon status dump
    #[error("unexpected root element <{0}>, expected <crm_mon>")]
    UnexpectedRoot(String),

    /// A required section is absent
    #[error("required section <{0}> missing from crm_mon output")]
    MissingSection(&'static str),

    /// A required attribute is absent
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// An attribute value cannot be coerced to its field type
    #[error("<{element}> attribute '{attribute}' has invalid value '{value}'")]
    InvalidValue {
        element: String,
        attribute: &'static str,
        value: String,
    },
}

/// Errors that abort a check before any finding is produced.
#[derive(Debug, Error)]
pub enum CheckError {
    /// A required cluster binary is not installed
    #[error("{} not found", .path.display())]
    ToolNotFound { path: PathBuf },

    /// A cluster binary could not be run or failed
    #[error("{tool}: {message}")]
    Collector { tool: String, message: String },

    /// The status snapshot could not be decoded
    #[error("error parsing crm_mon output: {0}")]
    Snapshot(#[from] SnapshotError),
}

impl CheckError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CheckError::ToolNotFound { .. } => EXIT_SETUP,
            CheckError::Collector { .. } | CheckError::Snapshot(_) => EXIT_SNAPSHOT,
        }
    }
}

/// Exit status for an arbitrary command failure.
///
/// Walks the anyhow chain for a `CheckError`; anything else is a setup problem.
pub fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<CheckError>())
        .map(CheckError::exit_code)
        .unwrap_or(EXIT_SETUP)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    #[test]
    fn setup_and_snapshot_errors_have_distinct_statuses() {
        let missing = CheckError::ToolNotFound {
            path: PathBuf::from("/sbin/crm_mon"),
        };
        let parse = CheckError::from(SnapshotError::MissingSection("nodes"));
        assert_eq!(missing.exit_code(), 3);
        assert_eq!(parse.exit_code(), 2);
        assert_eq!(missing.to_string(), "/sbin/crm_mon not found");
    }

    #[test]
    fn exit_code_found_through_context() {
        let err = Err::<(), _>(CheckError::Collector {
            tool: "pcs".into(),
            message: "exited with status 1".into(),
        })
        .context("checking maintenance mode")
        .unwrap_err();
        assert_eq!(exit_code_for(&err), 2);

        let other = anyhow::anyhow!("unknown format 'yaml'");
        assert_eq!(exit_code_for(&other), 3);
    }
}
