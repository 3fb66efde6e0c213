//! Verdict reporting as log lines or JSON on stdout.

use anyhow::{bail, Result};
use std::fmt;
use std::str::FromStr;
use tracing::{error, info, warn};

use crate::domain::severity::{Severity, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => bail!("unknown format '{}' (expected 'text' or 'json')", other),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Text => write!(f, "text"),
            Format::Json => write!(f, "json"),
        }
    }
}

/// Emit `verdict` and return the process exit status for it.
pub fn emit(verdict: &Verdict, format: Format) -> Result<i32> {
    match format {
        Format::Json => {
            let json = serde_json::to_string_pretty(verdict)?;
            println!("{}", json);
        }
        Format::Text => {
            for finding in &verdict.findings {
                match finding.severity {
                    Severity::Ok => info!("{}", finding.message),
                    Severity::Warning => warn!("{}", finding.message),
                    Severity::Critical => error!("{}", finding.message),
                }
            }
            if verdict.severity == Severity::Ok {
                info!("Cluster health OK");
            }
        }
    }
    Ok(verdict.exit_code)
}
