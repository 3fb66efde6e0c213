use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::CheckError;

/// Resolve a configured binary.
///
/// Paths are checked as given; bare names are searched on PATH.
pub fn locate(path: &Path) -> Result<PathBuf, CheckError> {
    let found = if path.components().count() > 1 {
        path.is_file().then(|| path.to_path_buf())
    } else {
        path.to_str().and_then(find_in_path)
    };
    found.ok_or_else(|| CheckError::ToolNotFound {
        path: path.to_path_buf(),
    })
}

fn find_in_path(name: &str) -> Option<PathBuf> {
    std::env::var_os("PATH").and_then(|paths| {
        std::env::split_paths(&paths)
            .map(|dir| dir.join(name))
            .find(|path| path.is_file())
    })
}

/// Run `bin` with `args` and return its stdout.
pub fn run(bin: &Path, args: &[&str]) -> Result<String, CheckError> {
    let tool = bin.display().to_string();
    debug!(%tool, ?args, "running");

    let output = Command::new(bin)
        .args(args)
        .output()
        .map_err(|e| CheckError::Collector {
            tool: tool.clone(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CheckError::Collector {
            tool,
            message: format!("exited with {}: {}", output.status, stderr.trim()),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| CheckError::Collector {
        tool,
        message: "output is not valid UTF-8".to_string(),
    })
}

/// Full cluster status as XML, including inactive resources.
pub fn crm_mon_xml(crm_mon: &Path) -> Result<String, CheckError> {
    run(crm_mon, &["-r", "-1", "-X"])
}

/// The maintenance-related lines of `pcs property`.
pub fn pcs_properties(pcs: &Path) -> Result<String, CheckError> {
    run(pcs, &["property"]).map(|out| maintenance_lines(&out))
}

fn maintenance_lines(properties: &str) -> String {
    properties
        .lines()
        .filter(|line| line.contains("maintenance"))
        .map(|line| format!("{line}\n"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn locate_checks_explicit_paths() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("crm_mon");
        std::fs::write(&bin, "").unwrap();

        assert_eq!(locate(&bin).unwrap(), bin);

        let missing = dir.path().join("pcs");
        let err = locate(&missing).unwrap_err();
        assert!(matches!(err, CheckError::ToolNotFound { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn locate_searches_path_for_bare_names() {
        assert!(locate(Path::new("sh")).is_ok());
        assert!(locate(Path::new("definitely-not-a-cluster-tool")).is_err());
    }

    #[test]
    fn run_captures_stdout() {
        let out = run(Path::new("sh"), &["-c", "echo online"]).unwrap();
        assert_eq!(out, "online\n");
    }

    #[test]
    fn run_reports_failures_as_collector_errors() {
        let err = run(Path::new("sh"), &["-c", "echo boom >&2; exit 4"]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("boom"), "{err}");

        let err = run(Path::new("/nonexistent/crm_mon"), &[]).unwrap_err();
        assert!(matches!(err, CheckError::Collector { .. }));
    }

    #[test]
    fn keeps_only_maintenance_lines() {
        let out = "Cluster Properties:\n cluster-name: tripleo\n maintenance-mode: true\n stonith-enabled: false\n";
        assert_eq!(maintenance_lines(out), " maintenance-mode: true\n");
    }
}
