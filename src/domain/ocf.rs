//! OCF return codes reported by resource agents.
//!
//! Pacemaker records the agent's exit code for every operation it runs. Only
//! codes 0–9 are defined by the OCF resource-agent API; anything else in the
//! operation history is a data-quality problem and is reported as such.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnCode {
    Success,
    ErrGeneric,
    ErrArgs,
    ErrUnimplemented,
    ErrPerm,
    ErrInstalled,
    ErrConfigured,
    NotRunning,
    RunningMaster,
    FailedMaster,
}

impl ReturnCode {
    pub const ALL: [ReturnCode; 10] = [
        ReturnCode::Success,
        ReturnCode::ErrGeneric,
        ReturnCode::ErrArgs,
        ReturnCode::ErrUnimplemented,
        ReturnCode::ErrPerm,
        ReturnCode::ErrInstalled,
        ReturnCode::ErrConfigured,
        ReturnCode::NotRunning,
        ReturnCode::RunningMaster,
        ReturnCode::FailedMaster,
    ];

    /// Resolve a raw exit code. `None` for codes outside the OCF table.
    pub fn from_code(code: i64) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Self::ALL.get(idx).copied())
    }

    pub fn code(self) -> i64 {
        self as i64
    }

    pub fn name(self) -> &'static str {
        match self {
            ReturnCode::Success => "SUCCESS",
            ReturnCode::ErrGeneric => "ERR_GENERIC",
            ReturnCode::ErrArgs => "ERR_ARGS",
            ReturnCode::ErrUnimplemented => "ERR_UNIMPLEMENTED",
            ReturnCode::ErrPerm => "ERR_PERM",
            ReturnCode::ErrInstalled => "ERR_INSTALLED",
            ReturnCode::ErrConfigured => "ERR_CONFIGURED",
            ReturnCode::NotRunning => "NOT_RUNNING",
            ReturnCode::RunningMaster => "RUNNING_MASTER",
            ReturnCode::FailedMaster => "FAILED_MASTER",
        }
    }

    /// SUCCESS and RUNNING_MASTER are the two outcomes a healthy history holds.
    pub fn is_expected(self) -> bool {
        matches!(self, ReturnCode::Success | ReturnCode::RunningMaster)
    }
}

impl fmt::Display for ReturnCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_matches_ocf_numbering() {
        let names: Vec<(i64, &str)> = ReturnCode::ALL
            .iter()
            .map(|rc| (rc.code(), rc.name()))
            .collect();
        assert_eq!(
            names,
            vec![
                (0, "SUCCESS"),
                (1, "ERR_GENERIC"),
                (2, "ERR_ARGS"),
                (3, "ERR_UNIMPLEMENTED"),
                (4, "ERR_PERM"),
                (5, "ERR_INSTALLED"),
                (6, "ERR_CONFIGURED"),
                (7, "NOT_RUNNING"),
                (8, "RUNNING_MASTER"),
                (9, "FAILED_MASTER"),
            ]
        );
    }

    #[test]
    fn out_of_table_codes_do_not_resolve() {
        assert_eq!(ReturnCode::from_code(7), Some(ReturnCode::NotRunning));
        assert_eq!(ReturnCode::from_code(10), None);
        assert_eq!(ReturnCode::from_code(-1), None);
        assert_eq!(ReturnCode::from_code(193), None);
    }

    #[test]
    fn only_success_and_running_master_are_expected() {
        let expected: Vec<ReturnCode> = ReturnCode::ALL
            .into_iter()
            .filter(|rc| rc.is_expected())
            .collect();
        assert_eq!(expected, vec![ReturnCode::Success, ReturnCode::RunningMaster]);
    }
}
