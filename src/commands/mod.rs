pub mod check;
pub mod codes;
pub mod evaluate;
pub mod report;

use clap::Args;

use crate::config::Config;
use crate::domain::rules::CheckOptions;

/// Rule selection shared by `check` and `evaluate`.
#[derive(Debug, Clone, Default, Args)]
pub struct RuleArgs {
    /// Check only this resource or clone id (node checks are skipped)
    #[arg(long, value_name = "ID")]
    pub resource: Option<String>,

    /// Require stonith to be enabled and configured for every node
    #[arg(long)]
    pub stonith: bool,

    /// Stonith agent to count as fencing device (overrides config, only used with --stonith)
    #[arg(long, value_name = "AGENT")]
    pub stonith_agent: Option<String>,

    /// Report failed operations from the resource history
    #[arg(long)]
    pub history: bool,
}

impl RuleArgs {
    pub fn options(&self, config: &Config) -> CheckOptions {
        CheckOptions {
            resource: self.resource.clone(),
            stonith: self.stonith,
            stonith_agent: self
                .stonith_agent
                .clone()
                .unwrap_or_else(|| config.stonith_agent.clone()),
            history: self.history,
        }
    }
}

/// Log level for a run: `--debug` beats the configured level.
fn log_level(debug: bool, config: &Config) -> &str {
    if debug {
        "debug"
    } else {
        &config.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn flags_override_config_agent() {
        let config = Config {
            stonith_agent: "stonith:fence_xvm".into(),
            ..Config::default()
        };

        let args = RuleArgs {
            stonith: true,
            ..RuleArgs::default()
        };
        assert_eq!(args.options(&config).stonith_agent, "stonith:fence_xvm");

        let args = RuleArgs {
            stonith_agent: Some("stonith:fence_ipmilan".into()),
            ..args
        };
        assert_eq!(args.options(&config).stonith_agent, "stonith:fence_ipmilan");
    }

    #[test]
    fn debug_flag_wins() {
        let config = Config::default();
        assert_eq!(log_level(true, &config), "debug");
        assert_eq!(log_level(false, &config), "info");
    }
}
