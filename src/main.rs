mod commands;
mod config;
mod domain;
mod error;
mod logging;
mod tools;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;

use commands::RuleArgs;

#[derive(Parser)]
#[command(name = "pcmk-health", version, about = "Check Pacemaker cluster health")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the local cluster via crm_mon and pcs
    Check {
        /// crm_mon binary (overrides config, default /sbin/crm_mon)
        #[arg(long, value_name = "BIN")]
        crm_mon: Option<PathBuf>,

        /// pcs binary (overrides config, default /sbin/pcs)
        #[arg(long, value_name = "BIN")]
        pcs: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Debug output
        #[arg(long, short)]
        debug: bool,

        /// Path to config file (default: ~/.config/pcmk-health/config.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Evaluate a saved `crm_mon -r -1 -X` dump
    Evaluate {
        /// crm_mon XML file, or - for stdin
        #[arg(long, value_name = "FILE")]
        snapshot: PathBuf,

        /// Saved `pcs property` output used for the maintenance-mode check
        #[arg(long, value_name = "FILE")]
        properties: Option<PathBuf>,

        #[command(flatten)]
        rules: RuleArgs,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,

        /// Debug output
        #[arg(long, short)]
        debug: bool,

        /// Path to config file (default: ~/.config/pcmk-health/config.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List OCF return codes
    Codes,
}

fn run(cli: Cli) -> anyhow::Result<i32> {
    match cli.command {
        Commands::Check {
            crm_mon,
            pcs,
            rules,
            format,
            debug,
            config,
        } => commands::check::run(crm_mon, pcs, &rules, format.parse()?, debug, config),
        Commands::Evaluate {
            snapshot,
            properties,
            rules,
            format,
            debug,
            config,
        } => commands::evaluate::run(
            &snapshot,
            properties.as_deref(),
            &rules,
            format.parse()?,
            debug,
            config,
        ),
        Commands::Codes => commands::codes::run(),
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            error::exit_code_for(&e)
        }
    };

    std::process::exit(code);
}
