//! `pcmk-health codes`: print the OCF return-code table.

use anyhow::Result;
use colored::Colorize;

use crate::domain::ocf::ReturnCode;

pub fn run() -> Result<i32> {
    println!("{}", "OCF return codes:".bold());
    println!();

    for rc in ReturnCode::ALL {
        let name = if rc.is_expected() {
            rc.name().green().bold()
        } else {
            rc.name().yellow().bold()
        };
        println!("  {:>2}  {}", rc.code(), name);
    }

    println!();
    println!(
        "{} History inspection (--history) reports every code except {} and {}.",
        "::".blue().bold(),
        ReturnCode::Success,
        ReturnCode::RunningMaster
    );
    Ok(0)
}
