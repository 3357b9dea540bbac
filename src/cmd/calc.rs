//! Calc command - compute tax for a JSON inputs document

use crate::cmd::display::{print_breakdown, print_json};
use crate::cmd::{read_inputs, RulesArgs};
use clap::Args;
use payec::core::fingerprint;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct CalcCommand {
    /// Inputs file (JSON). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    #[command(flatten)]
    rules: RulesArgs,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl CalcCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let inputs = read_inputs(&self.file)?;
        let document = self.rules.load()?;
        let calculator = self.rules.calculator();

        log::info!(
            "Computing {:?} tax for {} {}",
            inputs.earner_type(),
            document.rules.currency,
            document.rules.year
        );
        let outputs = calculator.compute(&inputs, &document.rules);
        let fingerprint = fingerprint(&document.rules)?;

        if self.json {
            print_json(&outputs, &fingerprint, calculator.allowance())
        } else {
            print_breakdown(&outputs, &fingerprint, calculator.allowance());
            Ok(())
        }
    }
}
