pub mod batch;
pub mod calc;
pub mod display;
pub mod html_report;
pub mod rules;
pub mod salary;
pub mod schema;

use anyhow::Context;
use clap::Args;
use payec::core::{load_rules, CalcInputs, RulesDocument, RulesSource};
use payec::tax::{AllowanceMode, Calculator};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Options shared by every command that runs a calculation
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Rules document (JSON). Uses the built-in preset if not specified.
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Subtract the configured personal allowance from taxable income
    #[arg(long)]
    apply_allowance: bool,
}

impl RulesArgs {
    pub fn load(&self) -> anyhow::Result<RulesDocument> {
        load_rules(&RulesSource::from(self.rules.clone()))
    }

    pub fn allowance_mode(&self) -> AllowanceMode {
        if self.apply_allowance {
            AllowanceMode::Applied
        } else {
            AllowanceMode::Ignored
        }
    }

    pub fn calculator(&self) -> Calculator {
        Calculator::new().with_allowance(self.allowance_mode())
    }
}

/// Read and validate calculation inputs (JSON) from a file, or stdin with "-"
pub fn read_inputs(path: &Path) -> anyhow::Result<CalcInputs> {
    let inputs = if path.as_os_str() == "-" {
        read_from_stdin()?
    } else {
        let file = File::open(path)?;
        serde_json::from_reader(BufReader::new(file))?
    };
    inputs
        .validate()
        .with_context(|| format!("invalid inputs in {}", path.display()))?;
    Ok(inputs)
}

fn read_from_stdin() -> anyhow::Result<CalcInputs> {
    let stdin = io::stdin();
    let mut reader = BufReader::new(stdin.lock());

    let mut buffer = Vec::new();
    reader.read_to_end(&mut buffer)?;

    if buffer.is_empty() {
        anyhow::bail!("No input received. Provide a file or pipe data to stdin.");
    }

    Ok(serde_json::from_slice(&buffer)?)
}
