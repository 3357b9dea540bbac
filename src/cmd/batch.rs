//! Batch command - recalculate many salary earners from CSV

use crate::cmd::display::{format_rate, short_fingerprint};
use crate::cmd::RulesArgs;
use clap::Args;
use payec::batch::{read_salary_records, run_batch, BatchResult};
use payec::core::fingerprint;
use payec::money::{CurrencyFormat, CurrencyFormatter};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct BatchCommand {
    /// CSV file with one salary earner per row (see `payec schema csv-fields`)
    file: PathBuf,

    #[command(flatten)]
    rules: RulesArgs,

    /// Output as CSV instead of formatted table
    #[arg(long)]
    csv: bool,
}

impl BatchCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let file = File::open(&self.file)?;
        let records = read_salary_records(BufReader::new(file))?;
        let document = self.rules.load()?;
        let results = run_batch(&records, &document.rules, &self.rules.calculator());

        if self.csv {
            self.write_csv(&results)
        } else {
            let formatter = CurrencyFormat::for_code(&document.rules.currency);
            self.print_table(&results, &formatter);
            println!(
                "  {} records | Rules: {}",
                results.len(),
                short_fingerprint(&fingerprint(&document.rules)?)
            );
            Ok(())
        }
    }

    fn print_table(&self, results: &[BatchResult], formatter: &CurrencyFormat) {
        if results.is_empty() {
            println!("No records found");
            return;
        }

        let rows: Vec<_> = results
            .iter()
            .map(|r| BatchRow::new(r, formatter))
            .collect();
        let table = Table::new(rows)
            .with(Style::rounded())
            .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
            .to_string();
        println!("{}", table);
    }

    fn write_csv(&self, results: &[BatchResult]) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_writer(io::stdout());
        for result in results {
            wtr.serialize(result)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Tabled)]
struct BatchRow {
    #[tabled(rename = "ID")]
    id: String,

    #[tabled(rename = "Gross")]
    gross: String,

    #[tabled(rename = "Deductions")]
    deductions: String,

    #[tabled(rename = "Taxable")]
    taxable: String,

    #[tabled(rename = "Annual Tax")]
    annual_tax: String,

    #[tabled(rename = "Monthly Tax")]
    monthly_tax: String,

    #[tabled(rename = "Eff. Rate")]
    effective_rate: String,
}

impl BatchRow {
    fn new(result: &BatchResult, formatter: &CurrencyFormat) -> Self {
        BatchRow {
            id: result.id.clone(),
            gross: formatter.format(result.gross_income),
            deductions: formatter.format(result.total_deductions),
            taxable: formatter.format(result.taxable_income),
            annual_tax: formatter.format(result.annual_tax),
            monthly_tax: formatter.format(result.monthly_tax),
            effective_rate: format_rate(result.effective_rate),
        }
    }
}
