//! Schema command - print expected input formats

use clap::Args;
use payec::batch::SalaryRecord;
use payec::core::{CalcInputs, ReliefType, RulesDocument};
use schemars::schema_for;

#[derive(Args, Debug)]
pub struct SchemaCommand {
    /// What to describe
    #[arg(value_enum, default_value = "inputs")]
    format: SchemaFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum SchemaFormat {
    /// JSON Schema for calculation inputs
    Inputs,
    /// JSON Schema for rules documents
    Rules,
    /// CSV header row for batch input
    CsvHeader,
    /// CSV column descriptions for batch input
    CsvFields,
}

impl SchemaCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match self.format {
            SchemaFormat::Inputs => {
                let schema = schema_for!(CalcInputs);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::Rules => {
                let schema = schema_for!(RulesDocument);
                println!("{}", serde_json::to_string_pretty(&schema)?);
            }
            SchemaFormat::CsvHeader => self.print_csv_header(),
            SchemaFormat::CsvFields => self.print_csv_fields()?,
        }
        Ok(())
    }

    fn print_csv_header(&self) {
        let columns: Vec<_> = SalaryRecord::field_schema().iter().map(|f| f.name).collect();
        println!("{}", columns.join(","));
    }

    fn print_csv_fields(&self) -> anyhow::Result<()> {
        println!("Batch CSV Input Format");
        println!("======================");
        println!();
        for field in SalaryRecord::field_schema() {
            let req = if field.required { "required" } else { "optional" };
            println!(
                "{:18} ({:8}, {:7})  {}",
                field.name, req, field.kind, field.description
            );
        }
        println!();
        println!("Relief types accepted in JSON inputs (non-salary earners):");
        for kind in ReliefType::ALL {
            println!("  {}", serde_json::to_string(&kind)?.trim_matches('"'));
        }
        Ok(())
    }
}
