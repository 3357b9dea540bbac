//! Batch recalculation of salary earners read from CSV

use crate::core::{CalcInputs, PayeRules, Period, SalaryInputs};
use crate::money::CurrencyFormatter;
use crate::tax::Calculator;
use payec_derive::FieldSchema;
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::io::Read;

/// Describes one column of a flat record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub kind: &'static str,
    pub description: &'static str,
}

/// One salary earner per CSV row
#[derive(Debug, Clone, PartialEq, Deserialize, FieldSchema)]
pub struct SalaryRecord {
    /// Employee or record identifier, echoed in the results
    pub id: String,
    /// Period the amounts are stated in: monthly or annual
    pub period: Period,
    /// Basic salary
    pub basic: Decimal,
    /// Housing allowance
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub housing: Decimal,
    /// Transport allowance
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub transport: Decimal,
    /// Other allowances
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub other: Decimal,
    /// Bonus
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub bonus: Decimal,
    /// Pension contribution as a percentage of gross (0-100)
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub pension_pct: Decimal,
    /// Deduct National Housing Fund contributions (true/false)
    #[serde(default, deserialize_with = "blank_as_false")]
    pub nhf_enabled: bool,
    /// NHF amount per period; 2.5% of gross when blank
    #[serde(default)]
    pub nhf_amount: Option<Decimal>,
    /// Life assurance premium per period
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub life_assurance: Decimal,
    /// Voluntary contribution per period
    #[serde(default, deserialize_with = "blank_as_zero")]
    pub voluntary_contrib: Decimal,
}

impl From<&SalaryRecord> for CalcInputs {
    fn from(record: &SalaryRecord) -> Self {
        CalcInputs::Salary(SalaryInputs {
            period: record.period,
            basic: record.basic,
            housing: record.housing,
            transport: record.transport,
            other: record.other,
            bonus: record.bonus,
            pension_pct: record.pension_pct,
            nhf_enabled: record.nhf_enabled,
            nhf_amount: record.nhf_amount,
            life_assurance: record.life_assurance,
            voluntary_contrib: record.voluntary_contrib,
        })
    }
}

fn blank_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    Ok(Option::<Decimal>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

/// Summary of one recalculated record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub id: String,
    pub gross_income: Decimal,
    pub total_deductions: Decimal,
    pub taxable_income: Decimal,
    pub annual_tax: Decimal,
    pub monthly_tax: Decimal,
    pub effective_rate: Decimal,
}

pub fn read_salary_records<R: Read>(reader: R) -> anyhow::Result<Vec<SalaryRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut records = Vec::new();
    for (row, result) in rdr.deserialize().enumerate() {
        let record: SalaryRecord =
            result.map_err(|e| anyhow::anyhow!("row {}: {}", row + 1, e))?;
        CalcInputs::from(&record)
            .validate()
            .map_err(|e| anyhow::anyhow!("row {} ({}): {}", row + 1, record.id, e))?;
        records.push(record);
    }
    log::info!("Read {} salary records", records.len());
    Ok(records)
}

/// Recalculate every record in parallel; results keep input order
pub fn run_batch<F>(
    records: &[SalaryRecord],
    rules: &PayeRules,
    calculator: &Calculator<F>,
) -> Vec<BatchResult>
where
    F: CurrencyFormatter + Sync,
{
    records
        .par_iter()
        .map(|record| {
            let outputs = calculator.compute(&CalcInputs::from(record), rules);
            BatchResult {
                id: record.id.clone(),
                gross_income: outputs.gross_income,
                total_deductions: outputs.total_deductions,
                taxable_income: outputs.taxable_income,
                annual_tax: outputs.annual_tax,
                monthly_tax: outputs.monthly_tax,
                effective_rate: outputs.effective_rate,
            }
        })
        .collect()
}
