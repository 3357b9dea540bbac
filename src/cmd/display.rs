//! Terminal and JSON rendering of a calculation

use payec::core::{CalcOutputs, LineItem};
use payec::money::{CurrencyFormat, CurrencyFormatter};
use payec::tax::AllowanceMode;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

/// Row for the line item table
#[derive(Debug, Clone, Tabled)]
pub struct LineItemRow {
    #[tabled(rename = "#")]
    pub row_num: usize,

    #[tabled(rename = "Item")]
    pub label: String,

    #[tabled(rename = "Amount")]
    pub amount: String,
}

impl LineItemRow {
    fn new(row_num: usize, item: &LineItem, formatter: &CurrencyFormat) -> Self {
        let amount = formatter.format(item.amount);
        LineItemRow {
            row_num,
            label: item.label.clone(),
            amount: if item.is_deduction {
                format!("({amount})")
            } else {
                amount
            },
        }
    }
}

/// JSON report: the outputs plus how they were produced
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalcReport<'a> {
    pub rules_fingerprint: &'a str,
    pub allowance_applied: bool,
    #[serde(flatten)]
    pub outputs: &'a CalcOutputs,
}

pub fn print_json(
    outputs: &CalcOutputs,
    fingerprint: &str,
    allowance: AllowanceMode,
) -> anyhow::Result<()> {
    let report = CalcReport {
        rules_fingerprint: fingerprint,
        allowance_applied: allowance == AllowanceMode::Applied,
        outputs,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_breakdown(outputs: &CalcOutputs, fingerprint: &str, allowance: AllowanceMode) {
    let formatter = CurrencyFormat::for_code(&outputs.currency);
    let rows: Vec<_> = outputs
        .line_items
        .iter()
        .enumerate()
        .map(|(i, item)| LineItemRow::new(i + 1, item, &formatter))
        .collect();

    let allowance_str = match allowance {
        AllowanceMode::Applied => "allowance applied",
        AllowanceMode::Ignored => "allowance not applied",
    };

    println!();
    println!(
        "PAYE BREAKDOWN ({} {}) - {}",
        outputs.currency, outputs.year, allowance_str
    );
    println!();

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();

    println!(
        "  Annual Tax: {} | Monthly Tax: {}",
        formatter.format(outputs.annual_tax),
        formatter.format(outputs.monthly_tax)
    );
    println!(
        "  Taxable Income: {} | Effective Rate: {}",
        formatter.format(outputs.taxable_income),
        format_rate(outputs.effective_rate)
    );
    println!("  Rules: {}", short_fingerprint(fingerprint));
    if !outputs.assumptions_note.is_empty() {
        println!();
        println!("  {}", outputs.assumptions_note);
    }
    println!();
}

pub fn format_rate(rate: Decimal) -> String {
    format!("{:.2}%", rate * Decimal::ONE_HUNDRED)
}

pub fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
