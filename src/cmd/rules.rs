//! Rules command - inspect, export and validate rules documents

use crate::cmd::display::format_rate;
use anyhow::Context;
use chrono::Utc;
use clap::{Args, Subcommand};
use payec::core::{
    default_rules, fingerprint, load_rules, write_rules_document, AllowanceKind, Ceiling,
    PersonalAllowance, RulesDocument, RulesSource,
};
use payec::money::{format_percent, CurrencyFormat, CurrencyFormatter};
use std::path::{Path, PathBuf};
use tabled::{
    settings::{object::Columns, Alignment, Modify, Style},
    Table, Tabled,
};

#[derive(Args, Debug)]
pub struct RulesCommand {
    #[command(subcommand)]
    action: RulesAction,
}

#[derive(Subcommand, Debug)]
enum RulesAction {
    /// Print the resolved rules and their fingerprint
    Show {
        /// Rules document (JSON). Shows the built-in preset if not specified.
        file: Option<PathBuf>,

        /// Output the stored JSON form instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in preset to a file for editing
    Init {
        /// Destination path
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Check a rules document; exits non-zero when it is malformed
    Validate {
        /// Rules document (JSON)
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Tabled)]
struct BracketRow {
    #[tabled(rename = "#")]
    row_num: usize,

    #[tabled(rename = "From")]
    from: String,

    #[tabled(rename = "Up To")]
    up_to: String,

    #[tabled(rename = "Rate")]
    rate: String,
}

impl RulesCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        match &self.action {
            RulesAction::Show { file, json } => show(RulesSource::from(file.clone()), *json),
            RulesAction::Init { path, force } => init(path, *force),
            RulesAction::Validate { file } => validate(file),
        }
    }
}

fn show(source: RulesSource, json: bool) -> anyhow::Result<()> {
    let document = load_rules(&source)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let rules = &document.rules;
    let formatter = CurrencyFormat::for_code(&rules.currency);
    let mut from = rust_decimal::Decimal::ZERO;
    let rows: Vec<_> = rules
        .brackets
        .iter()
        .enumerate()
        .map(|(i, bracket)| {
            let row = BracketRow {
                row_num: i + 1,
                from: formatter.format(from),
                up_to: match bracket.up_to {
                    Ceiling::Bounded(limit) => formatter.format(limit),
                    Ceiling::Unbounded => "and above".to_string(),
                },
                rate: format!("{}%", format_percent(bracket.rate)),
            };
            if let Some(limit) = bracket.up_to.limit() {
                from = limit;
            }
            row
        })
        .collect();

    println!();
    println!("PAYE RULES ({} {})", rules.currency, rules.year);
    println!();
    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    println!("{}", table);
    println!();
    println!(
        "  Pension deductible: {} | NHF deductible: {} | Life assurance cap: {}",
        yes_no(rules.reliefs.pension_is_deductible),
        yes_no(rules.reliefs.nhf_is_deductible),
        rules
            .reliefs
            .life_assurance_cap
            .map_or("none".to_string(), |cap| formatter.format(cap))
    );
    println!(
        "  Personal allowance: {}",
        describe_allowance(&rules.personal_allowance)
    );
    if let Some(updated_at) = document.updated_at {
        println!(
            "  Updated: {}{}",
            updated_at.format("%Y-%m-%d %H:%M UTC"),
            document
                .updated_by
                .as_ref()
                .map_or(String::new(), |by| format!(" by {by}"))
        );
    }
    println!("  Fingerprint: {}", fingerprint(rules)?);
    println!();
    Ok(())
}

fn init(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to overwrite",
            path.display()
        );
    }
    let document = RulesDocument::stamped(default_rules(), Utc::now());
    write_rules_document(path, &document)?;
    println!("Rules preset written to: {}", path.display());
    Ok(())
}

fn validate(file: &Path) -> anyhow::Result<()> {
    let document = load_rules(&RulesSource::File(file.to_path_buf()))
        .with_context(|| format!("validation failed for {}", file.display()))?;
    println!(
        "\u{2713} {} rules for {} are valid ({} brackets)",
        document.rules.currency,
        document.rules.year,
        document.rules.brackets.len()
    );
    Ok(())
}

fn describe_allowance(allowance: &PersonalAllowance) -> String {
    match allowance.kind {
        AllowanceKind::Hybrid => format!(
            "{} value {} rate {}",
            allowance.kind.as_str(),
            allowance.value,
            format_rate(allowance.rate)
        ),
        _ => format!("{} value {}", allowance.kind.as_str(), allowance.value),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
