//! HTML report generation for a calculation
//!
//! Generates a self-contained HTML file with the audit trail and the raw
//! outputs embedded as JSON.

use crate::cmd::display::{format_rate, CalcReport};
use crate::cmd::{read_inputs, RulesArgs};
use clap::Args;
use payec::core::{fingerprint, CalcOutputs};
use payec::money::{CurrencyFormat, CurrencyFormatter};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct HtmlCommand {
    /// Inputs file (JSON). Reads from stdin if not specified.
    #[arg(default_value = "-")]
    file: PathBuf,

    #[command(flatten)]
    rules: RulesArgs,

    /// Output file path (default: opens in browser)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl HtmlCommand {
    pub fn exec(&self) -> anyhow::Result<()> {
        let inputs = read_inputs(&self.file)?;
        let document = self.rules.load()?;
        let calculator = self.rules.calculator();
        let outputs = calculator.compute(&inputs, &document.rules);
        let fingerprint = fingerprint(&document.rules)?;

        let report = CalcReport {
            rules_fingerprint: &fingerprint,
            allowance_applied: calculator.allowance() == payec::tax::AllowanceMode::Applied,
            outputs: &outputs,
        };
        let html = generate(&report)?;

        if let Some(ref output_path) = self.output {
            std::fs::write(output_path, &html)?;
            println!("HTML report written to: {}", output_path.display());
        } else {
            let temp_path = std::env::temp_dir().join("payec-report.html");
            std::fs::write(&temp_path, &html)?;
            opener::open(&temp_path)?;
            println!("Opened HTML report in browser: {}", temp_path.display());
        }

        Ok(())
    }
}

/// Generate HTML report content
pub fn generate(report: &CalcReport) -> anyhow::Result<String> {
    let outputs = report.outputs;
    let formatter = CurrencyFormat::for_code(&outputs.currency);
    // Keeps the embedded JSON from closing the script element early.
    let json_data = serde_json::to_string(report)?.replace("</", "<\\/");

    Ok(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>PAYE Tax Breakdown</title>
    <style>
{css}
    </style>
</head>
<body>
    <header>
        <h1>PAYE Tax Breakdown</h1>
        <p class="meta">{currency} {year} &middot; {allowance} &middot; rules {fingerprint}</p>
    </header>

    <main>
        <section class="summary-cards">
            <div class="card"><h3>Annual Tax</h3><p class="value">{annual}</p></div>
            <div class="card"><h3>Monthly Tax</h3><p class="value">{monthly}</p></div>
            <div class="card"><h3>Taxable Income</h3><p class="value">{taxable}</p></div>
            <div class="card"><h3>Effective Rate</h3><p class="value">{rate}</p></div>
        </section>

        <table>
            <thead><tr><th>#</th><th>Item</th><th class="num">Amount</th></tr></thead>
            <tbody>
{rows}
            </tbody>
        </table>

        <p class="note">{note}</p>
    </main>

    <script id="report-data" type="application/json">{json_data}</script>
</body>
</html>
"##,
        css = CSS,
        currency = escape(&outputs.currency),
        year = outputs.year,
        allowance = if report.allowance_applied {
            "allowance applied"
        } else {
            "allowance not applied"
        },
        fingerprint = escape(report.rules_fingerprint),
        annual = escape(&formatter.format(outputs.annual_tax)),
        monthly = escape(&formatter.format(outputs.monthly_tax)),
        taxable = escape(&formatter.format(outputs.taxable_income)),
        rate = format_rate(outputs.effective_rate),
        rows = line_item_rows(outputs, &formatter),
        note = escape(&outputs.assumptions_note),
        json_data = json_data,
    ))
}

fn line_item_rows(outputs: &CalcOutputs, formatter: &CurrencyFormat) -> String {
    outputs
        .line_items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let class = if item.is_deduction { " class=\"deduction\"" } else { "" };
            format!(
                "                <tr{class}><td>{}</td><td>{}</td><td class=\"num\">{}</td></tr>",
                i + 1,
                escape(&item.label),
                escape(&formatter.format(item.amount))
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const CSS: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", sans-serif; margin: 0; color: #1f2933; background: #f5f7fa; }
        header { background: #102a43; color: #fff; padding: 1.5rem 2rem; }
        header h1 { margin: 0 0 .25rem; font-size: 1.5rem; }
        .meta { margin: 0; opacity: .8; font-size: .9rem; }
        main { padding: 1.5rem 2rem; max-width: 960px; }
        .summary-cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
        .card { background: #fff; border-radius: 8px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }
        .card h3 { margin: 0; font-size: .8rem; text-transform: uppercase; color: #627d98; }
        .card .value { margin: .5rem 0 0; font-size: 1.3rem; font-weight: 600; }
        table { width: 100%; border-collapse: collapse; background: #fff; border-radius: 8px; overflow: hidden; }
        th, td { padding: .6rem .9rem; border-bottom: 1px solid #e4e7eb; text-align: left; }
        th { background: #f0f4f8; font-size: .8rem; text-transform: uppercase; color: #486581; }
        .num { text-align: right; font-variant-numeric: tabular-nums; }
        tr.deduction td { color: #9b2c2c; }
        .note { font-size: .85rem; color: #627d98; margin-top: 1rem; }
"#;
