use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser, Debug)]
#[command(name = "payec", version, about = "PAYE Personal Income Tax Calculator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute tax from a JSON inputs document
    Calc(cmd::calc::CalcCommand),
    /// Compute tax for a salary earner described by flags
    Salary(cmd::salary::SalaryCommand),
    /// Recalculate salary earners from a CSV file
    Batch(cmd::batch::BatchCommand),
    /// Inspect, export and validate rules documents
    Rules(cmd::rules::RulesCommand),
    /// Print expected input formats
    Schema(cmd::schema::SchemaCommand),
    /// Generate an HTML breakdown report
    Html(cmd::html_report::HtmlCommand),
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Calc(cmd) => cmd.exec(),
        Command::Salary(cmd) => cmd.exec(),
        Command::Batch(cmd) => cmd.exec(),
        Command::Rules(cmd) => cmd.exec(),
        Command::Schema(cmd) => cmd.exec(),
        Command::Html(cmd) => cmd.exec(),
    }
}
