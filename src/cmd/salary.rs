//! Salary command - compute PAYE for a salary earner described by flags

use crate::cmd::display::{print_breakdown, print_json};
use crate::cmd::RulesArgs;
use clap::Args;
use payec::core::{fingerprint, CalcInputs, Period, SalaryInputs};
use rust_decimal::Decimal;

#[derive(Args, Debug)]
pub struct SalaryCommand {
    /// Basic salary
    #[arg(long)]
    basic: Decimal,

    /// Housing allowance
    #[arg(long, default_value_t = Decimal::ZERO)]
    housing: Decimal,

    /// Transport allowance
    #[arg(long, default_value_t = Decimal::ZERO)]
    transport: Decimal,

    /// Other allowances
    #[arg(long, default_value_t = Decimal::ZERO)]
    other: Decimal,

    /// Bonus
    #[arg(long, default_value_t = Decimal::ZERO)]
    bonus: Decimal,

    /// Amounts are per month rather than per year
    #[arg(short, long)]
    monthly: bool,

    /// Pension contribution as a percentage of gross (e.g. 8)
    #[arg(long, default_value_t = Decimal::ZERO)]
    pension_pct: Decimal,

    /// Deduct National Housing Fund contributions
    #[arg(long)]
    nhf: bool,

    /// NHF amount per period, instead of 2.5% of gross
    #[arg(long, requires = "nhf")]
    nhf_amount: Option<Decimal>,

    /// Life assurance premium per period
    #[arg(long, default_value_t = Decimal::ZERO)]
    life_assurance: Decimal,

    /// Voluntary contribution per period
    #[arg(long, default_value_t = Decimal::ZERO)]
    voluntary: Decimal,

    #[command(flatten)]
    rules: RulesArgs,

    /// Output as JSON instead of formatted table
    #[arg(long)]
    json: bool,
}

impl SalaryCommand {
    fn inputs(&self) -> CalcInputs {
        CalcInputs::Salary(SalaryInputs {
            period: if self.monthly {
                Period::Monthly
            } else {
                Period::Annual
            },
            basic: self.basic,
            housing: self.housing,
            transport: self.transport,
            other: self.other,
            bonus: self.bonus,
            pension_pct: self.pension_pct,
            nhf_enabled: self.nhf,
            nhf_amount: self.nhf_amount,
            life_assurance: self.life_assurance,
            voluntary_contrib: self.voluntary,
        })
    }

    pub fn exec(&self) -> anyhow::Result<()> {
        let inputs = self.inputs();
        inputs.validate()?;
        let document = self.rules.load()?;
        let calculator = self.rules.calculator();
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
