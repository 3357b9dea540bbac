//! PAYE computation: gross income, deductions, taxable income, brackets.

use super::brackets::apply_brackets;
use super::reliefs;
use crate::core::{
    CalcInputs, CalcOutputs, LineItem, NonSalaryInputs, PayeRules, ReliefGates, SalaryInputs,
};
use crate::money::{format_percent, CurrencyFormat, CurrencyFormatter};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const NHF_DEFAULT_RATE: Decimal = dec!(0.025);

/// Whether the configured personal allowance is subtracted from taxable income.
///
/// The production calculator ignores it while the historical test figures
/// assume it is applied; both are available until that is settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AllowanceMode {
    #[default]
    Ignored,
    Applied,
}

/// Configured tax calculator. Holds no per-call state, so one value can be
/// shared across threads.
#[derive(Debug, Clone, Default)]
pub struct Calculator<F = CurrencyFormat> {
    allowance: AllowanceMode,
    formatter: Option<F>,
}

impl Calculator<CurrencyFormat> {
    pub fn new() -> Self {
        Calculator::default()
    }
}

impl<F> Calculator<F> {
    pub fn with_allowance(mut self, allowance: AllowanceMode) -> Self {
        self.allowance = allowance;
        self
    }

    /// Use `formatter` for amounts in labels instead of the rules' currency
    pub fn with_formatter<G: CurrencyFormatter>(self, formatter: G) -> Calculator<G> {
        Calculator {
            allowance: self.allowance,
            formatter: Some(formatter),
        }
    }

    pub fn allowance(&self) -> AllowanceMode {
        self.allowance
    }
}

impl<F: CurrencyFormatter> Calculator<F> {
    pub fn compute(&self, inputs: &CalcInputs, rules: &PayeRules) -> CalcOutputs {
        match &self.formatter {
            Some(formatter) => self.compute_with(inputs, rules, formatter),
            None => self.compute_with(inputs, rules, &CurrencyFormat::for_code(&rules.currency)),
        }
    }

    fn compute_with(
        &self,
        inputs: &CalcInputs,
        rules: &PayeRules,
        formatter: &dyn CurrencyFormatter,
    ) -> CalcOutputs {
        let mut items = Vec::new();

        let gross_income = gross_income(inputs);
        items.push(LineItem::new("Income Amount", gross_income));

        let total_deductions = match inputs {
            CalcInputs::Salary(salary) => {
                salary_deductions(salary, gross_income, &rules.reliefs, &mut items)
            }
            CalcInputs::NonSalary(non_salary) => non_salary_deductions(non_salary, &mut items),
        };

        let (personal_allowance, taxable_income) = match self.allowance {
            AllowanceMode::Ignored => (Decimal::ZERO, gross_income - total_deductions),
            AllowanceMode::Applied => {
                let allowance = rules.personal_allowance.amount_for(gross_income);
                if allowance > Decimal::ZERO {
                    items.push(LineItem::deduction("Personal Allowance", allowance));
                }
                let taxable = (gross_income - total_deductions - allowance).max(Decimal::ZERO);
                (allowance, taxable)
            }
        };
        items.push(LineItem::new("Taxable Income", taxable_income));

        let brackets = apply_brackets(taxable_income, &rules.brackets);
        for slice in &brackets.slices {
            items.push(LineItem::new(
                format!(
                    "Tax on {} @ {}%",
                    formatter.format(slice.taxable),
                    format_percent(slice.rate)
                ),
                slice.tax,
            ));
        }

        let annual_tax = brackets.total;
        let effective_rate = if gross_income > Decimal::ZERO {
            annual_tax / gross_income
        } else {
            Decimal::ZERO
        };
        log::debug!(
            "Computed {:?} tax: gross={}, deductions={}, taxable={}, annual={}",
            inputs.earner_type(),
            gross_income,
            total_deductions,
            taxable_income,
            annual_tax
        );

        CalcOutputs {
            currency: rules.currency.clone(),
            year: rules.year,
            gross_income,
            total_deductions,
            personal_allowance,
            taxable_income,
            annual_tax,
            monthly_tax: annual_tax / dec!(12),
            effective_rate,
            line_items: items,
            assumptions_note: rules.notes.clone(),
        }
    }
}

/// Compute tax with the default calculator: allowance ignored, amounts
/// formatted in the rules' currency.
///
/// Expects inputs that pass [`CalcInputs::validate`] and rules that pass
/// [`PayeRules::validate`].
pub fn compute_tax(inputs: &CalcInputs, rules: &PayeRules) -> CalcOutputs {
    Calculator::new().compute(inputs, rules)
}

/// Annual gross income for either earner type
pub fn gross_income(inputs: &CalcInputs) -> Decimal {
    match inputs {
        CalcInputs::Salary(salary) => salary.period_total() * salary.period.multiplier(),
        CalcInputs::NonSalary(non_salary) => non_salary.gross_income,
    }
}

fn salary_deductions(
    salary: &SalaryInputs,
    gross_income: Decimal,
    gates: &ReliefGates,
    items: &mut Vec<LineItem>,
) -> Decimal {
    let multiplier = salary.period.multiplier();
    let mut total = Decimal::ZERO;
    let mut apply = |label: String, amount: Decimal| {
        total += amount;
        items.push(LineItem::deduction(label, amount));
    };

    if gates.pension_is_deductible && salary.pension_pct > Decimal::ZERO {
        apply(
            format!("Pension Contribution ({}%)", salary.pension_pct.normalize()),
            gross_income * salary.pension_pct / dec!(100),
        );
    }

    if gates.nhf_is_deductible && salary.nhf_enabled {
        let nhf = match salary.nhf_amount {
            Some(amount) if amount > Decimal::ZERO => amount * multiplier,
            _ => gross_income * NHF_DEFAULT_RATE,
        };
        apply("National Housing Fund (NHF)".to_string(), nhf);
    }

    if salary.life_assurance > Decimal::ZERO {
        let annual = salary.life_assurance * multiplier;
        let amount = gates
            .life_assurance_cap
            .map_or(annual, |cap| annual.min(cap));
        apply("Life Assurance Premium".to_string(), amount);
    }

    if salary.voluntary_contrib > Decimal::ZERO {
        apply(
            "Voluntary Contribution".to_string(),
            salary.voluntary_contrib * multiplier,
        );
    }

    if total > Decimal::ZERO {
        items.push(LineItem::deduction("Total Deductions", total));
    }
    total
}

fn non_salary_deductions(non_salary: &NonSalaryInputs, items: &mut Vec<LineItem>) -> Decimal {
    let mut total = Decimal::ZERO;
    for claim in &non_salary.reliefs {
        let relief = reliefs::resolve(claim);
        if relief.amount > Decimal::ZERO {
            log::debug!("Relief {:?}: claimed={}, allowed={}", claim.kind, claim.amount, relief.amount);
            total += relief.amount;
            items.push(LineItem::deduction(relief.label, relief.amount));
        } else {
            log::debug!("Relief {:?} resolved to zero, skipped", claim.kind);
        }
    }
    total
}
