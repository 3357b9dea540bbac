use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Result of a tax computation, including the full audit trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalcOutputs {
    pub currency: String,
    pub year: i32,
    #[schemars(with = "f64")]
    pub gross_income: Decimal,
    #[schemars(with = "f64")]
    pub total_deductions: Decimal,
    /// Allowance subtracted from taxable income; zero unless allowance mode is applied
    #[schemars(with = "f64")]
    pub personal_allowance: Decimal,
    #[schemars(with = "f64")]
    pub taxable_income: Decimal,
    #[schemars(with = "f64")]
    pub annual_tax: Decimal,
    #[schemars(with = "f64")]
    pub monthly_tax: Decimal,
    /// Annual tax over gross income; zero when gross income is zero
    #[schemars(with = "f64")]
    pub effective_rate: Decimal,
    pub line_items: Vec<LineItem>,
    pub assumptions_note: String,
}

impl CalcOutputs {
    pub fn deductions(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().filter(|item| item.is_deduction)
    }
}

/// One step of the computation, in the order it was applied
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub label: String,
    #[schemars(with = "f64")]
    pub amount: Decimal,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_deduction: bool,
}

impl LineItem {
    pub fn new(label: impl Into<String>, amount: Decimal) -> Self {
        LineItem {
            label: label.into(),
            amount,
            is_deduction: false,
        }
    }

    pub fn deduction(label: impl Into<String>, amount: Decimal) -> Self {
        LineItem {
            label: label.into(),
            amount,
            is_deduction: true,
        }
    }
}
