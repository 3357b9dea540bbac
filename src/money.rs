use rust_decimal::{Decimal, RoundingStrategy};

/// Formats monetary amounts for labels and reports
pub trait CurrencyFormatter {
    fn format(&self, amount: Decimal) -> String;
}

impl<F: CurrencyFormatter + ?Sized> CurrencyFormatter for &F {
    fn format(&self, amount: Decimal) -> String {
        (**self).format(amount)
    }
}

/// Two-decimal amount with comma thousands grouping and a currency prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    prefix: String,
}

impl CurrencyFormat {
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        CurrencyFormat {
            prefix: prefix.into(),
        }
    }

    pub fn for_code(code: &str) -> Self {
        let prefix = match code.to_uppercase().as_str() {
            "NGN" => "₦".to_string(),
            "GBP" => "£".to_string(),
            "USD" => "$".to_string(),
            "EUR" => "€".to_string(),
            other => format!("{other} "),
        };
        CurrencyFormat { prefix }
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::for_code("NGN")
    }
}

impl CurrencyFormatter for CurrencyFormat {
    fn format(&self, amount: Decimal) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{sign}{}{}", self.prefix, group_thousands(rounded.abs()))
    }
}

fn group_thousands(amount: Decimal) -> String {
    let text = format!("{:.2}", amount);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped}.{fraction}")
}

/// Rate as a percentage without trailing zeros (0.075 -> "7.5")
pub fn format_percent(rate: Decimal) -> String {
    (rate * Decimal::ONE_HUNDRED).normalize().to_string()
}
