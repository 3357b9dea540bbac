use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Stored value standing in for an unbounded ceiling. Anything at or above it
/// reads back as [`Ceiling::Unbounded`].
pub const UNBOUNDED_SENTINEL: Decimal = dec!(9999999999);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RulesError {
    #[error("rules must define at least one bracket")]
    NoBrackets,
    #[error("bracket {index} has rate {rate} outside 0..=1")]
    RateOutOfRange { index: usize, rate: Decimal },
    #[error("bracket {index} has non-positive ceiling {up_to}")]
    NonPositiveCeiling { index: usize, up_to: Decimal },
    #[error("bracket {index} ceiling {up_to} does not exceed previous ceiling {previous}")]
    CeilingNotIncreasing {
        index: usize,
        up_to: Decimal,
        previous: Decimal,
    },
    #[error("bracket {index} is unbounded but is not the last bracket")]
    UnboundedNotLast { index: usize },
    #[error("last bracket must be unbounded")]
    LastBracketBounded,
    #[error("life assurance cap must not be negative: {0}")]
    NegativeLifeAssuranceCap(Decimal),
    #[error("personal allowance {field} must not be negative: {value}")]
    NegativeAllowance { field: &'static str, value: Decimal },
    #[error("personal allowance {field} {value} is above {max}")]
    AllowanceRateTooHigh {
        field: &'static str,
        value: Decimal,
        max: Decimal,
    },
}

/// PAYE rules configuration: brackets, relief gates and allowance policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayeRules {
    pub currency: String,
    pub year: i32,
    #[serde(default)]
    pub reliefs: ReliefGates,
    pub brackets: Vec<Bracket>,
    #[serde(default)]
    pub personal_allowance: PersonalAllowance,
    #[serde(default)]
    pub notes: String,
}

/// Gates for the salary branch deductions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReliefGates {
    #[serde(default)]
    pub pension_is_deductible: bool,
    #[serde(default)]
    pub nhf_is_deductible: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "number::serialize_option"
    )]
    #[schemars(with = "Option<f64>")]
    pub life_assurance_cap: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    /// Upper limit of the bracket; null or 9999999999 means unbounded
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub up_to: Ceiling,
    /// Marginal rate as a fraction (0.07 = 7%)
    #[serde(serialize_with = "number::serialize")]
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

impl Bracket {
    pub fn bounded(up_to: Decimal, rate: Decimal) -> Self {
        Bracket {
            up_to: Ceiling::Bounded(up_to),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Bracket {
            up_to: Ceiling::Unbounded,
            rate,
        }
    }
}

/// Upper limit of a tax bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ceiling {
    Bounded(Decimal),
    #[default]
    Unbounded,
}

impl Ceiling {
    pub fn limit(self) -> Option<Decimal> {
        match self {
            Ceiling::Bounded(limit) => Some(limit),
            Ceiling::Unbounded => None,
        }
    }
}

impl Serialize for Ceiling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Ceiling::Bounded(limit) => number::serialize(limit, serializer),
            Ceiling::Unbounded => number::serialize(&UNBOUNDED_SENTINEL, serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Ceiling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Decimal>::deserialize(deserializer)?;
        Ok(match value {
            Some(limit) if limit < UNBOUNDED_SENTINEL => Ceiling::Bounded(limit),
            _ => Ceiling::Unbounded,
        })
    }
}

/// Stored rules carry plain JSON numbers rather than decimal strings.
/// Reading accepts either form.
mod number {
    use rust_decimal::prelude::ToPrimitive;
    use rust_decimal::Decimal;
    use serde::ser::Error;
    use serde::Serializer;

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        let value = value.normalize();
        if value.scale() == 0 {
            if let Some(whole) = value.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => Err(S::Error::custom(format!("{value} is not representable as a number"))),
        }
    }

    pub fn serialize_option<S: Serializer>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serialize(value, serializer),
            None => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AllowanceKind {
    #[default]
    Fixed,
    PercentOfGross,
    Hybrid,
}

impl AllowanceKind {
    /// Name used in rules documents
    pub fn as_str(self) -> &'static str {
        match self {
            AllowanceKind::Fixed => "fixed",
            AllowanceKind::PercentOfGross => "percentOfGross",
            AllowanceKind::Hybrid => "hybrid",
        }
    }
}

/// Personal allowance policy.
///
/// - `fixed`: `value`
/// - `percentOfGross`: `value` percent of gross income
/// - `hybrid`: `value` plus `rate` of gross income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalAllowance {
    #[serde(rename = "type")]
    pub kind: AllowanceKind,
    #[serde(serialize_with = "number::serialize")]
    #[schemars(with = "f64")]
    pub value: Decimal,
    #[serde(default = "default_hybrid_rate", serialize_with = "number::serialize")]
    #[schemars(with = "f64")]
    pub rate: Decimal,
}

fn default_hybrid_rate() -> Decimal {
    dec!(0.20)
}

impl Default for PersonalAllowance {
    fn default() -> Self {
        PersonalAllowance {
            kind: AllowanceKind::Fixed,
            value: Decimal::ZERO,
            rate: default_hybrid_rate(),
        }
    }
}

impl PersonalAllowance {
    pub fn fixed(value: Decimal) -> Self {
        PersonalAllowance {
            kind: AllowanceKind::Fixed,
            value,
            ..Default::default()
        }
    }

    /// Allowance amount for the given annual gross income
    pub fn amount_for(&self, gross_income: Decimal) -> Decimal {
        let amount = match self.kind {
            AllowanceKind::Fixed => self.value,
            AllowanceKind::PercentOfGross => gross_income * self.value / dec!(100),
            AllowanceKind::Hybrid => self.value + gross_income * self.rate,
        };
        amount.max(Decimal::ZERO)
    }
}

impl PayeRules {
    /// Check the bracket table and allowance policy are well formed.
    ///
    /// The engine assumes rules that pass this check; call it wherever rules
    /// enter the system.
    pub fn validate(&self) -> Result<(), RulesError> {
        if self.brackets.is_empty() {
            return Err(RulesError::NoBrackets);
        }

        let last = self.brackets.len() - 1;
        let mut previous = Decimal::ZERO;
        for (index, bracket) in self.brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(RulesError::RateOutOfRange {
                    index,
                    rate: bracket.rate,
                });
            }
            match bracket.up_to {
                Ceiling::Bounded(up_to) => {
                    if up_to <= Decimal::ZERO {
                        return Err(RulesError::NonPositiveCeiling { index, up_to });
                    }
                    if index > 0 && up_to <= previous {
                        return Err(RulesError::CeilingNotIncreasing {
                            index,
                            up_to,
                            previous,
                        });
                    }
                    if index == last {
                        return Err(RulesError::LastBracketBounded);
                    }
                    previous = up_to;
                }
                Ceiling::Unbounded => {
                    if index != last {
                        return Err(RulesError::UnboundedNotLast { index });
                    }
                }
            }
        }

        if let Some(cap) = self.reliefs.life_assurance_cap {
            if cap < Decimal::ZERO {
                return Err(RulesError::NegativeLifeAssuranceCap(cap));
            }
        }
        let allowance = &self.personal_allowance;
        if allowance.value < Decimal::ZERO {
            return Err(RulesError::NegativeAllowance {
                field: "value",
                value: allowance.value,
            });
        }
        if allowance.rate < Decimal::ZERO {
            return Err(RulesError::NegativeAllowance {
                field: "rate",
                value: allowance.rate,
            });
        }
        if allowance.kind == AllowanceKind::PercentOfGross && allowance.value > dec!(100) {
            return Err(RulesError::AllowanceRateTooHigh {
                field: "value",
                value: allowance.value,
                max: dec!(100),
            });
        }
        if allowance.rate > Decimal::ONE {
            return Err(RulesError::AllowanceRateTooHigh {
                field: "rate",
                value: allowance.rate,
                max: Decimal::ONE,
            });
        }
        Ok(())
    }
}
