use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Largest amount accepted in any single input field. Annualizing and summing
/// amounts up to this size stays far inside the range of `Decimal`.
pub const MAX_INPUT_AMOUNT: Decimal = dec!(1000000000000000);

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("{field} must not be negative: {value}")]
    NegativeAmount { field: &'static str, value: Decimal },
    #[error("{field} {value} exceeds the maximum of {}", MAX_INPUT_AMOUNT)]
    AmountTooLarge { field: &'static str, value: Decimal },
    #[error("pensionPct must be between 0 and 100: {0}")]
    PensionPctOutOfRange(Decimal),
    #[error("relief {index}: {source}")]
    Relief {
        index: usize,
        #[source]
        source: Box<InputError>,
    },
}

/// A single tax computation request, tagged by earner type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "earnerType")]
pub enum CalcInputs {
    /// Employee paid through payroll; components are annualized by period
    #[serde(rename = "salary")]
    Salary(SalaryInputs),
    /// Self-employed or other income, always stated annually
    #[serde(rename = "non-salary")]
    NonSalary(NonSalaryInputs),
}

impl CalcInputs {
    pub fn earner_type(&self) -> EarnerType {
        match self {
            CalcInputs::Salary(_) => EarnerType::Salary,
            CalcInputs::NonSalary(_) => EarnerType::NonSalary,
        }
    }

    /// Check amounts are non-negative and small enough to compute with.
    ///
    /// The engine assumes inputs that pass this check; call it wherever
    /// inputs enter the system.
    pub fn validate(&self) -> Result<(), InputError> {
        match self {
            CalcInputs::Salary(salary) => salary.validate(),
            CalcInputs::NonSalary(non_salary) => non_salary.validate(),
        }
    }
}

fn check_amount(field: &'static str, value: Decimal) -> Result<(), InputError> {
    if value < Decimal::ZERO {
        Err(InputError::NegativeAmount { field, value })
    } else if value > MAX_INPUT_AMOUNT {
        Err(InputError::AmountTooLarge { field, value })
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum EarnerType {
    Salary,
    NonSalary,
}

/// Period in which salary components are stated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Monthly,
    #[default]
    Annual,
}

impl Period {
    /// Factor that converts an amount stated in this period to an annual amount
    pub fn multiplier(self) -> Decimal {
        match self {
            Period::Monthly => Decimal::from(12),
            Period::Annual => Decimal::ONE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryInputs {
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub basic: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub housing: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub transport: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub other: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub bonus: Decimal,
    /// Pension contribution as a percentage (0-100) of gross
    #[serde(default)]
    #[schemars(with = "f64")]
    pub pension_pct: Decimal,
    #[serde(default)]
    pub nhf_enabled: bool,
    /// Overrides the 2.5%-of-gross NHF default, stated in the input period
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub nhf_amount: Option<Decimal>,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub life_assurance: Decimal,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub voluntary_contrib: Decimal,
}

impl SalaryInputs {
    /// Sum of the pay components, in the input period
    pub fn period_total(&self) -> Decimal {
        self.basic + self.housing + self.transport + self.other + self.bonus
    }

    fn validate(&self) -> Result<(), InputError> {
        check_amount("basic", self.basic)?;
        check_amount("housing", self.housing)?;
        check_amount("transport", self.transport)?;
        check_amount("other", self.other)?;
        check_amount("bonus", self.bonus)?;
        if self.pension_pct < Decimal::ZERO || self.pension_pct > dec!(100) {
            return Err(InputError::PensionPctOutOfRange(self.pension_pct));
        }
        if let Some(nhf_amount) = self.nhf_amount {
            check_amount("nhfAmount", nhf_amount)?;
        }
        check_amount("lifeAssurance", self.life_assurance)?;
        check_amount("voluntaryContrib", self.voluntary_contrib)
    }
}

impl NonSalaryInputs {
    fn validate(&self) -> Result<(), InputError> {
        check_amount("grossIncome", self.gross_income)?;
        for (index, claim) in self.reliefs.iter().enumerate() {
            claim.validate().map_err(|source| InputError::Relief {
                index,
                source: Box::new(source),
            })?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NonSalaryInputs {
    /// Annual gross income; never annualized further
    #[schemars(with = "f64")]
    pub gross_income: Decimal,
    #[serde(default)]
    pub reliefs: Vec<ReliefClaim>,
}

/// A relief or deduction claimed by a non-salary earner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReliefClaim {
    #[serde(rename = "type")]
    pub kind: ReliefType,
    #[serde(default)]
    #[schemars(with = "f64")]
    pub amount: Decimal,
    /// Only read by rent relief
    #[serde(default)]
    #[schemars(with = "Option<f64>")]
    pub annual_rent: Option<Decimal>,
}

impl ReliefClaim {
    pub fn new(kind: ReliefType, amount: Decimal) -> Self {
        ReliefClaim {
            kind,
            amount,
            annual_rent: None,
        }
    }

    pub fn rent(annual_rent: Decimal) -> Self {
        ReliefClaim {
            kind: ReliefType::RentRelief,
            amount: Decimal::ZERO,
            annual_rent: Some(annual_rent),
        }
    }

    fn validate(&self) -> Result<(), InputError> {
        check_amount("amount", self.amount)?;
        if let Some(annual_rent) = self.annual_rent {
            check_amount("annualRent", annual_rent)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReliefType {
    Gifts,
    RentRelief,
    CharityReligious,
    EmploymentCompensation,
    HousingInterest,
    LifeInsurance,
    Nhf,
    Nhis,
    OwnerOccupiedHouse,
    Pension,
    PensionFunds,
    PersonalEffects,
    PrivateVehicles,
    RetirementBenefits,
    ShareGains,
    ShareGainsReinvested,
}

impl ReliefType {
    pub const ALL: [ReliefType; 16] = [
        ReliefType::Gifts,
        ReliefType::RentRelief,
        ReliefType::CharityReligious,
        ReliefType::EmploymentCompensation,
        ReliefType::HousingInterest,
        ReliefType::LifeInsurance,
        ReliefType::Nhf,
        ReliefType::Nhis,
        ReliefType::OwnerOccupiedHouse,
        ReliefType::Pension,
        ReliefType::PensionFunds,
        ReliefType::PersonalEffects,
        ReliefType::PrivateVehicles,
        ReliefType::RetirementBenefits,
        ReliefType::ShareGains,
        ReliefType::ShareGainsReinvested,
    ];
}
