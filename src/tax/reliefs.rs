//! Relief resolution for non-salary earners.
//!
//! Each [`ReliefType`] maps to one entry in [`RELIEF_RULES`], which caps the
//! claimed amount and picks the label recorded in the audit trail.

use crate::core::{ReliefClaim, ReliefType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub const RENT_RELIEF_RATE: Decimal = dec!(0.20);
pub const RENT_RELIEF_CAP: Decimal = dec!(500000);
pub const EMPLOYMENT_COMPENSATION_CAP: Decimal = dec!(50000000);
pub const PERSONAL_EFFECTS_CAP: Decimal = dec!(5000000);
pub const SHARE_GAINS_SMALL_LIMIT: Decimal = dec!(10000000);
pub const SHARE_GAINS_CAP: Decimal = dec!(150000000);

/// Deductible amount of a claim and its audit label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRelief {
    pub amount: Decimal,
    pub label: &'static str,
}

pub struct ReliefRule {
    pub kind: ReliefType,
    pub label: &'static str,
    resolve: fn(&ReliefClaim, &'static str) -> ResolvedRelief,
}

impl ReliefRule {
    pub fn resolve(&self, claim: &ReliefClaim) -> ResolvedRelief {
        (self.resolve)(claim, self.label)
    }
}

/// Indexed by `ReliefType as usize`; order follows the enum declaration.
pub static RELIEF_RULES: [ReliefRule; 16] = [
    ReliefRule {
        kind: ReliefType::Gifts,
        label: "Gifts",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::RentRelief,
        label: "Rent Relief (20% of annual rent, max ₦500,000)",
        resolve: rent_relief,
    },
    ReliefRule {
        kind: ReliefType::CharityReligious,
        label: "Charitable/Religious Donations",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::EmploymentCompensation,
        label: "Employment Compensation (max ₦50M)",
        resolve: employment_compensation,
    },
    ReliefRule {
        kind: ReliefType::HousingInterest,
        label: "Housing Loan Interest",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::LifeInsurance,
        label: "Life Insurance Premium",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::Nhf,
        label: "National Housing Fund (NHF)",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::Nhis,
        label: "National Health Insurance (NHIS)",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::OwnerOccupiedHouse,
        label: "Owner-Occupied House",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::Pension,
        label: "Pension Contribution",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::PensionFunds,
        label: "Pension Funds",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::PersonalEffects,
        label: "Personal Effects (max ₦5M)",
        resolve: personal_effects,
    },
    ReliefRule {
        kind: ReliefType::PrivateVehicles,
        label: "Private Vehicles",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::RetirementBenefits,
        label: "Retirement Benefits",
        resolve: full_amount,
    },
    ReliefRule {
        kind: ReliefType::ShareGains,
        label: "Share Gains (up to ₦10M)",
        resolve: share_gains,
    },
    ReliefRule {
        kind: ReliefType::ShareGainsReinvested,
        label: "Share Gains Reinvested",
        resolve: full_amount,
    },
];

pub fn rule_for(kind: ReliefType) -> &'static ReliefRule {
    &RELIEF_RULES[kind as usize]
}

pub fn resolve(claim: &ReliefClaim) -> ResolvedRelief {
    rule_for(claim.kind).resolve(claim)
}

fn full_amount(claim: &ReliefClaim, label: &'static str) -> ResolvedRelief {
    ResolvedRelief {
        amount: claim.amount,
        label,
    }
}

// Reads annualRent only; the claimed amount is ignored.
fn rent_relief(claim: &ReliefClaim, label: &'static str) -> ResolvedRelief {
    let amount = claim
        .annual_rent
        .map_or(Decimal::ZERO, |rent| (rent * RENT_RELIEF_RATE).min(RENT_RELIEF_CAP));
    ResolvedRelief { amount, label }
}

fn employment_compensation(claim: &ReliefClaim, label: &'static str) -> ResolvedRelief {
    ResolvedRelief {
        amount: claim.amount.min(EMPLOYMENT_COMPENSATION_CAP),
        label,
    }
}

fn personal_effects(claim: &ReliefClaim, label: &'static str) -> ResolvedRelief {
    ResolvedRelief {
        amount: claim.amount.min(PERSONAL_EFFECTS_CAP),
        label,
    }
}

const SHARE_GAINS_BELOW_CAP_LABEL: &str = "Share Gains (below ₦150M/year)";
const SHARE_GAINS_CAPPED_LABEL: &str = "Share Gains (exempt portion, ₦150M cap)";

// The table label covers the small-gains tier. Gains above the cap stay
// taxable; only the capped portion is deducted.
fn share_gains(claim: &ReliefClaim, label: &'static str) -> ResolvedRelief {
    if claim.amount <= SHARE_GAINS_SMALL_LIMIT {
        ResolvedRelief {
            amount: claim.amount,
            label,
        }
    } else if claim.amount <= SHARE_GAINS_CAP {
        ResolvedRelief {
            amount: claim.amount,
            label: SHARE_GAINS_BELOW_CAP_LABEL,
        }
    } else {
        ResolvedRelief {
            amount: SHARE_GAINS_CAP,
            label: SHARE_GAINS_CAPPED_LABEL,
        }
    }
}
