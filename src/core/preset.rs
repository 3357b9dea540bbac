use super::rules::{
    AllowanceKind, Bracket, PayeRules, PersonalAllowance, ReliefGates,
};
use rust_decimal_macros::dec;

const PRESET_NOTES: &str = "Estimate only. Based on the progressive PAYE bands for the 2026 tax \
year; confirm figures with a qualified tax adviser before filing.";

/// Rules used when no override document is supplied
pub fn default_rules() -> PayeRules {
    PayeRules {
        currency: "NGN".to_string(),
        year: 2026,
        reliefs: ReliefGates {
            pension_is_deductible: true,
            nhf_is_deductible: true,
            life_assurance_cap: None,
        },
        brackets: vec![
            Bracket::bounded(dec!(800000), dec!(0)),
            Bracket::bounded(dec!(3000000), dec!(0.15)),
            Bracket::bounded(dec!(12000000), dec!(0.18)),
            Bracket::bounded(dec!(25000000), dec!(0.21)),
            Bracket::bounded(dec!(50000000), dec!(0.23)),
            Bracket::unbounded(dec!(0.25)),
        ],
        personal_allowance: PersonalAllowance {
            kind: AllowanceKind::Hybrid,
            value: dec!(200000),
            rate: dec!(0.20),
        },
        notes: PRESET_NOTES.to_string(),
    }
}
