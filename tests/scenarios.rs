//! Reference scenarios against the fixture rules in tests/data

use payec::core::{
    default_rules, load_rules, CalcInputs, Ceiling, NonSalaryInputs, PayeRules, Period,
    ReliefClaim, ReliefType, RulesSource, SalaryInputs,
};
use payec::tax::{compute_tax, AllowanceMode, Calculator};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::path::PathBuf;

fn fixture_rules() -> PayeRules {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/test_rules.json");
    load_rules(&RulesSource::File(path)).unwrap().rules
}

fn salary(basic: Decimal) -> SalaryInputs {
    SalaryInputs {
        period: Period::Annual,
        basic,
        ..Default::default()
    }
}

fn with_allowance() -> Calculator {
    Calculator::new().with_allowance(AllowanceMode::Applied)
}

#[test]
fn fixture_rules_use_unbounded_top_bracket() {
    let rules = fixture_rules();
    assert_eq!(rules.brackets.last().unwrap().up_to, Ceiling::Unbounded);
}

#[test]
fn scenario_basic_salary() {
    let outputs = with_allowance().compute(&CalcInputs::Salary(salary(dec!(600000))), &fixture_rules());
    assert_eq!(outputs.taxable_income, dec!(400000));
    assert_eq!(outputs.annual_tax, dec!(32000));
}

#[test]
fn scenario_pension() {
    let inputs = CalcInputs::Salary(SalaryInputs {
        pension_pct: dec!(8),
        ..salary(dec!(1000000))
    });
    let outputs = with_allowance().compute(&inputs, &fixture_rules());
    assert_eq!(outputs.annual_tax, dec!(72000));
}

#[test]
fn scenario_nhf() {
    let inputs = CalcInputs::Salary(SalaryInputs {
        nhf_enabled: true,
        ..salary(dec!(1000000))
    });
    let outputs = with_allowance().compute(&inputs, &fixture_rules());
    assert_eq!(outputs.taxable_income, dec!(775000));
}

#[test]
fn scenario_first_bracket_boundary() {
    let outputs = with_allowance().compute(&CalcInputs::Salary(salary(dec!(500000))), &fixture_rules());
    assert_eq!(outputs.annual_tax, dec!(21000));
    let bracket_items = outputs
        .line_items
        .iter()
        .filter(|i| i.label.starts_with("Tax on"))
        .count();
    assert_eq!(bracket_items, 1);
}

#[test]
fn scenario_effective_rate() {
    let outputs = with_allowance().compute(&CalcInputs::Salary(salary(dec!(1000000))), &fixture_rules());
    let expected = outputs.annual_tax / dec!(1000000);
    assert!((outputs.effective_rate - expected).abs() < dec!(0.00001));
}

#[test]
fn monthly_inputs_match_annual() {
    let rules = fixture_rules();
    let monthly = CalcInputs::Salary(SalaryInputs {
        period: Period::Monthly,
        basic: dec!(250000),
        housing: dec!(100000),
        pension_pct: dec!(8),
        nhf_enabled: true,
        ..Default::default()
    });
    let annual = CalcInputs::Salary(SalaryInputs {
        period: Period::Annual,
        basic: dec!(3000000),
        housing: dec!(1200000),
        pension_pct: dec!(8),
        nhf_enabled: true,
        ..Default::default()
    });
    for calculator in [Calculator::new(), with_allowance()] {
        let monthly_outputs = calculator.compute(&monthly, &rules);
        let annual_outputs = calculator.compute(&annual, &rules);
        assert_eq!(monthly_outputs.annual_tax, annual_outputs.annual_tax);
    }
}

#[test]
fn tax_is_monotonic_in_income() {
    let rules = default_rules();
    let mut previous = Decimal::ZERO;
    for step in 0..=120 {
        let gross = Decimal::from(step) * dec!(500000);
        let inputs = CalcInputs::NonSalary(NonSalaryInputs {
            gross_income: gross,
            reliefs: vec![],
        });
        let tax = compute_tax(&inputs, &rules).annual_tax;
        assert!(tax >= previous, "tax fell at gross {gross}");
        previous = tax;
    }
}

#[test]
fn preset_top_band_applies_above_fifty_million() {
    let inputs = CalcInputs::NonSalary(NonSalaryInputs {
        gross_income: dec!(60000000),
        reliefs: vec![],
    });
    let outputs = compute_tax(&inputs, &default_rules());
    // 330,000 + 1,620,000 + 2,730,000 + 5,750,000 + 2,500,000
    assert_eq!(outputs.annual_tax, dec!(12930000));
    assert_eq!(outputs.line_items.last().unwrap().label, "Tax on ₦10,000,000.00 @ 25%");
}

#[test]
fn non_salary_relief_caps_apply_together() {
    let inputs = CalcInputs::NonSalary(NonSalaryInputs {
        gross_income: dec!(300000000),
        reliefs: vec![
            ReliefClaim::new(ReliefType::EmploymentCompensation, dec!(60000000)),
            ReliefClaim::new(ReliefType::PersonalEffects, dec!(6000000)),
            ReliefClaim::new(ReliefType::ShareGains, dec!(180000000)),
            ReliefClaim::rent(dec!(10000000)),
        ],
    });
    let outputs = compute_tax(&inputs, &default_rules());
    assert_eq!(
        outputs.total_deductions,
        dec!(50000000) + dec!(5000000) + dec!(150000000) + dec!(500000)
    );
    assert_eq!(outputs.deductions().count(), 4);
}

#[test]
fn outputs_identical_across_threads() {
    let rules = default_rules();
    let inputs = CalcInputs::Salary(SalaryInputs {
        period: Period::Monthly,
        basic: dec!(450000),
        pension_pct: dec!(8),
        ..Default::default()
    });
    let expected = compute_tax(&inputs, &rules);
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| compute_tax(&inputs, &rules)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
