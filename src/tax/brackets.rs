use crate::core::{Bracket, Ceiling};
use rust_decimal::Decimal;

/// Portion of taxable income that fell inside one bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketSlice {
    pub index: usize,
    pub taxable: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketTax {
    pub slices: Vec<BracketSlice>,
    pub total: Decimal,
    /// Income left over when the brackets run out before it is exhausted.
    /// Always zero for rules that pass validation.
    pub untaxed: Decimal,
}

/// Apply brackets progressively to `taxable_income`.
///
/// Brackets past the one that exhausts the income are neither evaluated nor
/// recorded.
pub fn apply_brackets(taxable_income: Decimal, brackets: &[Bracket]) -> BracketTax {
    let mut result = BracketTax::default();
    let mut remaining = taxable_income;
    let mut prev_limit = Decimal::ZERO;

    for (index, bracket) in brackets.iter().enumerate() {
        if remaining <= Decimal::ZERO {
            break;
        }
        let taxable = match bracket.up_to {
            Ceiling::Bounded(up_to) => remaining.min(up_to - prev_limit),
            Ceiling::Unbounded => remaining,
        };
        let tax = taxable * bracket.rate;
        log::debug!(
            "Bracket {}: taxable={}, rate={}, tax={}",
            index,
            taxable,
            bracket.rate,
            tax
        );
        result.total += tax;
        result.slices.push(BracketSlice {
            index,
            taxable,
            rate: bracket.rate,
            tax,
        });
        remaining -= taxable;
        if let Ceiling::Bounded(up_to) = bracket.up_to {
            prev_limit = up_to;
        }
    }

    if remaining > Decimal::ZERO {
        log::warn!(
            "Brackets exhausted with {} income remaining; last bracket should be unbounded",
            remaining
        );
        result.untaxed = remaining;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn brackets() -> Vec<Bracket> {
        vec![
            Bracket::bounded(dec!(300000), dec!(0.07)),
            Bracket::bounded(dec!(600000), dec!(0.11)),
            Bracket::unbounded(dec!(0.15)),
        ]
    }

    #[test]
    fn sums_slices_across_brackets() {
        let result = apply_brackets(dec!(720000), &brackets());
        let taxed: Vec<_> = result.slices.iter().map(|s| s.taxable).collect();
        assert_eq!(taxed, vec![dec!(300000), dec!(300000), dec!(120000)]);
        assert_eq!(result.total, dec!(72000));
        assert_eq!(
            result.total,
            result.slices.iter().map(|s| s.taxable * s.rate).sum::<Decimal>()
        );
        assert_eq!(result.untaxed, Decimal::ZERO);
    }

    #[test]
    fn exact_boundary_stays_in_bracket() {
        let result = apply_brackets(dec!(300000), &brackets());
        assert_eq!(result.slices.len(), 1);
        assert_eq!(result.slices[0].taxable, dec!(300000));
        assert_eq!(result.total, dec!(21000));

        let result = apply_brackets(dec!(600000), &brackets());
        assert_eq!(result.slices.len(), 2);
        assert_eq!(result.total, dec!(54000));
    }

    #[test]
    fn zero_income_enters_no_bracket() {
        let result = apply_brackets(Decimal::ZERO, &brackets());
        assert!(result.slices.is_empty());
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn negative_income_enters_no_bracket() {
        let result = apply_brackets(dec!(-5000), &brackets());
        assert!(result.slices.is_empty());
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.untaxed, Decimal::ZERO);
    }

    #[test]
    fn tax_never_decreases_with_income() {
        let brackets = brackets();
        let mut previous = Decimal::ZERO;
        for step in 0..200 {
            let income = Decimal::from(step * 7_500);
            let total = apply_brackets(income, &brackets).total;
            assert!(total >= previous, "tax fell at income {income}");
            previous = total;
        }
    }

    #[test]
    fn empty_brackets_leave_income_untaxed() {
        let result = apply_brackets(dec!(100000), &[]);
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.untaxed, dec!(100000));
    }

    #[test]
    fn bounded_last_bracket_reports_remainder() {
        let brackets = vec![
            Bracket::bounded(dec!(300000), dec!(0.07)),
            Bracket::bounded(dec!(600000), dec!(0.11)),
        ];
        let result = apply_brackets(dec!(1000000), &brackets);
        assert_eq!(result.total, dec!(54000));
        assert_eq!(result.untaxed, dec!(400000));
    }
}
