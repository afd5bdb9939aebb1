pub mod inflation;
pub mod penalty;
pub mod tax;

use rust_decimal::{Decimal, MathematicalOps};

use crate::decimal::{Money, Rate};
use crate::errors::{check_periods, CalculatorError, Result};
use crate::types::InterestKind;

pub use inflation::{present_value_of_installments, PresentValue};
pub use penalty::{LatePaymentCharge, LatePenalty};
pub use tax::{adjust_for_income_tax, TaxPolicy};

/// total owed after charging interest on a principal over a number of periods.
///
/// simple: `P * (1 + r * n)`, compound: `P * (1 + r)^n`
pub fn project_debt(principal: Money, periods: u32, rate: Rate, kind: InterestKind) -> Result<Money> {
    check_periods(periods)?;
    if principal.is_negative() {
        return Err(CalculatorError::invalid_input("principal", principal));
    }

    let r = rate.as_decimal();
    let n = Decimal::from(periods);
    let factor = match kind {
        InterestKind::Simple => r.checked_mul(n).and_then(|i| i.checked_add(Decimal::ONE)),
        InterestKind::Compound => (Decimal::ONE + r).checked_powu(u64::from(periods)),
    }
    .ok_or_else(|| CalculatorError::overflow("interest factor"))?;

    principal
        .checked_mul(factor)
        .ok_or_else(|| CalculatorError::overflow("projected debt"))
}

/// interest portion of a projected debt
pub fn interest_charged(principal: Money, periods: u32, rate: Rate, kind: InterestKind) -> Result<Money> {
    Ok(project_debt(principal, periods, rate, kind)? - principal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_simple_interest() {
        let total = project_debt(
            Money::from_major(1_000),
            12,
            Rate::from_decimal(dec!(0.01)),
            InterestKind::Simple,
        )
        .unwrap();
        assert_eq!(total, Money::from_major(1_120));
    }

    #[test]
    fn test_compound_interest() {
        let total = project_debt(
            Money::from_major(1_000),
            12,
            Rate::from_decimal(dec!(0.01)),
            InterestKind::Compound,
        )
        .unwrap();
        assert_eq!(total.round_cents(), Money::from_cents(112_683));
        assert!(total > Money::from_major(1_120));
    }

    #[test]
    fn test_zero_rate_is_identity() {
        for kind in [InterestKind::Simple, InterestKind::Compound] {
            let total = project_debt(Money::from_major(500), 6, Rate::ZERO, kind).unwrap();
            assert_eq!(total, Money::from_major(500));
        }
    }

    #[test]
    fn test_interest_charged() {
        let interest = interest_charged(
            Money::from_major(1_000),
            12,
            Rate::from_decimal(dec!(0.01)),
            InterestKind::Simple,
        )
        .unwrap();
        assert_eq!(interest, Money::from_major(120));
    }

    #[test]
    fn test_invalid_inputs() {
        let rate = Rate::from_decimal(dec!(0.01));
        assert_eq!(
            project_debt(Money::from_major(1_000), 0, rate, InterestKind::Simple),
            Err(CalculatorError::InvalidPeriodCount { periods: 0 })
        );
        assert_eq!(
            project_debt(Money::from_major(1_000), 1_201, rate, InterestKind::Simple),
            Err(CalculatorError::InvalidPeriodCount { periods: 1_201 })
        );
        assert!(matches!(
            project_debt(Money::from_major(-1), 3, rate, InterestKind::Compound),
            Err(CalculatorError::InvalidNumericInput { .. })
        ));
    }

    #[test]
    fn test_compound_overflow_is_an_error() {
        // 1.1^720 is far beyond what a decimal can hold
        let result = project_debt(
            Money::from_major(1_200),
            720,
            Rate::from_decimal(dec!(0.1)),
            InterestKind::Compound,
        );
        assert!(matches!(result, Err(CalculatorError::CalculationOverflow { .. })));

        let result = project_debt(
            Money::from_decimal(Decimal::MAX),
            2,
            Rate::from_decimal(dec!(0.5)),
            InterestKind::Simple,
        );
        assert!(matches!(result, Err(CalculatorError::CalculationOverflow { .. })));
    }
}
