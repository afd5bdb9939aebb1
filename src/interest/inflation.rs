use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{check_periods, CalculatorError, Result};

/// installments discounted back to today's money
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentValue {
    pub nominal_total: Money,
    pub present_value: Money,
    pub monthly_inflation: Rate,
}

impl PresentValue {
    /// purchasing power lost to inflation over the plan
    pub fn inflation_discount(&self) -> Money {
        self.nominal_total - self.present_value
    }
}

/// present value of `count` equal installments: sum of `value / (1 + i)^k` for k = 1..=count
pub fn present_value_of_installments(
    value: Money,
    count: u32,
    monthly_inflation: Rate,
) -> Result<PresentValue> {
    check_periods(count)?;
    let base = Decimal::ONE + monthly_inflation.as_decimal();
    if base <= Decimal::ZERO {
        return Err(CalculatorError::invalid_input("monthly_inflation", monthly_inflation));
    }

    let mut present_value = Money::ZERO;
    for k in 1..=count {
        let running = base
            .checked_powu(u64::from(k))
            .and_then(|factor| value.checked_div(factor))
            .and_then(|installment| present_value.checked_add(installment))
            .ok_or_else(|| CalculatorError::overflow("present value"))?;
        present_value = running;
    }

    let nominal_total = value
        .checked_mul(Decimal::from(count))
        .ok_or_else(|| CalculatorError::overflow("nominal total"))?;

    Ok(PresentValue {
        nominal_total,
        present_value,
        monthly_inflation,
    })
}
