use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};

/// charges applied to an installment paid late
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePenalty {
    /// one-off fine, as a percentage of the installment
    pub fine_percent: Decimal,
    /// simple interest per day late, as a percentage
    pub daily_interest_percent: Decimal,
}

/// breakdown of a late installment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatePaymentCharge {
    pub original_value: Money,
    pub days_late: u32,
    pub fine: Money,
    pub interest: Money,
    pub corrected_value: Money,
}

impl LatePenalty {
    pub fn new(fine_percent: Decimal, daily_interest_percent: Decimal) -> Result<Self> {
        if fine_percent < Decimal::ZERO {
            return Err(CalculatorError::invalid_input("fine_percent", fine_percent));
        }
        if daily_interest_percent < Decimal::ZERO {
            return Err(CalculatorError::invalid_input(
                "daily_interest_percent",
                daily_interest_percent,
            ));
        }

        Ok(Self {
            fine_percent,
            daily_interest_percent,
        })
    }

    /// value owed: `value * (1 + fine + daily * days)`
    pub fn apply(&self, value: Money, days_late: u32) -> Result<LatePaymentCharge> {
        let fine = value.checked_percentage(self.fine_percent);
        let interest = Decimal::from(days_late)
            .checked_mul(Rate::from_percent(self.daily_interest_percent).as_decimal())
            .and_then(|factor| value.checked_mul(factor));

        let (fine, interest, corrected_value) = fine
            .zip(interest)
            .and_then(|(fine, interest)| {
                let corrected = value.checked_add(fine)?.checked_add(interest)?;
                Some((fine, interest, corrected))
            })
            .ok_or_else(|| CalculatorError::overflow("late payment charge"))?;

        Ok(LatePaymentCharge {
            original_value: value,
            days_late,
            fine,
            interest,
            corrected_value,
        })
    }
}
